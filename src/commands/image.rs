//! Tauri command handlers for loading, compressing and saving images.

use std::path::Path;
use tauri::State;
use tracing::{debug, warn};

use crate::core::{
    AppState, CompressionRequest, ImagePayload, SessionEvent, SessionPhase, SourceImage,
};
use crate::processing::{self, DEFAULT_MAX_ATTEMPTS};
use crate::utils::{ShrinkError, ShrinkResult, download_file_name, format_from_path};

/// Loads the picked file into the session, replacing any previous image.
///
/// Returns the metadata and preview payload the frontend renders next to the
/// size field. Resets any earlier compressed result.
#[tauri::command]
pub async fn load_image(state: State<'_, AppState>, path: String) -> ShrinkResult<ImagePayload> {
    processing::validate_input_path(&path)?;
    let format = format_from_path(&path)?;

    let bytes = tokio::fs::read(&path).await?;
    if bytes.is_empty() {
        return Err(ShrinkError::validation("Selected file is empty"));
    }

    let name = Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let source = SourceImage { name, format, bytes };
    let payload = ImagePayload::from_source(&source);

    let mut session = state.session().lock().await;
    session.select_image(source)?;
    debug!("Loaded '{}' ({} bytes)", payload.file_name, payload.size_bytes);

    Ok(payload)
}

/// Compresses the current image toward `desired_kilobytes`.
///
/// The request is validated against the source size before the session moves
/// to `Compressing`, so an out-of-range size never consumes the in-flight
/// slot. The encode itself runs on the blocking pool; the UI thread is never
/// held across it.
#[tauri::command]
pub async fn compress_image(
    state: State<'_, AppState>,
    desired_kilobytes: f64,
) -> ShrinkResult<ImagePayload> {
    let desired_bytes = kilobytes_to_bytes(desired_kilobytes)?;

    // Snapshot the source and claim the in-flight slot under one lock.
    let source = {
        let mut session = state.session().lock().await;
        let source = session
            .source()
            .cloned()
            .ok_or_else(|| ShrinkError::validation("No image selected"))?;
        processing::validate_request(&source, desired_bytes)?;
        session.apply(SessionEvent::CompressionStarted)?;
        source
    };

    let file_name = download_file_name(&source.name, source.format.output());
    debug!(
        "Compressing '{}' toward {} bytes ({} attempt budget)",
        source.name, desired_bytes, DEFAULT_MAX_ATTEMPTS
    );

    let request = CompressionRequest {
        desired_max_size_bytes: desired_bytes,
        max_attempts: DEFAULT_MAX_ATTEMPTS,
    };
    // A panic in the blocking task still settles the session below, so the
    // in-flight slot is never leaked.
    let outcome = match tokio::task::spawn_blocking(move || processing::compress(&source, request))
        .await
    {
        Ok(result) => result,
        Err(e) => Err(ShrinkError::compression(format!(
            "Compression task panicked: {e}"
        ))),
    };

    // Settle the session; the result slot is last-write-wins.
    let mut session = state.session().lock().await;
    match outcome {
        Ok(compressed) => {
            let payload = ImagePayload::from_compressed(file_name, &compressed);
            session.complete(compressed)?;
            Ok(payload)
        }
        Err(e) => {
            warn!("Compression failed: {e}");
            session.fail()?;
            Err(e)
        }
    }
}

/// Writes the compressed buffer into `directory` under its default name
/// (`compressed_<originalFileName>`) and returns the written path.
#[tauri::command]
pub async fn save_compressed(
    state: State<'_, AppState>,
    directory: String,
) -> ShrinkResult<String> {
    let (file_name, bytes) = {
        let session = state.session().lock().await;
        let source = session
            .source()
            .ok_or_else(|| ShrinkError::validation("No image selected"))?;
        let compressed = session
            .result()
            .ok_or_else(|| ShrinkError::validation("Nothing to save: no compressed image"))?;
        (
            download_file_name(&source.name, compressed.format),
            compressed.bytes.clone(),
        )
    };

    let dir = Path::new(&directory);
    if !dir.is_dir() {
        return Err(ShrinkError::validation(format!(
            "Not a directory: {directory}"
        )));
    }

    let output_path = dir.join(&file_name);
    tokio::fs::write(&output_path, bytes).await?;
    debug!("Saved compressed image to {}", output_path.display());

    Ok(output_path.to_string_lossy().to_string())
}

/// Reports the current state-machine phase so the frontend can enable or
/// disable its controls.
#[tauri::command]
pub async fn session_phase(state: State<'_, AppState>) -> ShrinkResult<SessionPhase> {
    Ok(state.session().lock().await.phase())
}

/// Converts the frontend's kilobyte field into the byte bound.
///
/// Rejects zero, negatives, NaN and infinities before any session state is
/// touched.
fn kilobytes_to_bytes(kilobytes: f64) -> ShrinkResult<u64> {
    if !kilobytes.is_finite() || kilobytes <= 0.0 {
        return Err(ShrinkError::validation(
            "Desired size must be a positive number of kilobytes",
        ));
    }
    Ok((kilobytes * 1024.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobyte_conversion_rounds_to_bytes() {
        assert_eq!(kilobytes_to_bytes(20.0).unwrap(), 20 * 1024);
        assert_eq!(kilobytes_to_bytes(0.5).unwrap(), 512);
    }

    #[test]
    fn non_positive_and_non_finite_sizes_are_rejected() {
        assert!(kilobytes_to_bytes(0.0).is_err());
        assert!(kilobytes_to_bytes(-3.0).is_err());
        assert!(kilobytes_to_bytes(f64::NAN).is_err());
        assert!(kilobytes_to_bytes(f64::INFINITY).is_err());
    }
}
