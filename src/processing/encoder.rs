//! The lossy re-encode primitive with its internal size search.
//!
//! Given a source buffer and a byte budget, the encoder walks quality (and,
//! when that is not enough, dimensions) downward across a bounded number of
//! rounds and keeps the smallest encoding seen. It always returns its best
//! effort, even above the budget; accepting or rejecting that output is the
//! targeting policy's job, not the encoder's.

use std::io::Cursor;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use tracing::debug;

use crate::utils::{ShrinkError, ShrinkResult, SourceFormat};

/// Quality floor for the JPEG search. Below this the artefacts are bad
/// enough that shrinking dimensions gives a better file at the same size.
const MIN_QUALITY: u8 = 10;
const MAX_QUALITY: u8 = 95;

/// Per-round scale floor; one round never shrinks below 10% of the current
/// dimensions, matching what the in-browser compressors do.
const MIN_SCALE: f32 = 0.1;

/// Re-encodes `source` aiming for `target_bytes`, spending at most
/// `max_attempts` encode rounds, and returns the smallest buffer produced.
pub fn encode_toward_target(
    source: &[u8],
    format: SourceFormat,
    target_bytes: u64,
    max_attempts: u32,
) -> ShrinkResult<Vec<u8>> {
    let decoded = image::load_from_memory(source)
        .map_err(|e| ShrinkError::compression(format!("Failed to decode source image: {e}")))?;

    let mut budget = max_attempts.max(1);
    let mut current = decoded;
    let mut best: Option<Vec<u8>> = None;

    while budget > 0 {
        let encoded = if format.is_lossy() {
            quality_search(&current, target_bytes, &mut budget)?
        } else {
            budget -= 1;
            encode_png(&current)?
        };

        let len = encoded.len() as u64;
        if best.as_ref().is_none_or(|b| encoded.len() < b.len()) {
            best = Some(encoded);
        }

        if len <= target_bytes || budget == 0 {
            break;
        }

        // Quality alone was not enough: shrink dimensions and search again.
        // The byte-ratio square root estimates the needed scale; undershoot it
        // slightly so the next search lands below the bound, not on it.
        let ratio = ((target_bytes as f32 / len as f32).sqrt() * 0.9).clamp(MIN_SCALE, 0.9);
        let (w, h) = (current.width(), current.height());
        let new_w = ((w as f32 * ratio).round() as u32).max(1);
        let new_h = ((h as f32 * ratio).round() as u32).max(1);
        if new_w == w && new_h == h {
            break;
        }

        debug!(
            "Downscaling {}x{} -> {}x{} ({} rounds left)",
            w, h, new_w, new_h, budget
        );
        current = current.resize_exact(new_w, new_h, FilterType::Lanczos3);
    }

    best.ok_or_else(|| ShrinkError::compression("Encoder produced no output"))
}

/// Binary search over JPEG quality for the largest encoding at or below
/// `target_bytes`, spending probes from `budget`.
///
/// Falls back to the smallest encoding seen when nothing fits, so the caller
/// can decide whether to downscale and retry.
fn quality_search(
    image: &DynamicImage,
    target_bytes: u64,
    budget: &mut u32,
) -> ShrinkResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut low = MIN_QUALITY;
    let mut high = MAX_QUALITY;
    let mut fitting: Option<Vec<u8>> = None;
    let mut smallest: Option<Vec<u8>> = None;

    while low <= high && *budget > 0 {
        *budget -= 1;
        let quality = low + (high - low) / 2;
        let encoded = encode_jpeg(&rgb, quality)?;

        if smallest.as_ref().is_none_or(|s| encoded.len() < s.len()) {
            smallest = Some(encoded.clone());
        }

        if encoded.len() as u64 <= target_bytes {
            fitting = Some(encoded);
            if quality == MAX_QUALITY {
                break;
            }
            low = quality + 1;
        } else {
            if quality == MIN_QUALITY {
                break;
            }
            high = quality - 1;
        }
    }

    fitting
        .or(smallest)
        .ok_or_else(|| ShrinkError::compression("Quality search produced no output"))
}

fn encode_jpeg(rgb: &RgbImage, quality: u8) -> ShrinkResult<Vec<u8>> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ShrinkError::compression(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// PNG has no quality knob; re-encode losslessly at the strongest setting
/// and let the dimension loop in [`encode_toward_target`] do the shrinking.
fn encode_png(image: &DynamicImage) -> ShrinkResult<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut buf),
        CompressionType::Best,
        PngFilterType::Adaptive,
    );
    image
        .write_with_encoder(encoder)
        .map_err(|e| ShrinkError::compression(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}
