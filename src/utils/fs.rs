use std::path::Path;
use crate::utils::formats::OutputFormat;

/// Default file name for a saved result: `compressed_<originalFileName>`.
///
/// When the encoder switched containers (webp in, jpeg out) the extension is
/// corrected so the name matches the bytes actually written.
pub fn download_file_name(original_name: &str, format: OutputFormat) -> String {
    let path = Path::new(original_name);
    let current_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    if format.matches_extension(current_ext) {
        return format!("compressed_{original_name}");
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    format!("compressed_{stem}.{}", format.extension())
}
