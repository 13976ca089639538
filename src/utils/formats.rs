use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::ShrinkError;

/// Formats the app accepts as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
}

/// Containers the encoder actually writes.
///
/// WebP sources come back as JPEG: the encoder has no lossy WebP writer, so
/// the re-encode happens inside the lossy JPEG path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Whether this format goes through the quality-search path.
    pub fn is_lossy(self) -> bool {
        !matches!(self, Self::Png)
    }

    /// The container the compressed result will be written in.
    pub fn output(self) -> OutputFormat {
        match self {
            Self::Png => OutputFormat::Png,
            Self::Jpeg | Self::WebP => OutputFormat::Jpeg,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

impl OutputFormat {
    /// The primary extension for this container
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Check if the extension already names this container
    pub fn matches_extension(self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        match self {
            Self::Jpeg => ext == "jpg" || ext == "jpeg",
            Self::Png => ext == "png",
        }
    }
}

impl FromStr for SourceFormat {
    type Err = ShrinkError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(ShrinkError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_path(path: &str) -> Result<SourceFormat, ShrinkError> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ShrinkError::format(
            format!("File has no extension: {}", path)
        ))?;

    SourceFormat::from_str(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_extensions() {
        assert_eq!(format_from_path("photo.JPG").unwrap(), SourceFormat::Jpeg);
        assert_eq!(format_from_path("icon.png").unwrap(), SourceFormat::Png);
        assert_eq!(format_from_path("pic.webp").unwrap(), SourceFormat::WebP);
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        assert!(format_from_path("doc.pdf").is_err());
        assert!(format_from_path("noextension").is_err());
    }

    #[test]
    fn webp_is_rewritten_as_jpeg() {
        assert_eq!(SourceFormat::WebP.output(), OutputFormat::Jpeg);
        assert_eq!(SourceFormat::Png.output(), OutputFormat::Png);
        assert_eq!(SourceFormat::Jpeg.output(), OutputFormat::Jpeg);
    }
}
