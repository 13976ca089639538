use std::path::Path;
use crate::core::SourceImage;
use crate::utils::{ShrinkError, ShrinkResult, format_from_path};

/// Validates the file the user picked before it is read into the session.
pub fn validate_input_path(path: &str) -> ShrinkResult<()> {
    let path_ref = Path::new(path);

    if !path_ref.exists() {
        return Err(ShrinkError::validation(format!(
            "Input file does not exist: {}", path_ref.display()
        )));
    }

    if !path_ref.is_file() {
        return Err(ShrinkError::validation(format!(
            "Input path is not a file: {}", path_ref.display()
        )));
    }

    // This will validate the extension and format
    format_from_path(path)?;
    Ok(())
}

/// Checks the request precondition: `0 < desired <= source byte length`,
/// inclusive at the top.
///
/// The frontend disables the compress button outside this range; this check
/// keeps the contract independent of whatever disables it visually.
pub fn validate_request(source: &SourceImage, desired_max_size_bytes: u64) -> ShrinkResult<()> {
    if source.bytes.is_empty() {
        return Err(ShrinkError::validation("Source image is empty"));
    }

    if desired_max_size_bytes == 0 {
        return Err(ShrinkError::validation(
            "Desired size must be greater than zero",
        ));
    }

    if desired_max_size_bytes > source.byte_len() {
        return Err(ShrinkError::validation(format!(
            "Desired size must not exceed the source size ({} bytes)",
            source.byte_len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SourceFormat;

    fn source_of_len(len: usize) -> SourceImage {
        SourceImage {
            name: "photo.jpg".to_string(),
            format: SourceFormat::Jpeg,
            bytes: vec![0xAB; len],
        }
    }

    #[test]
    fn bound_equal_to_source_length_is_accepted() {
        let source = source_of_len(1024);
        assert!(validate_request(&source, 1024).is_ok());
    }

    #[test]
    fn zero_bound_is_rejected() {
        let source = source_of_len(1024);
        assert!(validate_request(&source, 0).is_err());
    }

    #[test]
    fn bound_above_source_length_is_rejected() {
        let source = source_of_len(1024);
        assert!(validate_request(&source, 1025).is_err());
    }

    #[test]
    fn empty_source_is_rejected() {
        let source = source_of_len(0);
        assert!(validate_request(&source, 1).is_err());
    }
}
