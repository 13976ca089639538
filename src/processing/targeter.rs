//! The size-targeting compression policy.
//!
//! The encoder performs the entire search; this layer converts the request
//! into the encoder's terms, then applies the accept/reject rule to whatever
//! comes back. Stateless per call: identical inputs give identical results.

use tracing::{debug, warn};

use crate::core::{CompressedImage, CompressionRequest, SourceImage};
use crate::processing::encoder;
use crate::processing::validation::validate_request;
use crate::utils::{ShrinkError, ShrinkResult};

/// Iteration budget handed to the encoder's internal search.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Compresses `source` toward the request's byte bound.
///
/// Returns a [`CompressedImage`] only when the encoder's output actually fits
/// the bound. Best-effort output above the bound is discarded on purpose:
/// surfacing a file larger than the user asked for would silently break the
/// contract, so the user is told to try a higher value instead.
pub fn compress(
    source: &SourceImage,
    request: CompressionRequest,
) -> ShrinkResult<CompressedImage> {
    validate_request(source, request.desired_max_size_bytes)?;

    let output = encoder::encode_toward_target(
        &source.bytes,
        source.format,
        request.desired_max_size_bytes,
        request.max_attempts,
    )?;
    let achieved_size_bytes = output.len() as u64;

    if achieved_size_bytes > request.desired_max_size_bytes {
        warn!(
            "'{}': best effort {} bytes is above the {} byte bound",
            source.name, achieved_size_bytes, request.desired_max_size_bytes
        );
        return Err(ShrinkError::TargetNotReached);
    }

    debug!(
        "'{}' compressed {} -> {} bytes (bound {})",
        source.name,
        source.byte_len(),
        achieved_size_bytes,
        request.desired_max_size_bytes
    );

    Ok(CompressedImage {
        bytes: output,
        achieved_size_bytes,
        format: source.format.output(),
    })
}
