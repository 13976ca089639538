//! Core types for the size-targeting compressor.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use crate::utils::{OutputFormat, SourceFormat};

/// An image the user has selected, held in memory for the session.
///
/// Immutable once created; a new selection replaces it wholesale.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Original file name, used to derive the download name
    pub name: String,
    /// Format derived from the file extension
    pub format: SourceFormat,
    /// The raw encoded file bytes
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The byte bound and iteration budget for one compression call.
///
/// Must satisfy `0 < desired_max_size_bytes <= source byte length`; the
/// policy layer rejects anything outside that range before encoding starts.
#[derive(Debug, Clone, Copy)]
pub struct CompressionRequest {
    pub desired_max_size_bytes: u64,
    pub max_attempts: u32,
}

/// A compressed buffer that met its byte bound.
///
/// Only ever constructed for output at or below the requested size; overshooting
/// best-effort output is discarded by the targeting policy.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// The re-encoded file bytes
    pub bytes: Vec<u8>,
    /// Actual byte length of `bytes`
    pub achieved_size_bytes: u64,
    /// The container the bytes were written in
    pub format: OutputFormat,
}

/// Frontend-facing description of a loaded or compressed image.
///
/// Carries the preview as a base64 data URL so the webview can render it
/// without another round trip.
#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "sizeBytes")]
    pub size_bytes: u64,
    #[serde(rename = "sizeKb")]
    pub size_kb: f64,
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

impl ImagePayload {
    pub fn from_source(source: &SourceImage) -> Self {
        Self::new(source.name.clone(), source.format.mime(), &source.bytes)
    }

    pub fn from_compressed(file_name: String, compressed: &CompressedImage) -> Self {
        Self::new(file_name, compressed.format.mime(), &compressed.bytes)
    }

    fn new(file_name: String, mime: &str, bytes: &[u8]) -> Self {
        let size_bytes = bytes.len() as u64;
        Self {
            file_name,
            size_bytes,
            size_kb: size_bytes as f64 / 1024.0,
            data_url: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        }
    }
}
