//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`Session`]: The per-window UI session and its state machine
//! - [`SourceImage`] / [`CompressedImage`]: The image data model
//! - [`ImagePayload`]: Frontend-facing preview payloads

mod session;
mod state;
mod types;

pub use session::{Session, SessionEvent, SessionPhase};
pub use state::AppState;
pub use types::{CompressedImage, CompressionRequest, ImagePayload, SourceImage};
