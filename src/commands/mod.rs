//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the webview:
//! - [`load_image`]: Read a picked file into the session
//! - [`compress_image`]: Compress toward a kilobyte bound
//! - [`save_compressed`]: Write the result to disk
//! - [`session_phase`]: Query the state machine

mod image;

pub use image::*;
