//! Application state management for Tauri.

use std::sync::Arc;
use tokio::sync::Mutex;
use crate::core::session::Session;

/// Application state managed by Tauri.
///
/// Command handlers hold the session lock only to read it or to drive the
/// state machine, never across the blocking encode itself.
#[derive(Clone, Default)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Mutex<Session> {
        &self.session
    }
}
