//! The UI session state machine.
//!
//! The frontend only renders; every transition the user can trigger goes
//! through [`transition`], a pure function over (phase, event), so disabling
//! a button in the webview is cosmetic and never load-bearing.

use serde::Serialize;
use crate::core::types::{CompressedImage, SourceImage};
use crate::utils::{ShrinkError, ShrinkResult};

/// Observable phase of the session, reported to the frontend verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    #[default]
    NoImage,
    ImageSelected,
    Compressing,
    Compressed,
    CompressionFailed,
}

/// Events that drive phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ImagePicked,
    CompressionStarted,
    CompressionSucceeded,
    CompressionFailed,
}

/// Returns the next phase, or `None` when the event is not legal in the
/// current phase.
///
/// While a compression is in flight nothing but its own completion is
/// accepted; that is what enforces the single-in-flight rule.
pub fn transition(phase: SessionPhase, event: SessionEvent) -> Option<SessionPhase> {
    use SessionEvent as E;
    use SessionPhase as P;

    match (phase, event) {
        (P::Compressing, E::CompressionSucceeded) => Some(P::Compressed),
        (P::Compressing, E::CompressionFailed) => Some(P::CompressionFailed),
        (P::Compressing, _) => None,
        (_, E::ImagePicked) => Some(P::ImageSelected),
        (P::ImageSelected | P::Compressed | P::CompressionFailed, E::CompressionStarted) => {
            Some(P::Compressing)
        }
        _ => None,
    }
}

/// The mutable session: current phase plus the image and result slots.
///
/// The result slot is overwritten last-write-wins on each completed call;
/// with a single in-flight compression there is never a stale writer.
#[derive(Debug, Default)]
pub struct Session {
    phase: SessionPhase,
    source: Option<SourceImage>,
    result: Option<CompressedImage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn result(&self) -> Option<&CompressedImage> {
        self.result.as_ref()
    }

    /// Applies `event` through the pure transition function, rejecting
    /// events that are not legal in the current phase.
    pub fn apply(&mut self, event: SessionEvent) -> ShrinkResult<()> {
        match transition(self.phase, event) {
            Some(next) => {
                self.phase = next;
                Ok(())
            }
            None => Err(ShrinkError::validation(format!(
                "{event:?} is not allowed while the session is {:?}",
                self.phase
            ))),
        }
    }

    /// Installs a newly selected image, discarding the previous image and
    /// any compressed result.
    pub fn select_image(&mut self, source: SourceImage) -> ShrinkResult<()> {
        self.apply(SessionEvent::ImagePicked)?;
        self.source = Some(source);
        self.result = None;
        Ok(())
    }

    /// Records a completed compression and stores its result.
    pub fn complete(&mut self, compressed: CompressedImage) -> ShrinkResult<()> {
        self.apply(SessionEvent::CompressionSucceeded)?;
        self.result = Some(compressed);
        Ok(())
    }

    /// Records a failed compression. The result slot is cleared so a stale
    /// success is never offered for download after a failure.
    pub fn fail(&mut self) -> ShrinkResult<()> {
        self.apply(SessionEvent::CompressionFailed)?;
        self.result = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{OutputFormat, SourceFormat};

    fn sample_source() -> SourceImage {
        SourceImage {
            name: "photo.jpg".to_string(),
            format: SourceFormat::Jpeg,
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    fn sample_result() -> CompressedImage {
        CompressedImage {
            bytes: vec![1, 2],
            achieved_size_bytes: 2,
            format: OutputFormat::Jpeg,
        }
    }

    #[test]
    fn happy_path_reaches_compressed() {
        let mut s = Session::new();
        assert_eq!(s.phase(), SessionPhase::NoImage);

        s.select_image(sample_source()).unwrap();
        assert_eq!(s.phase(), SessionPhase::ImageSelected);

        s.apply(SessionEvent::CompressionStarted).unwrap();
        assert_eq!(s.phase(), SessionPhase::Compressing);

        s.complete(sample_result()).unwrap();
        assert_eq!(s.phase(), SessionPhase::Compressed);
        assert!(s.result().is_some());
    }

    #[test]
    fn failure_clears_the_result_slot() {
        let mut s = Session::new();
        s.select_image(sample_source()).unwrap();
        s.apply(SessionEvent::CompressionStarted).unwrap();
        s.complete(sample_result()).unwrap();

        // Re-request with a different size, this time failing.
        s.apply(SessionEvent::CompressionStarted).unwrap();
        s.fail().unwrap();
        assert_eq!(s.phase(), SessionPhase::CompressionFailed);
        assert!(s.result().is_none());
    }

    #[test]
    fn compression_requires_an_image() {
        let mut s = Session::new();
        assert!(s.apply(SessionEvent::CompressionStarted).is_err());
        assert_eq!(s.phase(), SessionPhase::NoImage);
    }

    #[test]
    fn second_compression_rejected_while_in_flight() {
        let mut s = Session::new();
        s.select_image(sample_source()).unwrap();
        s.apply(SessionEvent::CompressionStarted).unwrap();

        assert!(s.apply(SessionEvent::CompressionStarted).is_err());
        assert!(s.select_image(sample_source()).is_err());
        assert_eq!(s.phase(), SessionPhase::Compressing);
    }

    #[test]
    fn new_image_resets_a_settled_session() {
        let mut s = Session::new();
        s.select_image(sample_source()).unwrap();
        s.apply(SessionEvent::CompressionStarted).unwrap();
        s.complete(sample_result()).unwrap();

        s.select_image(sample_source()).unwrap();
        assert_eq!(s.phase(), SessionPhase::ImageSelected);
        assert!(s.result().is_none(), "old result must not survive a new selection");
    }

    #[test]
    fn settled_phases_allow_a_new_request() {
        for settle in [SessionEvent::CompressionSucceeded, SessionEvent::CompressionFailed] {
            let mut s = Session::new();
            s.select_image(sample_source()).unwrap();
            s.apply(SessionEvent::CompressionStarted).unwrap();
            s.apply(settle).unwrap();
            assert!(s.apply(SessionEvent::CompressionStarted).is_ok());
        }
    }

    #[test]
    fn completion_events_require_an_in_flight_compression() {
        let mut s = Session::new();
        s.select_image(sample_source()).unwrap();
        assert!(s.complete(sample_result()).is_err());
        assert!(s.fail().is_err());
    }
}
