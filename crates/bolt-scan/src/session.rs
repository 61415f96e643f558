//! # Scan Session
//!
//! The input-mode selector. Exactly one of the two input modes is active at
//! a time, and the camera stream is exclusively owned by this session for
//! its lifetime.
//!
//! ## Mode Switching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Input Mode Switching                                 │
//! │                                                                         │
//! │            select_camera()                                              │
//! │   ┌────────┐ ──────────────► ┌────────┐                                 │
//! │   │ Manual │                 │ Camera │ (decode loop running)           │
//! │   └────────┘ ◄────────────── └────────┘                                 │
//! │            select_manual()                                              │
//! │                  │                                                      │
//! │                  └── ALWAYS stops the scanner first: leaving camera     │
//! │                      mode can never leak a live media track             │
//! │                                                                         │
//! │  select_camera() also stops any previous scanner before acquiring:      │
//! │  the stream must be released before re-acquisition                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::camera::{BarcodeDecoder, CameraDevice};
use crate::error::ScanResult;
use crate::scanner::{CameraScanner, ScannerHandle};

// =============================================================================
// Scan Mode
// =============================================================================

/// The currently selected input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Typed barcode entry.
    Manual,
    /// Camera decode loop.
    Camera,
}

// =============================================================================
// Scan Session
// =============================================================================

/// Owns the input mode and the camera scanner's lifetime.
///
/// Starts in `Manual`. Dropping the session drops the scanner handle, which
/// also terminates the decode loop and releases the stream.
pub struct ScanSession {
    device: Arc<dyn CameraDevice>,
    decoder: Arc<dyn BarcodeDecoder>,
    mode: ScanMode,
    scanner: Option<ScannerHandle>,
}

impl ScanSession {
    /// Creates a session in manual mode.
    pub fn new(device: Arc<dyn CameraDevice>, decoder: Arc<dyn BarcodeDecoder>) -> Self {
        ScanSession {
            device,
            decoder,
            mode: ScanMode::Manual,
            scanner: None,
        }
    }

    /// Returns the current input mode.
    #[inline]
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Switches to manual entry, stopping the camera scanner if one runs.
    pub async fn select_manual(&mut self) {
        self.stop_camera().await;
        if self.mode != ScanMode::Manual {
            debug!("input mode: manual");
            self.mode = ScanMode::Manual;
        }
    }

    /// Switches to the camera mode and starts the decode loop.
    ///
    /// Returns the channel of decoded barcodes. On `CameraUnavailable` the
    /// session stays in manual mode, still usable for typed entry.
    pub async fn select_camera(&mut self) -> ScanResult<mpsc::Receiver<String>> {
        // Release before re-acquisition
        self.stop_camera().await;

        let (handle, barcodes) =
            CameraScanner::start(self.device.clone(), self.decoder.clone()).await?;

        info!("input mode: camera");
        self.scanner = Some(handle);
        self.mode = ScanMode::Camera;
        Ok(barcodes)
    }

    /// Stops the camera scanner, waiting until the stream is released.
    /// No-op when no scanner runs.
    pub async fn stop_camera(&mut self) {
        if let Some(handle) = self.scanner.take() {
            handle.stop().await;
            info!("camera scanner stopped");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraStream, Facing, Frame};
    use crate::error::ScanError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingStream {
        tracks: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl CameraStream for CountingStream {
        async fn next_frame(&mut self) -> ScanResult<Frame> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(Frame {
                width: 640,
                height: 480,
                data: Vec::new(),
            })
        }

        fn stop(&mut self) {
            self.tracks.store(0, Ordering::SeqCst);
        }

        fn active_tracks(&self) -> usize {
            self.tracks.load(Ordering::SeqCst)
        }
    }

    struct CountingDevice {
        tracks: Arc<AtomicUsize>,
        available: bool,
    }

    #[async_trait::async_trait]
    impl CameraDevice for CountingDevice {
        async fn acquire(&self, _facing: Facing) -> ScanResult<Box<dyn CameraStream>> {
            if !self.available {
                return Err(ScanError::CameraUnavailable {
                    reason: "no device".into(),
                });
            }
            self.tracks.store(1, Ordering::SeqCst);
            Ok(Box::new(CountingStream {
                tracks: self.tracks.clone(),
            }))
        }
    }

    /// Never sees a barcode; the session tests only care about lifetimes.
    struct MissDecoder;

    impl BarcodeDecoder for MissDecoder {
        fn decode(&self, _frame: &Frame) -> Option<String> {
            None
        }
    }

    fn session(available: bool) -> (ScanSession, Arc<AtomicUsize>) {
        let tracks = Arc::new(AtomicUsize::new(0));
        let device = Arc::new(CountingDevice {
            tracks: tracks.clone(),
            available,
        });
        (ScanSession::new(device, Arc::new(MissDecoder)), tracks)
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_starts_in_manual_mode() {
        let (session, tracks) = session(true);
        assert_eq!(session.mode(), ScanMode::Manual);
        assert_eq!(tracks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_away_from_camera_releases_tracks() {
        let (mut session, tracks) = session(true);

        let _barcodes = session.select_camera().await.unwrap();
        assert_eq!(session.mode(), ScanMode::Camera);
        assert_eq!(tracks.load(Ordering::SeqCst), 1);

        session.select_manual().await;
        assert_eq!(session.mode(), ScanMode::Manual);
        assert_eq!(tracks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselecting_camera_releases_previous_stream_first() {
        let (mut session, tracks) = session(true);

        let _first = session.select_camera().await.unwrap();
        let _second = session.select_camera().await.unwrap();

        // One live stream at most, never two
        assert_eq!(tracks.load(Ordering::SeqCst), 1);

        session.stop_camera().await;
        assert_eq!(tracks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_camera_keeps_manual_mode() {
        let (mut session, tracks) = session(false);

        let err = session.select_camera().await.unwrap_err();
        assert!(matches!(err, ScanError::CameraUnavailable { .. }));
        assert_eq!(session.mode(), ScanMode::Manual);
        assert_eq!(tracks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_camera_is_idempotent() {
        let (mut session, tracks) = session(true);

        let _barcodes = session.select_camera().await.unwrap();
        session.stop_camera().await;
        session.stop_camera().await;
        assert_eq!(tracks.load(Ordering::SeqCst), 0);
    }
}
