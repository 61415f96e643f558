//! # Camera Scanner
//!
//! The continuous decode loop behind the camera input mode.
//!
//! ## Decode Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Camera Decode Loop                                  │
//! │                                                                         │
//! │  start() ── acquire stream (environment camera)                         │
//! │                │          │                                             │
//! │                │          └── failure ──► ScanError::CameraUnavailable  │
//! │                ▼                                                        │
//! │     ┌─► next_frame()                                                    │
//! │     │        │                                                          │
//! │     │        ▼                                                          │
//! │     │   decoder.decode(frame)                                           │
//! │     │        │                                                          │
//! │     │   miss │ hit                                                      │
//! │     │        │   └──► emit barcode on channel                           │
//! │     │        │             │                                            │
//! │     │        │        sleep 1s (cooldown: the same physical barcode     │
//! │     │        │             │    must not re-add on consecutive frames)  │
//! │     └────────┴─────────────┘                                            │
//! │                                                                         │
//! │  The loop is ONE task that reschedules itself only after the current    │
//! │  attempt settles: at most one decode attempt is ever in flight.         │
//! │                                                                         │
//! │  EVERY exit (stop signal, handle dropped, receiver dropped, stream      │
//! │  closed) runs stream.stop() before the task ends - zero media tracks    │
//! │  remain active afterwards.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::camera::{BarcodeDecoder, CameraDevice, CameraStream, Facing};
use crate::error::ScanResult;

// =============================================================================
// Constants
// =============================================================================

/// Pause after a successful decode before the next attempt.
///
/// A barcode held up to the camera is visible on many consecutive frames;
/// without this the same physical code would be added once per frame.
pub const SCAN_COOLDOWN: Duration = Duration::from_secs(1);

/// Buffered decoded barcodes not yet consumed by the register.
const DECODED_CHANNEL_CAPACITY: usize = 8;

// =============================================================================
// Scanner Handle
// =============================================================================

/// Handle for a running camera scanner.
///
/// `stop` shuts the loop down and waits for the stream release to finish.
/// Dropping the handle without calling `stop` also terminates the loop
/// (the shutdown channel closes), just without waiting for it.
#[derive(Debug)]
pub struct ScannerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl ScannerHandle {
    /// Signals the decode loop to stop and waits until the stream has been
    /// released.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(()).await;
        let _ = self.task.await;
    }
}

// =============================================================================
// Camera Scanner
// =============================================================================

/// Spawns and owns the camera decode loop.
///
/// ## Usage
/// ```rust,ignore
/// let (handle, mut barcodes) = CameraScanner::start(device, decoder).await?;
///
/// while let Some(barcode) = barcodes.recv().await {
///     // look up the product and feed the cart
/// }
///
/// handle.stop().await; // zero active tracks afterwards
/// ```
pub struct CameraScanner;

impl CameraScanner {
    /// Acquires the environment-facing camera and spawns the decode loop.
    ///
    /// Acquisition happens here, not in the task, so a denied permission or
    /// missing device surfaces immediately as `CameraUnavailable`.
    pub async fn start(
        device: Arc<dyn CameraDevice>,
        decoder: Arc<dyn BarcodeDecoder>,
    ) -> ScanResult<(ScannerHandle, mpsc::Receiver<String>)> {
        let stream = device.acquire(Facing::Environment).await?;
        info!("camera stream acquired, starting decode loop");

        let (decoded_tx, decoded_rx) = mpsc::channel(DECODED_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(Self::decode_loop(stream, decoder, decoded_tx, shutdown_rx));

        Ok((ScannerHandle { shutdown_tx, task }, decoded_rx))
    }

    /// The decode loop task. One attempt in flight at a time; the next
    /// attempt is scheduled only after the current one settles.
    async fn decode_loop(
        mut stream: Box<dyn CameraStream>,
        decoder: Arc<dyn BarcodeDecoder>,
        decoded_tx: mpsc::Sender<String>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        loop {
            let frame = tokio::select! {
                // recv() yields None when the handle was dropped; both the
                // explicit signal and the drop stop the loop
                _ = shutdown_rx.recv() => break,
                frame = stream.next_frame() => frame,
            };

            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(error = %e, "camera stream ended");
                    break;
                }
            };

            let Some(barcode) = decoder.decode(&frame) else {
                // No barcode in this frame: reschedule immediately
                continue;
            };

            debug!(barcode = %barcode, "barcode decoded from frame");
            if decoded_tx.send(barcode).await.is_err() {
                // Register side went away; no one left to scan for
                break;
            }

            // Cooldown before the next attempt, still responsive to stop
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = tokio::time::sleep(SCAN_COOLDOWN) => {}
            }
        }

        // Sole exit point of the task: the stream is always released
        stream.stop();
        debug_assert_eq!(stream.active_tracks(), 0);
        info!("camera decode loop stopped, stream released");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
