//! # Camera & Decoder Capabilities
//!
//! Capability traits for the two external collaborators of the camera scan
//! path: the video capture device and the third-party barcode decoder.
//!
//! Real hardware bindings live outside this workspace; the decode loop in
//! [`crate::scanner`] only ever talks to these traits, and tests drive it
//! with fakes. This mirrors the external contract:
//!
//! - `acquireVideoStream(facing: "environment") → stream | fails`
//! - `decodeFromImageSurface(surface) → text | miss`

use async_trait::async_trait;

use crate::error::ScanResult;

// =============================================================================
// Facing
// =============================================================================

/// Which way the requested camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Rear camera, pointed at the merchandise. The register always asks
    /// for this one.
    Environment,
    /// Front camera.
    User,
}

// =============================================================================
// Frame
// =============================================================================

/// One captured video frame handed to the decoder.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Raw pixel data; layout is an agreement between device and decoder.
    pub data: Vec<u8>,
}

// =============================================================================
// Capability Traits
// =============================================================================

/// A camera that can hand out capture streams.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquires a capture stream, or fails with `CameraUnavailable` when
    /// permission is denied or no device exists.
    async fn acquire(&self, facing: Facing) -> ScanResult<Box<dyn CameraStream>>;
}

/// A live capture stream.
///
/// ## Release Contract
/// `stop` must halt every media track; after it returns, `active_tracks`
/// reports zero. It is idempotent. The decode loop calls it on every exit
/// path, which is what guarantees the stream is never leaked by a mode
/// switch.
#[async_trait]
pub trait CameraStream: Send {
    /// Waits for and returns the next frame. Fails with `StreamClosed`
    /// after `stop`.
    async fn next_frame(&mut self) -> ScanResult<Frame>;

    /// Stops all media tracks. Idempotent.
    fn stop(&mut self);

    /// Number of still-active media tracks (0 after `stop`).
    fn active_tracks(&self) -> usize;
}

/// The third-party barcode decoder.
///
/// A miss is an `Option::None`, not an error: most frames simply contain no
/// barcode and the loop reschedules immediately.
pub trait BarcodeDecoder: Send + Sync {
    fn decode(&self, frame: &Frame) -> Option<String>;
}
