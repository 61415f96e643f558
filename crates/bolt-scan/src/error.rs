//! # Scan Errors
//!
//! Failure modes for barcode input. All are recovered locally: the register
//! shows a notification and the adapter stays usable for the next scan.

use thiserror::Error;

// =============================================================================
// Scan Error
// =============================================================================

/// Errors from the scan input adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// Manual entry committed with nothing but whitespace.
    #[error("Please enter a barcode")]
    EmptyInput,

    /// Camera permission denied, no device present, or acquisition failed.
    #[error("Camera access denied or not available: {reason}")]
    CameraUnavailable { reason: String },

    /// The camera stream ended while the decode loop was running.
    #[error("Camera stream closed")]
    StreamClosed,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ScanError.
pub type ScanResult<T> = Result<T, ScanError>;
