//! # bolt-scan: Scan Input Adapter for Bolt POS
//!
//! Two interchangeable barcode input sources feed the register:
//!
//! - **Manual**: the cashier types a barcode and commits it
//!   ([`manual::parse_manual_entry`]).
//! - **Camera**: a spawned decode loop grabs frames from a
//!   [`camera::CameraDevice`] capability, runs them through a
//!   [`camera::BarcodeDecoder`], and emits hits on a channel with a fixed
//!   1-second cooldown between hits ([`scanner::CameraScanner`]).
//!
//! [`session::ScanSession`] owns the mode selector; switching away from the
//! camera mode always stops the decode loop and releases the stream.
//!
//! Both modes converge on a plain barcode string. Resolving it to a product
//! and feeding the cart happen upstream in the register.

pub mod camera;
pub mod error;
pub mod manual;
pub mod scanner;
pub mod session;

pub use camera::{BarcodeDecoder, CameraDevice, CameraStream, Facing, Frame};
pub use error::{ScanError, ScanResult};
pub use manual::parse_manual_entry;
pub use scanner::{CameraScanner, ScannerHandle, SCAN_COOLDOWN};
pub use session::{ScanMode, ScanSession};
