//! # Register Error Type
//!
//! Unified error for register operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bolt POS                               │
//! │                                                                         │
//! │  CoreError (cart rules)  ┐                                              │
//! │  ApiError  (server)      ├──► RegisterError ──► transient notification  │
//! │  ScanError (input)       ┘                      (severity: Error)       │
//! │                                                                         │
//! │  Nothing is fatal: the cashier re-triggers the action. Transaction      │
//! │  failures leave the cart untouched so a retry needs no re-scanning.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every source error already carries cashier-facing wording, so the
//! notification text is just the `Display` form.

use thiserror::Error;

use bolt_api::ApiError;
use bolt_core::CoreError;
use bolt_scan::ScanError;

/// Anything a register operation can fail with.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Terminal input failed; the only error that ends the session.
    #[error("Terminal input failed: {0}")]
    Io(#[from] std::io::Error),
}

impl RegisterError {
    /// The message shown in the notification for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through_transparently() {
        let err: RegisterError = CoreError::EmptyCart.into();
        assert_eq!(err.user_message(), "Cart is empty");

        let err: RegisterError = ScanError::EmptyInput.into();
        assert_eq!(err.user_message(), "Please enter a barcode");
    }
}
