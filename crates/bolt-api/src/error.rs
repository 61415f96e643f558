//! # API Client Errors
//!
//! Failure modes for the register server calls.
//!
//! ## Design Principles
//! - `NotFound` and `Application` are well-formed server answers; `Transport`
//!   means the request never completed. The register treats all three as
//!   non-fatal, but the wording shown to the cashier differs.
//! - No variant triggers an automatic retry; transaction failures must leave
//!   the cart untouched so the cashier can retry by hand.

use thiserror::Error;

// =============================================================================
// Api Error
// =============================================================================

/// Errors from the register server API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered the lookup, but no product matches the barcode.
    #[error("No product found for barcode {barcode}")]
    NotFound { barcode: String },

    /// Well-formed but unsuccessful server response (non-200 with an error
    /// body, or a transaction outcome with `success: false`).
    #[error("Server rejected the request: {message}")]
    Application { message: String },

    /// The request did not complete: connection refused, timeout, TLS, etc.
    #[error("Could not reach the register server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 200 with a body that does not match the contract.
    #[error("Malformed response from the register server: {0}")]
    Decode(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApiError::NotFound {
            barcode: "8901030".into(),
        };
        assert_eq!(err.to_string(), "No product found for barcode 8901030");

        let err = ApiError::Application {
            message: "Transaction failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "Server rejected the request: Transaction failed"
        );
    }
}
