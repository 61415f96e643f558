//! # bolt-api: Register Server API Client
//!
//! Thin typed client for the two register server endpoints: barcode-to-product
//! lookup and transaction completion. Both scan input paths (manual entry and
//! camera decode) converge on [`ApiClient::lookup_product`]; checkout goes
//! through [`ApiClient::complete_transaction`].
//!
//! The client never retries on its own. Every failure maps to a typed
//! [`ApiError`] the register turns into a transient notification; the cashier
//! re-triggers the action.

pub mod client;
pub mod error;

pub use client::{ApiClient, ClientConfig, TransactionReceipt};
pub use error::{ApiError, ApiResult};
