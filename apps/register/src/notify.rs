//! # Notifications & Celebration
//!
//! Transient, auto-dismissing feedback for the cashier. No state, no queue:
//! concurrent notifications are independent of each other.
//!
//! The capability is a trait so orchestration code and tests never touch the
//! terminal directly; tests record, the binary prints.

use std::time::Duration;

/// How long a notification stays visible in UIs that can dismiss.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

/// How long the checkout celebration stays visible.
pub const CELEBRATION_LIFETIME: Duration = Duration::from_secs(2);

// =============================================================================
// Severity
// =============================================================================

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Action completed (product added, transaction done).
    Success,
    /// Neutral progress ("Processing payment...").
    Info,
    /// Recovered failure; the register stays usable.
    Error,
}

// =============================================================================
// Notifier Capability
// =============================================================================

/// Sink for transient cashier feedback.
pub trait Notifier: Send + Sync {
    /// Shows a transient message. Lifetime is [`NOTIFICATION_LIFETIME`]
    /// where the UI supports dismissal.
    fn notify(&self, message: &str, severity: Severity);

    /// Shows the transient checkout celebration
    /// ([`CELEBRATION_LIFETIME`]).
    fn celebrate(&self);
}

// =============================================================================
// Terminal Implementation
// =============================================================================

/// Prints notifications to the terminal.
///
/// A scrolling terminal has no dismissal, so lifetimes do not apply here;
/// the severity becomes a leading glyph instead of a color band.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let glyph = match severity {
            Severity::Success => "✓",
            Severity::Info => "·",
            Severity::Error => "✗",
        };
        println!("{glyph} {message}");
    }

    fn celebrate(&self) {
        println!("🎉 Transaction complete!");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
