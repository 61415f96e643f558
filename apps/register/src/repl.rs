//! # Command Parser
//!
//! Line-based cashier commands. Parsing is separate from dispatch so it
//! stays a pure function; the terminal loop in `main` owns the I/O.
//!
//! ## Command Set
//! ```text
//! scan <barcode>        look up a barcode and add the product
//! + <id>                increase a line's quantity
//! - <id>                decrease a line's quantity
//! rm <id>               remove a line
//! clear                 empty the cart (asks for confirmation)
//! cart                  reprint the cart
//! name <customer>       set the customer name for the next transaction
//! pay <cash|card|upi>   complete the transaction
//! tab <manual|camera>   switch the scan input mode
//! help                  show this list
//! quit                  exit
//! ```

use std::str::FromStr;

use thiserror::Error;

use bolt_core::PaymentMethod;
use bolt_scan::ScanMode;

// =============================================================================
// Commands
// =============================================================================

/// One parsed cashier command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    Increase(i64),
    Decrease(i64),
    Remove(i64),
    Clear,
    ShowCart,
    Name(String),
    Pay(PaymentMethod),
    Tab(ScanMode),
    Help,
    Quit,
}

/// Why a line failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command '{0}'. Type 'help' for the command list")]
    UnknownCommand(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("'{0}' is not a product id")]
    InvalidProductId(String),

    #[error("'{0}' is not a payment method (cash, card, upi)")]
    UnknownPaymentMethod(String),

    #[error("'{0}' is not an input mode (manual, camera)")]
    UnknownTab(String),
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "scan" => Command::Scan(require(rest, "scan", "a barcode")?.to_string()),
        "+" => Command::Increase(product_id(require(rest, "+", "a product id")?)?),
        "-" => Command::Decrease(product_id(require(rest, "-", "a product id")?)?),
        "rm" => Command::Remove(product_id(require(rest, "rm", "a product id")?)?),
        "clear" => Command::Clear,
        "cart" => Command::ShowCart,
        "name" => Command::Name(rest.to_string()),
        "pay" => {
            let raw = require(rest, "pay", "a payment method")?;
            Command::Pay(
                PaymentMethod::from_str(raw)
                    .map_err(|_| ParseError::UnknownPaymentMethod(raw.to_string()))?,
            )
        }
        "tab" => match require(rest, "tab", "an input mode")? {
            "manual" => Command::Tab(ScanMode::Manual),
            "camera" => Command::Tab(ScanMode::Camera),
            other => return Err(ParseError::UnknownTab(other.to_string())),
        },
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn require<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}

fn product_id(raw: &str) -> Result<i64, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::InvalidProductId(raw.to_string()))
}

/// The text printed for `help`.
pub const HELP: &str = "\
Commands:
  scan <barcode>        look up a barcode and add the product
  + <id>                increase a line's quantity
  - <id>                decrease a line's quantity
  rm <id>               remove a line
  clear                 empty the cart (asks for confirmation)
  cart                  reprint the cart
  name <customer>       set the customer name for the next transaction
  pay <cash|card|upi>   complete the transaction
  tab <manual|camera>   switch the scan input mode
  help                  show this list
  quit                  exit";

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan_and_quantity_commands() {
        assert_eq!(
            parse_command("scan 8901030865278"),
            Ok(Some(Command::Scan("8901030865278".into())))
        );
        assert_eq!(parse_command("+ 3"), Ok(Some(Command::Increase(3))));
        assert_eq!(parse_command("- 3"), Ok(Some(Command::Decrease(3))));
        assert_eq!(parse_command("rm 3"), Ok(Some(Command::Remove(3))));
    }

    #[test]
    fn test_parse_checkout_commands() {
        assert_eq!(
            parse_command("pay upi"),
            Ok(Some(Command::Pay(PaymentMethod::Upi)))
        );
        assert_eq!(
            parse_command("name Asha Verma"),
            Ok(Some(Command::Name("Asha Verma".into())))
        );
        // Clearing the name again is valid
        assert_eq!(parse_command("name"), Ok(Some(Command::Name(String::new()))));
    }

    #[test]
    fn test_parse_tab_commands() {
        assert_eq!(
            parse_command("tab camera"),
            Ok(Some(Command::Tab(ScanMode::Camera)))
        );
        assert_eq!(
            parse_command("tab manual"),
            Ok(Some(Command::Tab(ScanMode::Manual)))
        );
    }

    #[test]
    fn test_blank_line_is_no_command() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("jump"),
            Err(ParseError::UnknownCommand("jump".into()))
        );
        assert_eq!(
            parse_command("+"),
            Err(ParseError::MissingArgument {
                command: "+",
                what: "a product id"
            })
        );
        assert_eq!(
            parse_command("+ soap"),
            Err(ParseError::InvalidProductId("soap".into()))
        );
        assert_eq!(
            parse_command("pay cheque"),
            Err(ParseError::UnknownPaymentMethod("cheque".into()))
        );
        assert_eq!(
            parse_command("tab webcam"),
            Err(ParseError::UnknownTab("webcam".into()))
        );
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(
            parse_command("  scan   8901030  "),
            Ok(Some(Command::Scan("8901030".into())))
        );
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }
}
