//! # Bolt POS Register
//!
//! Terminal register for the Bolt POS server.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Register Terminal                               │
//! │                                                                         │
//! │  stdin ──► REPL commands ──┐                                            │
//! │                            ├──► Register ──► HTTP ──► POS server        │
//! │  camera ──► decoded codes ─┘       │                                    │
//! │                                    ▼                                    │
//! │                            CartView ──► terminal                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One `tokio::select!` loop multiplexes typed commands with camera-decoded
//! barcodes; both funnel into the same [`register::Register`] pipeline.

mod error;
mod notify;
mod register;
mod repl;
mod state;
mod view;

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bolt_api::{ApiClient, ClientConfig};
use bolt_scan::{
    BarcodeDecoder, CameraDevice, CameraStream, Facing, Frame, ScanError, ScanMode, ScanResult,
    ScanSession,
};

use crate::error::RegisterError;
use crate::notify::{Notifier, Severity, TerminalNotifier};
use crate::register::Register;
use crate::repl::{parse_command, Command, HELP};
use crate::view::print_cart;

// =============================================================================
// Configuration
// =============================================================================

/// Terminal register for the Bolt POS server.
#[derive(Debug, Parser)]
#[command(name = "bolt-register", version, about)]
struct Args {
    /// Base URL of the POS server
    #[arg(long, env = "BOLT_SERVER_URL", default_value = "http://localhost:5000")]
    server_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "BOLT_REQUEST_TIMEOUT", default_value_t = 10)]
    timeout_secs: u64,
}

// =============================================================================
// Camera Stubs
// =============================================================================

/// A terminal has no camera; selecting the camera tab reports it cleanly
/// and the session stays usable for manual entry.
struct NoCameraDevice;

#[async_trait]
impl CameraDevice for NoCameraDevice {
    async fn acquire(&self, _facing: Facing) -> ScanResult<Box<dyn CameraStream>> {
        Err(ScanError::CameraUnavailable {
            reason: "no camera attached to this terminal".into(),
        })
    }
}

/// Paired with [`NoCameraDevice`]; never runs.
struct NullDecoder;

impl BarcodeDecoder for NullDecoder {
    fn decode(&self, _frame: &Frame) -> Option<String> {
        None
    }
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), RegisterError> {
    info!(server_url = %args.server_url, "starting register");

    let api = ApiClient::new(ClientConfig {
        base_url: args.server_url,
        timeout: Duration::from_secs(args.timeout_secs),
    })?;
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let register = Register::new(api, notifier.clone());

    let mut session = ScanSession::new(Arc::new(NoCameraDevice), Arc::new(NullDecoder));
    let mut barcodes: Option<mpsc::Receiver<String>> = None;

    println!("Bolt POS register. Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        let quit = dispatch(
                            command,
                            &register,
                            &notifier,
                            &mut session,
                            &mut barcodes,
                            &mut lines,
                        )
                        .await?;
                        if quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => notifier.notify(&e.to_string(), Severity::Error),
                }
                prompt()?;
            }
            decoded = next_barcode(&mut barcodes) => {
                match decoded {
                    Some(barcode) => {
                        let view = register.handle_decoded(&barcode).await;
                        print_cart(&view);
                        prompt()?;
                    }
                    None => {
                        // Decode loop ended on its own (stream error)
                        barcodes = None;
                        session.select_manual().await;
                        notifier.notify("Camera stopped; back to manual entry", Severity::Info);
                        prompt()?;
                    }
                }
            }
        }
    }

    // Exiting must never leak a live camera stream
    session.stop_camera().await;
    info!("register stopped");
    Ok(())
}

/// Waits on the decoded-barcode channel, or forever when the camera
/// mode is off.
async fn next_barcode(barcodes: &mut Option<mpsc::Receiver<String>>) -> Option<String> {
    match barcodes {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn dispatch(
    command: Command,
    register: &Register,
    notifier: &Arc<dyn Notifier>,
    session: &mut ScanSession,
    barcodes: &mut Option<mpsc::Receiver<String>>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, RegisterError> {
    match command {
        Command::Scan(barcode) => print_cart(&register.scan_entry(&barcode).await),
        Command::Increase(id) => print_cart(&register.increase(id)),
        Command::Decrease(id) => print_cart(&register.decrease(id)),
        Command::Remove(id) => print_cart(&register.remove(id)),
        Command::Clear => {
            if confirm("Clear the cart? [y/N] ", lines).await? {
                print_cart(&register.clear());
            } else {
                notifier.notify("Cart unchanged", Severity::Info);
            }
        }
        Command::ShowCart => print_cart(&register.view()),
        Command::Name(name) => {
            register.set_customer_name(&name);
            if name.trim().is_empty() {
                notifier.notify("Customer name cleared", Severity::Info);
            } else {
                notifier.notify(&format!("Customer: {}", name.trim()), Severity::Info);
            }
        }
        Command::Pay(method) => print_cart(&register.complete_billing(method).await),
        Command::Tab(ScanMode::Manual) => {
            *barcodes = None;
            session.select_manual().await;
            notifier.notify("Manual entry active", Severity::Info);
        }
        Command::Tab(ScanMode::Camera) => match session.select_camera().await {
            Ok(rx) => {
                *barcodes = Some(rx);
                notifier.notify("Camera scanning active", Severity::Info);
            }
            Err(e) => notifier.notify(&RegisterError::from(e).user_message(), Severity::Error),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(true),
    }
    Ok(false)
}

async fn confirm(
    question: &str,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, RegisterError> {
    print!("{question}");
    std::io::stdout().flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn prompt() -> Result<(), RegisterError> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
