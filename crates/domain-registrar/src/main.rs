//! Domain Registrar
//!
//! Registers a domain on a Torii node and exits non-zero if it cannot be
//! confirmed.

use std::process::ExitCode;

use clap::Parser;

use domain_registrar::{report, run, RegistrarArgs};
use ledger_telemetry::{init_logging, TelemetryConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let args = RegistrarArgs::parse();

    if let Err(e) = init_logging(&TelemetryConfig::from_env()) {
        eprintln!("Warning: {e}");
    }

    ExitCode::from(report(&run(&args).await))
}
