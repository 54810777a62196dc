//! Process boundary: argument-driven run and failure reporting.

use anyhow::{Context, Result};
use shared_types::TransactionHash;
use tracing::{error, info};

use crate::config::RegistrarArgs;
use crate::errors::RegistrarError;
use crate::orchestrator::{build_client, derive_key_pair, Registrar};

/// Exit status for a failed run.
pub const EXIT_FAILURE: u8 = 1;

/// Derive keys, build the HTTP client and run the registration sequence.
pub async fn run(args: &RegistrarArgs) -> Result<TransactionHash> {
    let key_pair = derive_key_pair(&args.key_material()).context("Invalid key material")?;
    let client = build_client(args.client_config(key_pair))?;

    let hash = Registrar::new(client)
        .run(&args.domain, &args.commit_wait())
        .await
        .with_context(|| format!("Failed to register domain `{}`", args.domain))?;

    info!(tx_hash = %hash, "Done");
    Ok(hash)
}

/// Kind of the registrar error behind `err`.
pub fn failure_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<RegistrarError>()
        .map_or("unknown", RegistrarError::kind)
}

/// Log the outcome and return the process exit status.
pub fn report(outcome: &Result<TransactionHash>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(e) => {
            error!(kind = failure_kind(e), "{e:#}");
            EXIT_FAILURE
        }
    }
}
