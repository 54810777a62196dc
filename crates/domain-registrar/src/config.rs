//! # Registrar Configuration
//!
//! Command-line flags with environment fallbacks. Defaults reproduce the
//! stock single-peer test network: account `alice@wonderland`, Torii on
//! ports 8080 and 8081, domain `looking_glass`, 200 ms commit wait.

use clap::Parser;
use ledger_client::{ClientConfig, CommitWait, ToriiConfig, Url};
use shared_crypto::{KeyMaterial, KeyPair};
use shared_types::AccountId;
use std::time::Duration;

/// Default Torii API endpoint.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Default Torii telemetry endpoint.
pub const DEFAULT_TELEMETRY_URL: &str = "http://127.0.0.1:8081";

/// Default signing account.
pub const DEFAULT_ACCOUNT: &str = "alice@wonderland";

/// Public key of the default account, as a hex multihash.
pub const DEFAULT_PUBLIC_KEY: &str =
    "ed01207233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";

/// Private key of the default account (`seed || public`), hex.
pub const DEFAULT_PRIVATE_KEY: &str = "9ac47abf59b356e0bd7dcbbbb4dec080e302156a48ca907e47cb6aea1d32719e7233bfc89dcbd68c19fde6ce6158225298ec1131b6a130d1aeb454c1ab5183c0";

/// Default private key algorithm.
pub const DEFAULT_PRIVATE_KEY_DIGEST: &str = "ed25519";

/// Default domain to register.
pub const DEFAULT_DOMAIN: &str = "looking_glass";

/// Default commit wait in milliseconds.
pub const DEFAULT_COMMIT_WAIT_MS: u64 = 200;

/// Backoff multiplier used in polling mode.
pub const POLL_BACKOFF_FACTOR: u32 = 2;

/// Register a domain and confirm it was committed.
#[derive(Parser, Debug, Clone)]
#[command(name = "domain-registrar")]
#[command(about = "Register a domain on a Torii ledger node and verify it")]
pub struct RegistrarArgs {
    /// Torii API URL
    #[arg(long, env = "LG_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Torii telemetry URL
    #[arg(long, env = "LG_TELEMETRY_URL", default_value = DEFAULT_TELEMETRY_URL)]
    pub telemetry_url: Url,

    /// Signing account, `name@domain`
    #[arg(long, env = "LG_ACCOUNT", default_value = DEFAULT_ACCOUNT)]
    pub account: AccountId,

    /// Account public key as a hex multihash
    #[arg(long, env = "LG_PUBLIC_KEY", default_value = DEFAULT_PUBLIC_KEY)]
    pub public_key: String,

    /// Account private key, hex
    #[arg(
        long,
        env = "LG_PRIVATE_KEY",
        default_value = DEFAULT_PRIVATE_KEY,
        hide_default_value = true,
        hide_env_values = true
    )]
    pub private_key: String,

    /// Private key algorithm (ed25519, secp256k1, bls_normal, bls_small)
    #[arg(long, env = "LG_PRIVATE_KEY_DIGEST", default_value = DEFAULT_PRIVATE_KEY_DIGEST)]
    pub private_key_digest: String,

    /// Domain to register
    #[arg(long, env = "LG_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Wait before checking, in milliseconds. In polling mode, the first interval.
    #[arg(long, env = "LG_COMMIT_WAIT_MS", default_value_t = DEFAULT_COMMIT_WAIT_MS)]
    pub commit_wait_ms: u64,

    /// Poll for the domain instead of checking once
    #[arg(
        long,
        env = "LG_POLL",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub poll: bool,

    /// Number of checks in polling mode
    #[arg(long, env = "LG_POLL_ATTEMPTS", default_value_t = 10)]
    pub poll_attempts: u32,
}

impl RegistrarArgs {
    /// Key material from the key flags.
    pub fn key_material(&self) -> KeyMaterial {
        KeyMaterial::new(
            self.public_key.as_str(),
            self.private_key_digest.as_str(),
            self.private_key.as_str(),
        )
    }

    /// Client configuration for the derived key pair.
    pub fn client_config(&self, key_pair: KeyPair) -> ClientConfig {
        let torii = ToriiConfig::new(self.api_url.clone(), self.telemetry_url.clone());
        ClientConfig::new(torii, self.account.clone(), key_pair)
    }

    /// Commit wait policy.
    pub fn commit_wait(&self) -> CommitWait {
        let interval = Duration::from_millis(self.commit_wait_ms);
        if self.poll {
            CommitWait::Poll {
                interval,
                max_attempts: self.poll_attempts,
                backoff_factor: POLL_BACKOFF_FACTOR,
            }
        } else {
            CommitWait::Fixed(interval)
        }
    }
}
