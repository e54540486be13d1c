//! Startup configuration.
//!
//! All knobs are supplied once at process start (flags or environment,
//! with `.env` loaded by the binary) and are immutable afterwards.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Runtime configuration for the warm-up engine.
#[derive(Debug, Clone, Parser)]
#[command(name = "warmline", version, about = "Keeps a pool of chat accounts organically active")]
pub struct Config {
    /// Base URL of the messaging backend.
    #[arg(long, env = "WARMLINE_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Admin credential for the account discovery endpoint.
    #[arg(long, env = "WARMLINE_ADMIN_TOKEN")]
    pub admin_token: String,

    /// Minimum fire interval in milliseconds for accounts without a personality.
    #[arg(long, env = "WARMLINE_MIN_INTERVAL_MS", default_value_t = 40_000)]
    pub min_interval_ms: u64,

    /// Maximum fire interval in milliseconds for accounts without a personality.
    #[arg(long, env = "WARMLINE_MAX_INTERVAL_MS", default_value_t = 250_000)]
    pub max_interval_ms: u64,

    /// Directory holding payload files, one JSON array of base64 strings per media kind.
    #[arg(long, env = "WARMLINE_MEDIA_DIR", default_value = "./media")]
    pub media_dir: PathBuf,

    /// Directory the message journal is written to.
    #[arg(long, env = "WARMLINE_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Case-insensitive name prefix an account must carry to participate.
    #[arg(long, env = "WARMLINE_ACCOUNT_PREFIX", default_value = "warm")]
    pub account_prefix: String,

    /// Seconds between reconciliation passes over the live account set.
    #[arg(long, env = "WARMLINE_RECONCILE_SECS", default_value_t = 300)]
    pub reconcile_secs: u64,
}

impl Config {
    /// Global fallback lower bound for fire intervals.
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Global fallback upper bound for fire intervals.
    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    /// Period of the reconciliation loop.
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_secs)
    }
}
