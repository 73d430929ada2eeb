//! Market Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Catalog, storage and submission settings.
#[derive(Debug, Args)]
pub struct MarketConfig {
    /// Directory holding saved preferences
    #[arg(long, global = true, env = "NAB_MARKET_DATA_DIR", default_value = ".nab-market")]
    pub data_dir: PathBuf,

    /// Product catalog YAML file; the bundled catalog is used when omitted
    #[arg(long, global = true, env = "NAB_MARKET_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Simulated submission latency in milliseconds
    #[arg(
        long,
        global = true,
        env = "NAB_MARKET_SUBMIT_DELAY_MS",
        default_value_t = 2_000_u64
    )]
    pub submit_delay_ms: u64,

    /// Give up on a submission after this many milliseconds
    #[arg(
        long,
        global = true,
        env = "NAB_MARKET_SUBMIT_TIMEOUT_MS",
        default_value_t = 10_000_u64
    )]
    pub submit_timeout_ms: u64,
}

impl MarketConfig {
    /// Simulated submission latency
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Submission timeout
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }
}
