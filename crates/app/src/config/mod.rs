//! Application configuration

use clap::Args;

pub mod market;
pub mod observability;

pub use market::MarketConfig;
pub use observability::{LogFormat, LoggingConfig};

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Catalog, storage and submission settings.
    #[command(flatten)]
    pub market: MarketConfig,
}
