//! wxstack node glue: configuration, driver mapping, and the polling
//! service that ties the weatherstack client to the ETo engine.

pub mod config;
pub mod drivers;
pub mod forecast;
pub mod service;

pub use config::{Config, ValidationResult};
pub use drivers::{Driver, DriverValue};
pub use service::{LogSink, PollService, ReportSink, CONTROLLER_ADDRESS, FORECAST_DAYS};

use anyhow::Result;

/// Initialize logging for the node binary.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("wxstack node initialized");
    Ok(())
}
