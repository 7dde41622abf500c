//! Polling service: fetches current conditions on the short poll and
//! the daily forecast on the long poll, maps both onto driver values,
//! and hands them to a report sink.

use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use wxstack_client::{Condition, WeatherClient};
use wxstack_eto::SiteParameters;

use crate::config::Config;
use crate::drivers::{current_drivers, DriverValue};
use crate::forecast::forecast_drivers;

/// Node address of the controller (current conditions) node.
pub const CONTROLLER_ADDRESS: &str = "weatherstack";

/// Number of daily forecast nodes, `forecast_1` through `forecast_6`.
pub const FORECAST_DAYS: usize = 6;

/// Where driver updates go. The host framework supplies the real
/// implementation; [`LogSink`] is the standalone fallback.
pub trait ReportSink: Send + Sync {
    fn report(&self, node_address: &str, values: &[DriverValue]);
}

/// Sink that writes every driver update to the log.
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&self, node_address: &str, values: &[DriverValue]) {
        for v in values {
            tracing::info!(
                node = node_address,
                driver = v.driver.id(),
                value = v.value,
                uom = v.uom,
                "driver update"
            );
        }
    }
}

/// The polling loop and its published state.
pub struct PollService {
    config: Config,
    client: WeatherClient,
    sink: Box<dyn ReportSink>,
    latest: RwLock<HashMap<String, Vec<DriverValue>>>,
}

impl PollService {
    pub fn new(config: Config, client: WeatherClient, sink: Box<dyn ReportSink>) -> Self {
        Self {
            config,
            client,
            sink,
            latest: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch and publish current conditions.
    pub async fn poll_current(&self) -> Result<()> {
        let response = self
            .client
            .current(&self.config.location, self.config.units)
            .await?;

        let condition = Condition::from_code(response.current.weather_code);
        tracing::info!(
            location = %response.location.name,
            temperature = response.current.temperature,
            condition = condition.description(),
            "current conditions"
        );

        let values = current_drivers(&response.current, self.config.units);
        self.publish(CONTROLLER_ADDRESS, values);
        Ok(())
    }

    /// Fetch the forecast and publish each daily node.
    ///
    /// Index 0 of the response is today; the daily nodes cover the
    /// following six days. A day that fails to map is logged and
    /// skipped so the remaining days still publish.
    pub async fn poll_forecast(&self) -> Result<()> {
        let response = self
            .client
            .forecast(&self.config.location, (FORECAST_DAYS + 2) as u8)
            .await?;

        let latitude = response.location.latitude()?;
        let site = SiteParameters {
            elevation_m: self.config.elevation_m,
            latitude_deg: latitude,
            plant_coefficient: self.config.plant_coefficient,
        };

        for day in 1..=FORECAST_DAYS {
            let Some(forecast_day) = response.forecast.forecastday.get(day) else {
                tracing::warn!(day, "forecast day missing from response");
                continue;
            };

            let record = forecast_day.record(self.config.units);
            match forecast_drivers(&record, site, self.config.units) {
                Ok(values) => self.publish(&format!("forecast_{}", day), values),
                Err(e) => tracing::error!(day, "forecast mapping failed: {:#}", e),
            }
        }

        Ok(())
    }

    /// Re-report the last published values for every node (the host's
    /// query command).
    pub fn query(&self) {
        for (address, values) in self.latest.read().iter() {
            self.sink.report(address, values);
        }
    }

    /// Last published values for a node address, if any.
    pub fn latest(&self, address: &str) -> Option<Vec<DriverValue>> {
        self.latest.read().get(address).cloned()
    }

    fn publish(&self, address: &str, values: Vec<DriverValue>) {
        self.sink.report(address, &values);
        self.latest.write().insert(address.to_string(), values);
    }

    /// Run both poll loops until cancelled. The first tick of each
    /// interval fires immediately, which doubles as the initial query
    /// on startup. Poll failures are logged; the loop keeps going.
    pub async fn run(&self) -> Result<()> {
        let mut short = tokio::time::interval(Duration::from_secs(self.config.short_poll_secs));
        let mut long = tokio::time::interval(Duration::from_secs(self.config.long_poll_secs));

        loop {
            tokio::select! {
                _ = short.tick() => {
                    if let Err(e) = self.poll_current().await {
                        tracing::error!("current conditions poll failed: {:#}", e);
                    }
                }
                _ = long.tick() => {
                    if let Err(e) = self.poll_forecast().await {
                        tracing::error!("forecast poll failed: {:#}", e);
                    }
                }
            }
        }
    }
}
