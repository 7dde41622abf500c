use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wxstack_eto::UnitSystem;

use crate::types::{ApiErrorBody, ClientError, CurrentResponse, ForecastResponse};

const WEATHERSTACK_API_URL: &str = "http://api.weatherstack.com/";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// weatherstack.com API client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    client: Arc<Client>,
    access_key: String,
}

impl WeatherClient {
    /// Create a client against the production API.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(access_key: impl Into<String>) -> Result<Self, ClientError> {
        // The production URL is a constant and always parses.
        let base_url = Url::parse(WEATHERSTACK_API_URL)?;
        Self::with_base_url(access_key, base_url)
    }

    /// Create a client against an arbitrary base URL. Integration
    /// tests point this at a local mock server.
    pub fn with_base_url(access_key: impl Into<String>, base_url: Url) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            access_key: access_key.into(),
        })
    }

    /// Fetch current conditions for a location query.
    ///
    /// `units` selects the measurement system the API reports in
    /// (`m` metric, `f` imperial).
    pub async fn current(
        &self,
        query: &str,
        units: UnitSystem,
    ) -> Result<CurrentResponse, ClientError> {
        let unit_param = match units {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "f",
        };
        tracing::debug!(query, units = unit_param, "fetching current conditions");
        self.get_json("current", &[("query", query), ("units", unit_param)])
            .await
    }

    /// Fetch the daily forecast for a location query.
    ///
    /// Both unit families come back in every response; callers select
    /// one with [`crate::ForecastDay::record`].
    pub async fn forecast(&self, query: &str, days: u8) -> Result<ForecastResponse, ClientError> {
        let days = days.to_string();
        tracing::debug!(query, days = %days, "fetching forecast");
        self.get_json("forecast", &[("query", query), ("forecast_days", &days)])
            .await
    }

    /// GET an endpoint, unwrap the API's in-band error envelope, and
    /// deserialize the payload.
    ///
    /// weatherstack reports failures (bad key, plan limits, unknown
    /// location) as HTTP 200 with `{"success": false, "error": {...}}`,
    /// so a status check alone is not enough.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.base_url.join(path)?;
        let response = self
            .client
            .get(url)
            .query(&[("access_key", self.access_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;

        if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let err: ApiErrorBody = serde_json::from_value(
                body.get("error").cloned().unwrap_or_default(),
            )
            .map_err(|e| ClientError::Parse(format!("malformed error envelope: {}", e)))?;
            tracing::warn!(code = err.code, kind = %err.kind, "weatherstack API error");
            return Err(ClientError::Api {
                code: err.code,
                kind: err.kind,
                info: err.info,
            });
        }

        serde_json::from_value(body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}
