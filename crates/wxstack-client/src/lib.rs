//! HTTP client for the weatherstack.com API.
//!
//! Covers the two endpoints the node consumes: `/current` and
//! `/forecast`. The API signals failures inside a 200 response via a
//! `success: false` envelope; the client surfaces those as
//! [`ClientError::Api`] instead of letting them parse-fail downstream.

pub mod client;
pub mod types;

pub use client::WeatherClient;
pub use types::{
    ApiLocation, ClientError, Condition, CurrentConditions, CurrentResponse,
    DailyForecastRecord, ForecastDay, ForecastResponse,
};
