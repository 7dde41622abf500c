use serde::{Deserialize, Serialize};
use wxstack_eto::UnitSystem;

/// Weather condition categories mapped from weatherstack condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Sleet,
    Snow,
    Thunderstorm,
}

impl Condition {
    /// Map a weatherstack condition code to a category.
    /// See: https://weatherstack.com/documentation (weather codes)
    pub fn from_code(code: i64) -> Self {
        match code {
            113 => Self::Clear,
            116 => Self::PartlyCloudy,
            119 | 122 => Self::Cloudy,
            143 | 248 | 260 => Self::Fog,
            176 | 263 | 266 | 281 | 311 | 353 => Self::Drizzle,
            284 | 314 | 317 | 320 | 350 | 362 | 365 | 374 | 377 => Self::Sleet,
            179 | 182 | 185 | 227 | 230 | 323 | 326 | 329 | 332 | 335 | 338 | 368 | 371 => {
                Self::Snow
            }
            293 | 296 | 299 | 302 | 305 | 308 | 356 | 359 => Self::Rain,
            200 | 386 | 389 | 392 | 395 => Self::Thunderstorm,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Human-readable description, used in log lines.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Sleet => "Sleet",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Location block returned on every endpoint. Coordinates arrive as
/// decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLocation {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub localtime_epoch: Option<i64>,
}

impl ApiLocation {
    /// Latitude in degrees, parsed from the API's string field.
    pub fn latitude(&self) -> Result<f64, ClientError> {
        self.lat
            .trim()
            .parse()
            .map_err(|_| ClientError::Parse(format!("invalid latitude: {:?}", self.lat)))
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> Result<f64, ClientError> {
        self.lon
            .trim()
            .parse()
            .map_err(|_| ClientError::Parse(format!("invalid longitude: {:?}", self.lon)))
    }
}

/// Current observation block from `/current`. Values are in the unit
/// system requested with the `units` query parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_code: i64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_degree: f64,
    pub pressure: f64,
    pub precip: f64,
    pub cloudcover: f64,
    pub feelslike: f64,
    pub uv_index: f64,
    pub visibility: f64,
}

/// Response envelope for `/current`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentResponse {
    pub location: ApiLocation,
    pub current: CurrentConditions,
}

/// Response envelope for `/forecast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub location: ApiLocation,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// One forecast day. Carries both metric and imperial variants of each
/// field; [`ForecastDay::record`] picks one family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub date_epoch: i64,
    pub day: ForecastDayDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDayDetail {
    pub mintemp_c: f64,
    pub maxtemp_c: f64,
    pub mintemp_f: f64,
    pub maxtemp_f: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avgvis_km: f64,
    pub avgvis_miles: f64,
    pub maxwind_kph: f64,
    pub maxwind_mph: f64,
    pub avghumidity: f64,
    pub uv: f64,
    pub condition: ConditionBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionBlock {
    pub code: i64,
    #[serde(default)]
    pub text: Option<String>,
}

/// A forecast day flattened to the single unit family the caller
/// works in. This is the record handed to the driver mapping and the
/// ETo engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastRecord {
    pub date_epoch: i64,
    pub condition_code: i64,
    pub avg_humidity: f64,
    pub uv_index: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub total_precip: f64,
    pub avg_visibility: f64,
    pub max_wind_speed: f64,
}

impl ForecastDay {
    /// Select the metric or imperial field family in one place, so no
    /// caller ever mixes families.
    pub fn record(&self, units: UnitSystem) -> DailyForecastRecord {
        let d = &self.day;
        let (min_temp, max_temp, total_precip, avg_visibility, max_wind_speed) = match units {
            UnitSystem::Metric => (
                d.mintemp_c,
                d.maxtemp_c,
                d.totalprecip_mm,
                d.avgvis_km,
                d.maxwind_kph,
            ),
            UnitSystem::Imperial => (
                d.mintemp_f,
                d.maxtemp_f,
                d.totalprecip_in,
                d.avgvis_miles,
                d.maxwind_mph,
            ),
        };
        DailyForecastRecord {
            date_epoch: self.date_epoch,
            condition_code: d.condition.code,
            avg_humidity: d.avghumidity,
            uv_index: d.uv,
            min_temp,
            max_temp,
            total_precip,
            avg_visibility,
            max_wind_speed,
        }
    }
}

/// Error block the API embeds in `success: false` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub info: String,
}

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("weatherstack API error {code} ({kind}): {info}")]
    Api {
        code: i64,
        kind: String,
        info: String,
    },

    #[error("unexpected response status {0}")]
    Status(reqwest::StatusCode),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
