use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wxstack_eto::{types::DEFAULT_PLANT_COEFFICIENT, UnitSystem};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Node configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location query passed to the weather API (city name, zip,
    /// "lat,lon", ...).
    pub location: String,

    /// weatherstack API access key.
    pub api_key: String,

    /// Unit system the API reports in and the drivers publish in.
    #[serde(default)]
    pub units: UnitSystem,

    /// Site elevation above sea level, meters. Used by the ETo engine.
    #[serde(default)]
    pub elevation_m: f64,

    /// Plant/crop coefficient for the ETo calculation.
    #[serde(default = "default_plant_coefficient")]
    pub plant_coefficient: f64,

    /// Current-conditions poll interval, seconds.
    #[serde(default = "default_short_poll_secs")]
    pub short_poll_secs: u64,

    /// Forecast poll interval, seconds.
    #[serde(default = "default_long_poll_secs")]
    pub long_poll_secs: u64,
}

fn default_plant_coefficient() -> f64 {
    DEFAULT_PLANT_COEFFICIENT
}

fn default_short_poll_secs() -> u64 {
    // Current conditions can be polled fairly frequently, about once
    // every 2 minutes.
    120
}

fn default_long_poll_secs() -> u64 {
    3600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: String::new(),
            api_key: String::new(),
            units: UnitSystem::Imperial,
            elevation_m: 0.0,
            plant_coefficient: default_plant_coefficient(),
            short_poll_secs: default_short_poll_secs(),
            long_poll_secs: default_long_poll_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a default
    /// file if it doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load configuration and validate it.
    ///
    /// Returns the config along with any validation warnings. Errors
    /// out if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.location.is_empty() {
            result.add_error("location", "Location parameter must be set");
        }
        if self.api_key.is_empty() {
            result.add_error("api_key", "weatherstack API key must be set");
        }

        if self.elevation_m < 0.0 {
            result.add_warning("elevation_m", "Elevation is below sea level");
        }
        if !(0.0..=2.0).contains(&self.plant_coefficient) {
            result.add_warning(
                "plant_coefficient",
                "Plant coefficient is outside the usual 0-2 range",
            );
        }

        if self.short_poll_secs == 0 {
            result.add_error("short_poll_secs", "Poll interval cannot be 0");
        }
        if self.long_poll_secs == 0 {
            result.add_error("long_poll_secs", "Poll interval cannot be 0");
        } else if self.long_poll_secs < self.short_poll_secs {
            result.add_warning(
                "long_poll_secs",
                "Forecast poll is more frequent than the current-conditions poll",
            );
        }

        result
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wxstack");

        Ok(config_dir.join("config.toml"))
    }
}
