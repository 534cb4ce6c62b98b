use crate::error::{LahanError, Result};
use crate::models::{SessionSettings, DEFAULT_PROXIMITY_TOLERANCE, MIN_POLYGON_POINTS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_STORE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for lahan
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub store_url: ConfigValue<String>,
    pub proximity_tolerance: ConfigValue<f64>,
    pub cross_check_parcels: ConfigValue<bool>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            store_url: ConfigValue::new(DEFAULT_STORE_URL.to_string(), ConfigSource::Default),
            proximity_tolerance: ConfigValue::new(
                DEFAULT_PROXIMITY_TOLERANCE,
                ConfigSource::Default,
            ),
            cross_check_parcels: ConfigValue::new(true, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(
                DEFAULT_REQUEST_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| LahanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| LahanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(store_url) = file_config.store_url {
            self.store_url.update(store_url, ConfigSource::File);
        }

        if let Some(tolerance) = file_config.proximity_tolerance {
            self.proximity_tolerance.update(parse_tolerance(tolerance)?, ConfigSource::File);
        }

        if let Some(cross_check) = file_config.cross_check_parcels {
            self.cross_check_parcels.update(cross_check, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // LAHAN_STORE_URL
        if let Ok(url) = env::var("LAHAN_STORE_URL") {
            self.store_url.update(url, ConfigSource::Environment);
        }

        // LAHAN_PROXIMITY_TOLERANCE
        if let Ok(tolerance_str) = env::var("LAHAN_PROXIMITY_TOLERANCE") {
            match tolerance_str.parse::<f64>().ok().and_then(|t| parse_tolerance(t).ok()) {
                Some(tolerance) => {
                    self.proximity_tolerance.update(tolerance, ConfigSource::Environment)
                }
                None => tracing::warn!(
                    "Invalid LAHAN_PROXIMITY_TOLERANCE value '{}': expected a positive number of degrees",
                    tolerance_str
                ),
            }
        }

        // LAHAN_CROSS_CHECK
        if let Ok(flag_str) = env::var("LAHAN_CROSS_CHECK") {
            match parse_bool(&flag_str) {
                Ok(flag) => self.cross_check_parcels.update(flag, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid LAHAN_CROSS_CHECK value '{}': expected true or false",
                    flag_str
                ),
            }
        }

        // LAHAN_REQUEST_TIMEOUT
        if let Ok(timeout_str) = env::var("LAHAN_REQUEST_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => {
                    self.request_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid LAHAN_REQUEST_TIMEOUT value '{}': expected whole seconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if let Some(store_url) = overrides.store_url {
            self.store_url.update(store_url, ConfigSource::Cli);
        }

        if let Some(tolerance) = overrides.proximity_tolerance {
            self.proximity_tolerance.update(parse_tolerance(tolerance)?, ConfigSource::Cli);
        }

        if let Some(cross_check) = overrides.cross_check_parcels {
            self.cross_check_parcels.update(cross_check, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::Cli);
        }

        Ok(())
    }

    /// Settings consumed by the drawing session
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            tolerance: self.proximity_tolerance.value,
            cross_check: self.cross_check_parcels.value,
            min_points: MIN_POLYGON_POINTS,
        }
    }

    /// Store call timeout; `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs.value {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("store_url".to_string(), (self.store_url.value.clone(), self.store_url.source));

        map.insert(
            "proximity_tolerance".to_string(),
            (
                format!("{}°", self.proximity_tolerance.value),
                self.proximity_tolerance.source,
            ),
        );

        map.insert(
            "cross_check_parcels".to_string(),
            (self.cross_check_parcels.value.to_string(), self.cross_check_parcels.source),
        );

        let timeout = match self.request_timeout_secs.value {
            0 => "disabled".to_string(),
            secs => format!("{}s", secs),
        };
        map.insert("request_timeout".to_string(), (timeout, self.request_timeout_secs.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    store_url: Option<String>,
    proximity_tolerance: Option<f64>,
    cross_check_parcels: Option<bool>,
    request_timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub store_url: Option<String>,
    pub proximity_tolerance: Option<f64>,
    pub cross_check_parcels: Option<bool>,
    pub request_timeout_secs: Option<u64>,
}

/// Validate a proximity tolerance in degrees
pub fn parse_tolerance(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LahanError::ConfigInvalid {
            key: "proximity_tolerance".to_string(),
            reason: format!("Tolerance must be a positive number of degrees, got {}", value),
        })
    }
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LahanError::ConfigInvalid {
            key: "cross_check_parcels".to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}
