use crate::error::{CompscopeError, Result};
use crate::models::DistanceUnit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

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

/// Layered configuration for compscope
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Comparable listings generated per subject
    pub listing_count: ConfigValue<usize>,
    /// Debounce delay for the aggregate filter set
    pub filter_debounce_ms: ConfigValue<u64>,
    /// Debounce delay for individual text/slider inputs
    pub input_debounce_ms: ConfigValue<u64>,
    pub distance_unit: ConfigValue<DistanceUnit>,
    /// Generator seed; `None` draws from OS entropy
    pub seed: ConfigValue<Option<u64>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            listing_count: ConfigValue::new(150, ConfigSource::Default),
            filter_debounce_ms: ConfigValue::new(150, ConfigSource::Default),
            input_debounce_ms: ConfigValue::new(250, ConfigSource::Default),
            distance_unit: ConfigValue::new(DistanceUnit::Miles, ConfigSource::Default),
            seed: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CompscopeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CompscopeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(count) = file_config.listing_count {
            self.listing_count.update(validate_listing_count(count)?, ConfigSource::File);
        }

        if let Some(ms) = file_config.filter_debounce_ms {
            self.filter_debounce_ms.update(ms, ConfigSource::File);
        }

        if let Some(ms) = file_config.input_debounce_ms {
            self.input_debounce_ms.update(ms, ConfigSource::File);
        }

        if let Some(distance_unit) = file_config.distance_unit {
            self.distance_unit.update(distance_unit, ConfigSource::File);
        }

        if let Some(seed) = file_config.seed {
            self.seed.update(Some(seed), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // COMPSCOPE_LISTING_COUNT
        if let Ok(count_str) = env::var("COMPSCOPE_LISTING_COUNT") {
            match count_str.parse::<usize>().ok().filter(|count| *count > 0) {
                Some(count) => self.listing_count.update(count, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid COMPSCOPE_LISTING_COUNT value '{}': expected a positive integer",
                    count_str
                ),
            }
        }

        // COMPSCOPE_FILTER_DEBOUNCE_MS
        if let Ok(ms_str) = env::var("COMPSCOPE_FILTER_DEBOUNCE_MS") {
            match ms_str.parse::<u64>() {
                Ok(ms) => self.filter_debounce_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid COMPSCOPE_FILTER_DEBOUNCE_MS value '{}': expected milliseconds",
                    ms_str
                ),
            }
        }

        // COMPSCOPE_INPUT_DEBOUNCE_MS
        if let Ok(ms_str) = env::var("COMPSCOPE_INPUT_DEBOUNCE_MS") {
            match ms_str.parse::<u64>() {
                Ok(ms) => self.input_debounce_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid COMPSCOPE_INPUT_DEBOUNCE_MS value '{}': expected milliseconds",
                    ms_str
                ),
            }
        }

        // COMPSCOPE_DISTANCE_UNIT
        if let Ok(unit_str) = env::var("COMPSCOPE_DISTANCE_UNIT") {
            match parse_distance_unit(&unit_str) {
                Ok(unit) => self.distance_unit.update(unit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid COMPSCOPE_DISTANCE_UNIT value '{}': expected miles, kilometers, meters, or feet",
                    unit_str
                ),
            }
        }

        // COMPSCOPE_SEED
        if let Ok(seed_str) = env::var("COMPSCOPE_SEED") {
            match seed_str.parse::<u64>() {
                Ok(seed) => self.seed.update(Some(seed), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid COMPSCOPE_SEED value '{}': expected unsigned integer",
                    seed_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(count) = overrides.listing_count {
            self.listing_count.update(count, ConfigSource::Cli);
        }

        if let Some(ms) = overrides.filter_debounce_ms {
            self.filter_debounce_ms.update(ms, ConfigSource::Cli);
        }

        if let Some(ms) = overrides.input_debounce_ms {
            self.input_debounce_ms.update(ms, ConfigSource::Cli);
        }

        if let Some(distance_unit) = overrides.distance_unit {
            self.distance_unit.update(distance_unit, ConfigSource::Cli);
        }

        if let Some(seed) = overrides.seed {
            self.seed.update(Some(seed), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "listing_count".to_string(),
            (self.listing_count.value.to_string(), self.listing_count.source),
        );

        map.insert(
            "filter_debounce_ms".to_string(),
            (format!("{}ms", self.filter_debounce_ms.value), self.filter_debounce_ms.source),
        );

        map.insert(
            "input_debounce_ms".to_string(),
            (format!("{}ms", self.input_debounce_ms.value), self.input_debounce_ms.source),
        );

        map.insert(
            "distance_unit".to_string(),
            (format!("{:?}", self.distance_unit.value), self.distance_unit.source),
        );

        map.insert(
            "seed".to_string(),
            (
                self.seed.value.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string()),
                self.seed.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    listing_count: Option<usize>,
    filter_debounce_ms: Option<u64>,
    input_debounce_ms: Option<u64>,
    distance_unit: Option<DistanceUnit>,
    seed: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub listing_count: Option<usize>,
    pub filter_debounce_ms: Option<u64>,
    pub input_debounce_ms: Option<u64>,
    pub distance_unit: Option<DistanceUnit>,
    pub seed: Option<u64>,
}

fn validate_listing_count(count: usize) -> Result<usize> {
    if count == 0 {
        return Err(CompscopeError::ConfigInvalid {
            key: "listing_count".to_string(),
            reason: "listing count must be positive".to_string(),
        });
    }
    Ok(count)
}

/// Parse distance unit from string
pub fn parse_distance_unit(s: &str) -> Result<DistanceUnit> {
    match s.to_lowercase().as_str() {
        "miles" | "mi" => Ok(DistanceUnit::Miles),
        "kilometers" | "km" => Ok(DistanceUnit::Kilometers),
        "meters" | "m" => Ok(DistanceUnit::Meters),
        "feet" | "ft" => Ok(DistanceUnit::Feet),
        _ => Err(CompscopeError::ConfigInvalid {
            key: "distance_unit".to_string(),
            reason: format!("Invalid distance unit: {}. Use miles, kilometers, meters, or feet", s),
        }),
    }
}
