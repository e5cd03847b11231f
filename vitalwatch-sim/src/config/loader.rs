//! Configuration file loading
//!
//! Reads a TOML file when one is given, otherwise the copy embedded at build
//! time. Parsed values are checked before the engine sees them.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::types::SimConfig;

/// Default configuration, validated by build.rs
pub const EMBEDDED_CONFIG: &str = include_str!("../../vitalwatch.toml");

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML syntax or type error
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parsed but do not make sense together
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parse and check configuration text
pub fn parse_config(text: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from `path`, or the embedded defaults
pub fn load_config(path: Option<&Path>) -> Result<SimConfig, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text)
        }
        None => {
            debug!("using embedded configuration");
            parse_config(EMBEDDED_CONFIG)
        }
    }
}

fn validate(config: &SimConfig) -> Result<(), ConfigError> {
    let hr = &config.engine.heart_rate;
    if !(hr.bradycardia_below < hr.normal_min
        && hr.normal_min < hr.normal_max
        && hr.normal_max < hr.tachycardia_above)
    {
        return Err(ConfigError::Invalid(
            "heart-rate thresholds must be strictly increasing".to_string(),
        ));
    }

    let ox = &config.engine.oxygen;
    if ox.critical_below > ox.alert_max {
        return Err(ConfigError::Invalid(
            "oxygen critical_below must not exceed alert_max".to_string(),
        ));
    }

    for (name, profile) in [
        ("monitor", &config.engine.scenario.monitor),
        ("hazard", &config.engine.scenario.hazard),
    ] {
        if profile.target_min > profile.target_max {
            return Err(ConfigError::Invalid(format!(
                "scenario {} target_min exceeds target_max",
                name
            )));
        }
    }

    if config.engine.cadence.frame_ms == 0 {
        return Err(ConfigError::Invalid("cadence frame_ms must be positive".to_string()));
    }

    let location = &config.location;
    if location.lat.is_some() != location.lon.is_some() {
        return Err(ConfigError::Invalid(
            "location lat and lon must be set together".to_string(),
        ));
    }
    if let Some(coordinate) = location.coordinate() {
        if !coordinate.is_valid() {
            return Err(ConfigError::Invalid("location out of range".to_string()));
        }
    }

    if config.display.ecg_width == 0 {
        return Err(ConfigError::Invalid("display ecg_width must be positive".to_string()));
    }

    Ok(())
}
