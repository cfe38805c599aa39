use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::sim::{SimulatorConfig, DEFAULT_DOPPLER_BAND};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid doppler band [{min}, {max}]: bounds must be finite with min < max")]
    InvalidDopplerBand { min: f64, max: f64 },
    #[error("engine tick must be non-zero")]
    ZeroTick,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    #[serde(default = "default_refresh", with = "human_duration")]
    pub refresh: Duration,
    #[serde(default = "default_timeout", with = "human_duration")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_tick", with = "human_duration")]
    pub tick: Duration,
    #[serde(default = "default_marker_interval", with = "human_duration")]
    pub marker_interval: Duration,
    #[serde(default = "default_doppler_min")]
    pub doppler_min: f64,
    #[serde(default = "default_doppler_max")]
    pub doppler_max: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: default_tick(),
            marker_interval: default_marker_interval(),
            doppler_min: default_doppler_min(),
            doppler_max: default_doppler_max(),
        }
    }
}

impl EngineConfig {
    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            tick: self.tick,
            marker_interval: self.marker_interval,
            doppler_band: (self.doppler_min, self.doppler_max),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_refresh() -> Duration {
    Duration::from_secs(60)
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_tick() -> Duration {
    Duration::from_secs(1)
}

fn default_marker_interval() -> Duration {
    Duration::from_millis(100)
}

fn default_doppler_min() -> f64 {
    DEFAULT_DOPPLER_BAND.0
}

fn default_doppler_max() -> f64 {
    DEFAULT_DOPPLER_BAND.1
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

mod human_duration {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.engine.doppler_min, self.engine.doppler_max);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidDopplerBand { min, max });
        }
        if self.engine.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }
}
