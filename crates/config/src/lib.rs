//! Shared configuration for the digit whiteboard
//!
//! This crate is the single source of truth for session timing, stroke
//! sensitivity and backend selection. Values come from defaults, then an
//! optional JSON file, then environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default spacing between canvas transmissions in milliseconds
pub const DEFAULT_SEND_INTERVAL_MS: u64 = 200;

/// Default minimum pointer travel (in canvas cells) between stroke stamps
pub const DEFAULT_MOVEMENT_THRESHOLD: f32 = whiteboard_canvas::MOVEMENT_THRESHOLD;

/// Default host frame rate
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Environment variable overriding the send interval
pub const ENV_SEND_INTERVAL: &str = "WHITEBOARD_SEND_INTERVAL_MS";

/// Environment variable selecting the backend
pub const ENV_BACKEND: &str = "WHITEBOARD_BACKEND";

/// Environment variable overriding the host frame rate
pub const ENV_FRAME_RATE: &str = "WHITEBOARD_FRAME_RATE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which prediction backend the host wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process counter stub, called on the frame thread
    #[default]
    Stub,
    /// Predictor running on a dedicated worker thread
    Threaded,
}

impl BackendKind {
    /// Parse from a config or environment string
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stub" => Some(Self::Stub),
            "threaded" => Some(Self::Threaded),
            _ => None,
        }
    }
}

/// Whiteboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    /// Minimum spacing between canvas transmissions in milliseconds
    pub send_interval_ms: u64,
    /// Minimum pointer travel between stamps, in canvas cells
    pub movement_threshold: f32,
    /// Host frame rate in frames per second
    pub frame_rate: u32,
    /// Prediction backend
    pub backend: BackendKind,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            send_interval_ms: DEFAULT_SEND_INTERVAL_MS,
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD,
            frame_rate: DEFAULT_FRAME_RATE,
            backend: BackendKind::default(),
        }
    }
}

impl WhiteboardConfig {
    /// Parse a config from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load defaults or `path`, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_SEND_INTERVAL) {
            self.send_interval_ms = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_SEND_INTERVAL,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_BACKEND) {
            self.backend = BackendKind::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_BACKEND,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_FRAME_RATE) {
            self.frame_rate = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_FRAME_RATE,
                value: value.clone(),
            })?;
        }

        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::InvalidValue {
                key: "frame_rate",
                value: self.frame_rate.to_string(),
            });
        }
        if !self.movement_threshold.is_finite() || self.movement_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "movement_threshold",
                value: self.movement_threshold.to_string(),
            });
        }
        Ok(self)
    }

    /// Send interval as a Duration
    pub fn send_interval(&self) -> Duration {
        Duration::from_millis(self.send_interval_ms)
    }

    /// Duration of one host frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = WhiteboardConfig::default();
        assert_eq!(config.send_interval(), Duration::from_millis(200));
        assert_eq!(config.movement_threshold, 0.03);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.backend, BackendKind::Stub);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WhiteboardConfig::from_json_str(r#"{ "backend": "threaded" }"#).unwrap();
        assert_eq!(config.backend, BackendKind::Threaded);
        assert_eq!(config.send_interval_ms, DEFAULT_SEND_INTERVAL_MS);
    }

    #[test]
    fn test_invalid_json() {
        let result = WhiteboardConfig::from_json_str(r#"{ "backend": "gpu" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = WhiteboardConfig::from_json_str(r#"{ "frame_rate": 0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let config = WhiteboardConfig::default()
            .with_overrides(lookup(&[
                (ENV_SEND_INTERVAL, "50"),
                (ENV_BACKEND, "Threaded"),
                (ENV_FRAME_RATE, "30"),
            ]))
            .unwrap();

        assert_eq!(config.send_interval(), Duration::from_millis(50));
        assert_eq!(config.backend, BackendKind::Threaded);
        assert_eq!(config.frame_rate, 30);
    }

    #[test]
    fn test_bad_env_override() {
        let result = WhiteboardConfig::default().with_overrides(lookup(&[(ENV_SEND_INTERVAL, "soon")]));
        match result {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, ENV_SEND_INTERVAL);
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_duration() {
        let config = WhiteboardConfig {
            frame_rate: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
    }
}
