//! Serializable configuration for indicator computation and price fetching.
//!
//! Every field has a default, so a TOML file only needs the keys it overrides:
//!
//! ```toml
//! [indicators]
//! sma_window = 50
//!
//! [fetch]
//! max_attempts = 3
//! ```

use crate::data::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration for the market side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub indicators: IndicatorConfig,
    pub fetch: FetchConfig,
}

impl MarketConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Indicator windows used by `StockAnalyzer::add_indicators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_window: usize,
    /// Optional second, slower SMA (e.g. 50 alongside the 20-day one).
    pub sma_long_window: Option<usize>,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_window: 20,
            sma_long_window: None,
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorConfig {
    /// Check that every window is usable.
    pub fn validate(&self) -> Result<(), String> {
        let windows = [
            ("sma_window", self.sma_window),
            ("rsi_window", self.rsi_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(format!("{name} must be >= 1"));
            }
        }
        if self.sma_long_window == Some(0) {
            return Err("sma_long_window must be >= 1".into());
        }
        if self.macd_fast >= self.macd_slow {
            return Err(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            ));
        }
        Ok(())
    }

    /// Largest configured window; the minimum row count for `add_indicators`.
    pub fn largest_window(&self) -> usize {
        self.sma_window
            .max(self.rsi_window)
            .max(self.macd_fast)
            .max(self.macd_slow)
            .max(self.macd_signal)
            .max(self.sma_long_window.unwrap_or(0))
    }
}

/// Network settings for [`crate::data::YahooProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total attempts per fetch, including the first.
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles after that.
    pub base_delay_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay_ms: 500,
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_windows() {
        let config = IndicatorConfig::default();
        assert_eq!(config.sma_window, 20);
        assert_eq!(config.rsi_window, 14);
        assert_eq!(config.macd_fast, 12);
        assert_eq!(config.macd_slow, 26);
        assert_eq!(config.macd_signal, 9);
        assert_eq!(config.sma_long_window, None);
        assert_eq!(config.largest_window(), 26);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = MarketConfig::from_toml(
            r#"
            [indicators]
            sma_window = 50

            [fetch]
            max_attempts = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.indicators.sma_window, 50);
        assert_eq!(config.indicators.rsi_window, 14);
        assert_eq!(config.fetch.max_attempts, 3);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.indicators.largest_window(), 50);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(MarketConfig::from_toml("").unwrap(), MarketConfig::default());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = MarketConfig::from_toml("[indicators]\nsma_window = \"twenty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = MarketConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn validate_rejects_bad_windows() {
        let zero = IndicatorConfig {
            rsi_window: 0,
            ..Default::default()
        };
        assert!(zero.validate().unwrap_err().contains("rsi_window"));

        let inverted = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert!(inverted.validate().unwrap_err().contains("macd_fast"));
    }

    #[test]
    fn long_sma_window_from_toml() {
        let config = MarketConfig::from_toml("[indicators]\nsma_long_window = 50").unwrap();
        assert_eq!(config.indicators.sma_window, 20);
        assert_eq!(config.indicators.sma_long_window, Some(50));
        assert_eq!(config.indicators.largest_window(), 50);

        let zero = IndicatorConfig {
            sma_long_window: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().unwrap_err().contains("sma_long_window"));
    }

    #[test]
    fn fetch_config_builds_retry_policy() {
        let policy = FetchConfig::default().retry_policy();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }
}
