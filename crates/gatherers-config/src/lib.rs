//! Configuration for gatherers
//!
//! Default window sizes and concurrency bounds, read from one TOML file:
//!
//! ```toml
//! [window]
//! fixed_size = 4
//! sliding_size = 2
//!
//! [concurrency]
//! max_concurrency = 8
//! queue_capacity = 32
//! ```
//!
//! Missing keys fall back to the built-in defaults.

use gatherers::{MapConcurrentOptions, WindowFixed, WindowSliding};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;

pub use error::ConfigError;

/// Main gatherers configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GathererConfig {
    pub window: WindowConfig,
    pub concurrency: ConcurrencyConfig,
}

/// Default window sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub fixed_size: usize,
    pub sliding_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fixed_size: 3,
            sliding_size: 3,
        }
    }
}

impl WindowConfig {
    /// Fixed windows of the configured `fixed_size`
    pub fn window_fixed<I>(&self, sequence: I) -> gatherers::Result<WindowFixed<I::IntoIter>>
    where
        I: IntoIterator,
    {
        gatherers::window_fixed(sequence, self.fixed_size)
    }

    /// Sliding windows of the configured `sliding_size`
    pub fn window_sliding<I>(&self, sequence: I) -> gatherers::Result<WindowSliding<I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Clone,
    {
        gatherers::window_sliding(sequence, self.sliding_size)
    }
}

/// Bounded concurrent mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    pub max_concurrency: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_capacity: Option<usize>,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        let options = MapConcurrentOptions::default();
        Self {
            max_concurrency: options.max_concurrency,
            queue_capacity: options.queue_capacity,
        }
    }
}

impl ConcurrencyConfig {
    /// Options for [`gatherers::map_concurrent_with`]
    pub fn to_options(&self) -> MapConcurrentOptions {
        let options = MapConcurrentOptions::new(self.max_concurrency);
        match self.queue_capacity {
            Some(capacity) => options.with_queue_capacity(capacity),
            None => options,
        }
    }
}

impl GathererConfig {
    /// Read and validate a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and bounds the gatherers would refuse at call time
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |err: gatherers::GatherError| {
            ConfigError::ValidationError(err.to_string())
        };

        if self.window.fixed_size == 0 {
            return Err(ConfigError::ValidationError(
                "window.fixed_size must be at least 1".to_string(),
            ));
        }
        if self.window.sliding_size == 0 {
            return Err(ConfigError::ValidationError(
                "window.sliding_size must be at least 1".to_string(),
            ));
        }
        self.concurrency.to_options().validate().map_err(invalid)?;
        Ok(())
    }
}
