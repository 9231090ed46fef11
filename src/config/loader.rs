//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EarningsPolicy, ServiceConfig, ServiceMetadata, Tariff};

/// Loads and provides access to service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── service.yaml   # Service name, currency and UTC offset
/// ├── tariff.yaml    # Delivery price schedule
/// └── earnings.yaml  # Rider earning shares
/// ```
///
/// # Example
///
/// ```no_run
/// use courier_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// println!("Loaded service: {}", loader.service().name);
/// # Ok::<(), courier_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A value is out of range (negative rate, share above 1, bad offset)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading service configuration");

        let metadata = Self::load_yaml::<ServiceMetadata>(&path.join("service.yaml"))?;
        let tariff = Self::load_yaml::<Tariff>(&path.join("tariff.yaml"))?;
        let earnings = Self::load_yaml::<EarningsPolicy>(&path.join("earnings.yaml"))?;

        let config = ServiceConfig::new(metadata, tariff, earnings)?;
        Ok(Self { config })
    }

    /// Returns a loader holding the built-in standard configuration.
    pub fn standard() -> Self {
        Self {
            config: ServiceConfig::standard(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the service metadata.
    pub fn service(&self) -> &ServiceMetadata {
        self.config.service()
    }

    /// Returns the price schedule.
    pub fn tariff(&self) -> &Tariff {
        self.config.tariff()
    }

    /// Returns the rider earnings policy.
    pub fn earnings(&self) -> &EarningsPolicy {
        self.config.earnings()
    }

    /// Returns the service's local UTC offset.
    pub fn timezone(&self) -> FixedOffset {
        self.config.timezone()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::standard()
    }
}
