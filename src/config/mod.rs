//! Configuration loading and management for the Courier Engine.
//!
//! This module provides functionality to load the service configuration from
//! YAML files, including service metadata, the delivery tariff and the rider
//! earnings policy.
//!
//! # Example
//!
//! ```no_run
//! use courier_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded service: {}", config.service().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EarningsPolicy, ServiceConfig, ServiceMetadata, Tariff, ZoneRates};
