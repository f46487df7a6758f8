//! Configuration loading and management for the Xtrack service.
//!
//! This module provides functionality to load the service configuration from
//! YAML files: deployment metadata, the payroll policy, the bearer token
//! table and optional seed employees.
//!
//! # Example
//!
//! ```no_run
//! use xtrack::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/xtrack").unwrap();
//! println!("Listening port: {}", config.app().server.port);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccessConfig, AccessToken, AppMetadata, DirectoryConfig, NonWorkingSaturdays, PayrollPolicy,
    PerDayDivisor, Role, ServerConfig, XtrackConfig,
};
