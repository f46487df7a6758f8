//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{XtrackError, XtrackResult};

use super::types::{
    AccessConfig, AccessToken, AppMetadata, DirectoryConfig, PayrollPolicy, XtrackConfig,
};

/// Loads and provides access to the service configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the payroll policy and token table.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/xtrack/
/// ├── app.yaml        # Deployment name and listener
/// ├── payroll.yaml    # Saturday rule, per-day divisor, paid leave allowances
/// ├── access.yaml     # Bearer tokens and the role/employee they act as
/// └── directory.yaml  # Optional seed employees
/// ```
///
/// # Example
///
/// ```no_run
/// use xtrack::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/xtrack").unwrap();
/// println!("Loaded deployment: {}", loader.app().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: XtrackConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> XtrackResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<AppMetadata>(&path.join("app.yaml"))?;
        let payroll = Self::load_yaml::<PayrollPolicy>(&path.join("payroll.yaml"))?;
        let access = Self::load_yaml::<AccessConfig>(&path.join("access.yaml"))?;

        let directory_path = path.join("directory.yaml");
        let directory = if directory_path.exists() {
            Self::load_yaml::<DirectoryConfig>(&directory_path)?
        } else {
            DirectoryConfig::default()
        };

        Ok(Self::from_config(XtrackConfig::new(
            metadata, payroll, access, directory,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: XtrackConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> XtrackResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| XtrackError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| XtrackError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &XtrackConfig {
        &self.config
    }

    /// Returns the application metadata.
    pub fn app(&self) -> &AppMetadata {
        self.config.app()
    }

    /// Returns the payroll policy.
    pub fn payroll(&self) -> &PayrollPolicy {
        self.config.payroll()
    }

    /// Looks up a bearer token in the token table.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xtrack::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/xtrack")?;
    /// let caller = loader.resolve_token("dev-admin-token");
    /// assert!(caller.is_some());
    /// # Ok::<(), xtrack::error::XtrackError>(())
    /// ```
    pub fn resolve_token(&self, token: &str) -> Option<&AccessToken> {
        self.config
            .access()
            .tokens
            .iter()
            .find(|entry| entry.token == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NonWorkingSaturdays, PerDayDivisor, Role};
    use crate::models::LeaveType;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/xtrack"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.app().name, "Xtrack");
        assert_eq!(loader.app().server.port, 4000);
    }

    #[test]
    fn test_payroll_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let payroll = loader.payroll();

        assert_eq!(
            payroll.non_working_saturdays,
            NonWorkingSaturdays::Fixed { count: 1 }
        );
        assert_eq!(payroll.per_day_divisor, PerDayDivisor::CalendarDays);
        assert_eq!(payroll.paid_allowance(LeaveType::Vacation), Decimal::ONE);
        assert_eq!(payroll.paid_allowance(LeaveType::Urgent), Decimal::ZERO);
    }

    #[test]
    fn test_resolve_known_tokens() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let admin = loader.resolve_token("dev-admin-token").unwrap();
        assert_eq!(admin.role, Role::Admin);

        let employee = loader.resolve_token("dev-employee-1-token").unwrap();
        assert_eq!(employee.role, Role::Employee);
        assert_eq!(employee.employee_id, Some(1));

        assert!(loader.resolve_token("nope").is_none());
    }

    #[test]
    fn test_seed_employees_loaded_sorted() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let ids: Vec<u64> = loader.config().seed_employees().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(XtrackError::ConfigNotFound { path }) => {
                assert!(path.contains("app.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
