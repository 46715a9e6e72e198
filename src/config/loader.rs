//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave policy
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{LeaveTypeCatalog, LeaveTypeConfig, LeaveTypesConfig, PolicyConfig};

/// Loads and provides access to leave policy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/policy/
/// ├── leave_types.yaml   # Leave types and yearly entitlements
/// └── policy.yaml        # Tenure, SIL, cooldown, uploads, cache TTLs
/// ```
///
/// # Example
///
/// ```no_run
/// use hrms_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/policy").unwrap();
/// let sick = loader.get_leave_type("Sick Leave").unwrap();
/// println!("Sick leave entitlement: {} days", sick.max_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: LeaveTypeCatalog,
    policy: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    ///
    /// ```no_run
    /// use hrms_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/policy")?;
    /// # Ok::<(), hrms_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;
        if leave_types.leave_types.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: path.join("leave_types.yaml").display().to_string(),
                message: "no leave types defined".to_string(),
            });
        }

        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;

        Ok(Self {
            catalog: LeaveTypeCatalog::new(leave_types.leave_types),
            policy,
        })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_parts(catalog: LeaveTypeCatalog, policy: PolicyConfig) -> Self {
        Self { catalog, policy }
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

    /// Returns the leave-type catalog.
    pub fn catalog(&self) -> &LeaveTypeCatalog {
        &self.catalog
    }

    /// Returns the policy configuration.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Gets a leave type by name, or `UnknownLeaveType`.
    pub fn get_leave_type(&self, name: &str) -> EngineResult<&LeaveTypeConfig> {
        self.catalog.get(name)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_parts(LeaveTypeCatalog::default(), PolicyConfig::default())
    }
}
