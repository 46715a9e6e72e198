//! Configuration loading and management for the HRMS engine.
//!
//! This module provides functionality to load leave policy from YAML files:
//! the leave-type catalog, tenure and SIL rules, upload limits and cache
//! lifetimes.
//!
//! # Example
//!
//! ```no_run
//! use hrms_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/policy").unwrap();
//! println!("Leave types: {}", config.catalog().leave_types().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CachePolicy, CashAdvancePolicy, GracePolicy, LeaveRules, LeaveTypeCatalog, LeaveTypeConfig,
    PolicyConfig, SilPolicy, TenurePolicy, UploadPolicy,
};
