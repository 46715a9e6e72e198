//! Error types for the HRMS leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while evaluating leave policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::LeaveStatus;

/// The main error type for the leave engine.
///
/// All engine operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hrms_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The leave type is not part of the catalog.
    #[error("Unknown leave type: {name}")]
    UnknownLeaveType {
        /// The leave type name that was not found.
        name: String,
    },

    /// The end date of a leave request falls before its start date.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A leave request was missing a field or carried an inconsistent value.
    #[error("Invalid leave request field '{field}': {message}")]
    InvalidLeaveRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave type with a hard cap was requested for more days than allowed.
    #[error("{leave_type} allows a maximum of {limit} days per year; {requested} days were requested")]
    DayLimitExceeded {
        /// The leave type name.
        leave_type: String,
        /// The number of days requested.
        requested: Decimal,
        /// The entitlement that was exceeded.
        limit: Decimal,
    },

    /// The requested range intersects an existing active request.
    #[error("Leave request overlaps an existing {status} request from {existing_start} to {existing_end}")]
    OverlappingLeave {
        /// Start date of the conflicting request.
        existing_start: NaiveDate,
        /// End date of the conflicting request.
        existing_end: NaiveDate,
        /// Status of the conflicting request.
        status: LeaveStatus,
    },

    /// The waiting period after the previous leave has not yet elapsed.
    #[error("A new leave may start on or after {eligible_date}; the previous leave ended on {previous_end}")]
    CooldownActive {
        /// End date of the most recent approved or completed leave.
        previous_end: NaiveDate,
        /// First date a new leave may start.
        eligible_date: NaiveDate,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
