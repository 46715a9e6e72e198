//! Leave entitlement engine for an HR management system
//!
//! This crate evaluates employee leave requests against tenure rules,
//! per-type entitlements and the shared Service Incentive Leave bucket,
//! splitting each request into paid and unpaid days. Around the engine it
//! provides the manager evaluation report renderer, an authenticated client
//! for the HR REST API with request scoping and a TTL cache, dashboard
//! aggregation and client-side form validation.

#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod calculation;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod models;
pub mod report;
