//! Xtrack HR service
//!
//! This crate provides the systems of record of a small HR service
//! (employees, leave requests, holidays and attendance), the monthly salary
//! aggregation derived from them, a REST API over both, and a typed client
//! for that API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod telemetry;
