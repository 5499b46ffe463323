//! Data Transfer Objects for the orchestrator's HTTP API
//!
//! Field names follow the camelCase convention of the existing web callers.

pub mod convert;
pub mod session;
