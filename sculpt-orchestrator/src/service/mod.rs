//! Service Module
//!
//! Business logic layer on top of the orchestrator.

pub mod session;

// Re-export for convenience
pub use session as session_service;
