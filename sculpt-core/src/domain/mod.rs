//! Core domain types
//!
//! These types describe a single image-to-3D conversion as seen by the
//! orchestrator: what the caller asked for, what the provider reports on
//! each poll, and what the caller finally gets back.

pub mod job;
pub mod outcome;
pub mod session;
