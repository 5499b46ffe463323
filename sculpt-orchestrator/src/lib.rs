//! Sculpt Orchestrator
//!
//! Drives asynchronous image-to-3D conversions on an external provider and
//! exposes them over HTTP.
//!
//! Architecture:
//! - Provider: the remote conversion service behind a trait (Meshy over HTTP)
//! - Orchestrator: the per-request polling state machine and its driver
//! - Service: background sessions with observable status and cancellation
//! - API: axum handlers for blocking and session-based conversions

pub mod api;
pub mod config;
pub mod orchestrator;
pub mod provider;
pub mod service;
