//! Sculpt Core
//!
//! Core types shared by the Sculpt image-to-3D services.
//!
//! This crate contains:
//! - Domain types: conversion jobs, provider statuses, task outcomes and sessions
//! - DTOs: the JSON shapes exchanged between callers and the orchestrator

pub mod domain;
pub mod dto;
