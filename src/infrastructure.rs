//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - TUI foundation
//! - CLI argument processing
//! - Flows API access
//! - Location resolution

pub mod api;
pub mod cli;
pub mod config;
pub mod geo;
pub mod tui;
