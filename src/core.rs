//! Core Elm Architecture implementation
//!
//! This module contains the core components of the Elm architecture:
//! - Messages describing application intent
//! - Application state management
//! - Update logic and command execution

pub mod cmd;
pub mod cmd_executor;
pub mod msg;
pub mod state;
pub mod update;
