//! # Flowtui - Flows TUI Client
//!
//! A terminal client for the Flows social network, built with Rust and
//! Ratatui. The crate is organized around an Elm-like architecture for
//! predictable state management:
//!
//! - **Model** (`core::state`): Application state
//! - **Message** (`core::msg`): Events that can change the state
//! - **Update** (`core::update`): Pure functions that transform state
//! - **Command** (`core::cmd`): Side effects (network, geolocation)
//! - **View** (`presentation`): UI rendering based on current state
//!
//! ## Example Usage
//!
//! ```rust
//! use flowtui::core::{msg::{feed::FeedMsg, Msg}, state::AppState, update::update};
//!
//! let initial_state = AppState::default();
//!
//! // Process messages
//! let (new_state, commands) = update(Msg::Feed(FeedMsg::LoadInitial), initial_state);
//!
//! // State is now updated and commands contain side effects to execute
//! assert!(new_state.feed.pager.is_loading_initial());
//! assert!(!commands.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Messages, state, update functions and command execution
//! - [`domain`] - Entities, pagination, rich text and trigger logic
//! - [`infrastructure`] - HTTP API, configuration, geolocation, terminal
//! - [`presentation`] - Components, widgets and UI configuration

#![allow(dead_code)]

pub mod app;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod utils;

// Re-exports for convenience
pub use core::cmd::Cmd;
pub use core::msg::Msg;
pub use core::state::AppState;
pub use core::update::update;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
