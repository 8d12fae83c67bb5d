//! Presentation layer: components, widgets and UI configuration

pub mod components;
pub mod config;
pub mod widgets;
