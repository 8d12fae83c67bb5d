//! Stateless screen components
//!
//! Each component renders a slice of `AppState`. No component keeps UI
//! state of its own except the composer, which owns a text area.

pub mod composer;
pub mod feed;
pub mod nearby;
pub mod status_bar;
pub mod vibes;
