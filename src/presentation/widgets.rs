//! Reusable rendering widgets

pub mod engagement_stats;
pub mod post_card;
pub mod story_rail;
pub mod tab_bar;
pub mod vibe_card;
