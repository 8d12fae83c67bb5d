pub mod composer;
pub mod feed;
pub mod nearby;
pub mod pager;
pub mod system;
pub mod vibes;

use crate::domain::entity::{NearbyUser, Post, Vibe};
use crate::infrastructure::config::Config;

pub use composer::ComposerState;
pub use feed::FeedState;
pub use nearby::NearbyState;
pub use system::{Screen, SystemState};
pub use vibes::VibesState;

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub feed: FeedState,
    pub vibes: VibesState,
    pub nearby: NearbyState,
    pub composer: ComposerState,
    pub system: SystemState,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    /// Initialize AppState with the specified config
    pub fn new_with_config(config: Config) -> Self {
        Self {
            config: ConfigState { config },
            ..Default::default()
        }
    }

    /// Get the selected post in the feed
    pub fn selected_post(&self) -> Option<&Post> {
        self.feed
            .selected_index
            .and_then(|i| self.feed.pager.items().get(i))
    }

    /// Get the vibe currently filling the screen
    pub fn current_vibe(&self) -> Option<&Vibe> {
        self.vibes.current_vibe()
    }

    /// Get the selected user on the nearby screen
    pub fn selected_nearby_user(&self) -> Option<&NearbyUser> {
        self.nearby
            .selected_index
            .and_then(|i| self.nearby.pager.items().get(i))
    }
}
