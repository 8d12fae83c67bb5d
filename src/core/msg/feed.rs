use serde::{Deserialize, Serialize};

use crate::core::state::pager::FetchKind;
use crate::domain::entity::{Post, PostId, Story};
use crate::domain::page::Page;

/// Messages specific to the timeline feed screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedMsg {
    // Fetch lifecycle
    LoadInitial,
    LoadMore,
    Refresh,
    PageLoaded {
        kind: FetchKind,
        generation: u64,
        page: Page<Post>,
    },
    PageFailed {
        kind: FetchKind,
        generation: u64,
        error: String,
    },
    StoriesLoaded(Vec<Story>),

    // Scroll operations
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ViewportResized(u16),

    // Optimistic engagement
    ToggleLike(PostId),
    ToggleSave(PostId),
}

impl FeedMsg {
    /// Determine if this is a frequent message during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, FeedMsg::ScrollUp | FeedMsg::ScrollDown)
    }
}
