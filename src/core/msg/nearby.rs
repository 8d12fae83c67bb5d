use serde::{Deserialize, Serialize};

use crate::core::state::pager::FetchKind;
use crate::domain::entity::{GeoPoint, NearbyUser, UserId};
use crate::domain::page::Page;

/// Messages specific to the nearby-users discovery screen.
///
/// Unlike the feed and vibes screens, nearby state is process-wide: `Enter`
/// only fetches when nothing has been loaded yet, so switching tabs and
/// returning preserves the list, the cursor and the scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NearbyMsg {
    Enter,
    LoadMore,
    Refresh,
    PageLoaded {
        kind: FetchKind,
        generation: u64,
        page: Page<NearbyUser>,
    },
    PageFailed {
        kind: FetchKind,
        generation: u64,
        error: String,
    },

    ScrollUp,
    ScrollDown,

    ToggleBlock(UserId),

    // Geolocation outcomes
    LocationResolved(GeoPoint),
    LocationFailed(String),
    DismissAlert,
}

impl NearbyMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, NearbyMsg::ScrollUp | NearbyMsg::ScrollDown)
    }
}
