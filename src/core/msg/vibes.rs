use serde::{Deserialize, Serialize};

use crate::core::state::pager::FetchKind;
use crate::domain::entity::{Vibe, VibeId};
use crate::domain::page::Page;

/// Messages specific to the short-video swipe feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VibesMsg {
    LoadInitial,
    Refresh,
    PageLoaded {
        kind: FetchKind,
        generation: u64,
        page: Page<Vibe>,
    },
    PageFailed {
        kind: FetchKind,
        generation: u64,
        error: String,
    },

    // Snap-scroll navigation
    NextVibe,
    PrevVibe,

    ToggleLike(VibeId),
}

impl VibesMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, VibesMsg::NextVibe | VibesMsg::PrevVibe)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_vibes_msg_serialization() {
        let msg = VibesMsg::ToggleLike(VibeId::from("v1"));
        let serialized = serde_json::to_string(&msg).expect("serializes");
        let deserialized: VibesMsg = serde_json::from_str(&serialized).expect("deserializes");
        assert_eq!(msg, deserialized);
    }
}
