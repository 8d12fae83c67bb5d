use serde::{Deserialize, Serialize};

pub mod composer;
pub mod feed;
pub mod nearby;
pub mod system;
pub mod vibes;

use composer::ComposerMsg;
use feed::FeedMsg;
use nearby::NearbyMsg;
use system::SystemMsg;
use vibes::VibesMsg;

/// Domain messages representing application intent and business logic
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // Feed operations (delegated to FeedState)
    Feed(FeedMsg),

    // Short-video operations (delegated to VibesState)
    Vibes(VibesMsg),

    // Nearby-users operations (delegated to NearbyState)
    Nearby(NearbyMsg),

    // Composer operations (delegated to ComposerState)
    Composer(ComposerMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(msg) => msg.is_frequent(),
            Msg::Feed(msg) => msg.is_frequent(),
            Msg::Vibes(msg) => msg.is_frequent(),
            Msg::Nearby(msg) => msg.is_frequent(),
            Msg::Composer(msg) => msg.is_frequent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_msg_frequent_detection() {
        assert!(Msg::System(SystemMsg::Tick).is_frequent());
        assert!(!Msg::System(SystemMsg::Quit).is_frequent());
        assert!(Msg::Feed(FeedMsg::ScrollDown).is_frequent());
        assert!(!Msg::Feed(FeedMsg::Refresh).is_frequent());
    }

    #[test]
    fn test_msg_equality() {
        assert_eq!(Msg::System(SystemMsg::Quit), Msg::System(SystemMsg::Quit));
        assert_ne!(
            Msg::Feed(FeedMsg::ScrollUp),
            Msg::Feed(FeedMsg::ScrollDown)
        );
    }

    #[test]
    fn test_msg_serialization() {
        let msg = Msg::System(SystemMsg::UpdateStatusMessage("test".to_owned()));
        let serialized = serde_json::to_string(&msg).expect("serializes");
        let deserialized: Msg = serde_json::from_str(&serialized).expect("deserializes");
        assert_eq!(msg, deserialized);
    }
}
