use serde::{Deserialize, Serialize};

use crate::core::state::system::Screen;

/// Messages for application-level concerns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemMsg {
    Quit,
    Suspend,
    Resume,
    ShowScreen(Screen),
    UpdateStatusMessage(String),
    ClearStatusMessage,
    ShowError(String),
    Resize { width: u16, height: u16 },
    Tick,
}

impl SystemMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, SystemMsg::Tick)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_msg_frequent_detection() {
        assert!(SystemMsg::Tick.is_frequent());
        assert!(!SystemMsg::Quit.is_frequent());
    }

    #[test]
    fn test_system_msg_serialization() {
        let msg = SystemMsg::ShowScreen(Screen::Vibes);
        let serialized = serde_json::to_string(&msg).expect("serializes");
        let deserialized: SystemMsg = serde_json::from_str(&serialized).expect("deserializes");
        assert_eq!(msg, deserialized);
    }
}
