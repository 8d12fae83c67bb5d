use serde::{Deserialize, Serialize};

use crate::domain::entity::{EventInfo, GeoPoint, Poll, UserId, UserProfile};
use crate::domain::richtext::Audience;

/// Messages specific to the post composer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComposerMsg {
    /// The editor content changed; carries the full set of lines.
    ContentChanged(Vec<String>),
    /// Autocomplete picked a mention target for a display handle.
    InsertMention { target: UserId, display: String },
    /// Look up mention candidates for the `@prefix` the draft ends with.
    RequestMentionSuggestions,
    /// Search results for the pending mention prefix.
    MentionSuggestionsLoaded(Vec<UserProfile>),

    CycleAudience,
    AttachImage(String),
    AttachVideo(String),
    SetPoll(Poll),
    SetEvent(EventInfo),
    SetLocation(GeoPoint),
    SetAudience(Audience),

    Submit,
    SubmitSucceeded,
    SubmitFailed(String),
    Discard,
}

impl ComposerMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, ComposerMsg::ContentChanged(_))
    }
}
