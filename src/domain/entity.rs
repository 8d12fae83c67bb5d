use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything fetched from the remote API that carries a stable unique
/// identifier. The identifier is the de-duplication key for merged pages.
pub trait Entity {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn id(&self) -> Self::Id;
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(PostId);
id_newtype!(VibeId);
id_newtype!(UserId);
id_newtype!(StoryId);

/// Media attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Attachment {
    Image { url: String },
    Video { url: String },
}

/// Poll summary as rendered in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
}

/// Scheduled-event summary as rendered in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub venue: Option<String>,
}

/// Geographic point attached to a post or reported by the nearby screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A post in the timeline feed.
///
/// Engagement flags are owned by the entity itself and flipped optimistically:
/// the UI never waits for the server before updating them, and never rolls
/// them back (see `toggle_like`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub author_handle: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub poll: Option<Poll>,
    #[serde(default)]
    pub event: Option<EventInfo>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub saved: bool,
}

impl Post {
    /// Flip the like flag and move the visible count in lockstep.
    /// Toggling twice restores both the flag and the count, regardless of
    /// whether the matching network call ever succeeds.
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        if self.liked {
            self.like_count = self.like_count.saturating_add(1);
        } else {
            self.like_count = self.like_count.saturating_sub(1);
        }
        self.liked
    }

    pub fn toggle_saved(&mut self) -> bool {
        self.saved = !self.saved;
        self.saved
    }
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id.clone()
    }
}

/// A single item in the short-video swipe feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vibe {
    pub id: VibeId,
    pub author: UserId,
    pub author_handle: String,
    pub caption: String,
    pub video_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub liked: bool,
}

impl Vibe {
    pub fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        if self.liked {
            self.like_count = self.like_count.saturating_add(1);
        } else {
            self.like_count = self.like_count.saturating_sub(1);
        }
        self.liked
    }
}

impl Entity for Vibe {
    type Id = VibeId;

    fn id(&self) -> VibeId {
        self.id.clone()
    }
}

/// A user on the nearby-discovery screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyUser {
    pub id: UserId,
    pub handle: String,
    pub display_name: String,
    pub distance_meters: u32,
    #[serde(default)]
    pub blocked: bool,
}

impl NearbyUser {
    pub fn toggle_blocked(&mut self) -> bool {
        self.blocked = !self.blocked;
        self.blocked
    }
}

impl Entity for NearbyUser {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id.clone()
    }
}

/// A user record returned by the mention autocomplete search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub handle: String,
    pub display_name: String,
}

/// An ephemeral story shown in the rail above the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub author: UserId,
    pub author_handle: String,
    pub media_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub seen: bool,
}

impl Story {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl Entity for Story {
    type Id = StoryId;

    fn id(&self) -> StoryId {
        self.id.clone()
    }
}
