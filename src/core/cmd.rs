use serde::{Deserialize, Serialize};

use crate::core::state::pager::FetchKind;
use crate::domain::entity::{PostId, UserId, VibeId};
use crate::domain::page::PageRequest;
use crate::domain::richtext::SubmitPayload;

/// Engagement actions sent fire-and-forget. The UI state has already been
/// flipped optimistically by the time one of these is executed; the outcome
/// is only logged, never folded back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngagementAction {
    LikePost { id: PostId, liked: bool },
    SavePost { id: PostId, saved: bool },
    LikeVibe { id: VibeId, liked: bool },
    BlockUser { id: UserId, blocked: bool },
}

/// Elm-like command definitions
/// Represents side effects (network communication, file I/O, etc.)
/// Cmd captures application intent (what to do) while the executor in the
/// infrastructure layer captures execution details (how to do it). Keeping
/// the layers separate keeps the core testable without I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cmd {
    // Paginated fetches; kind/generation are echoed back in the result Msg
    FetchPosts {
        request: PageRequest,
        kind: FetchKind,
        generation: u64,
    },
    FetchVibes {
        request: PageRequest,
        kind: FetchKind,
        generation: u64,
    },
    FetchNearby {
        request: PageRequest,
        kind: FetchKind,
        generation: u64,
    },
    FetchStories,

    // Mention autocomplete lookup for the composer
    SearchUsers {
        query: String,
    },

    // Mutations
    SendEngagement {
        action: EngagementAction,
    },
    SubmitPost {
        payload: SubmitPayload,
    },

    // Browser-style collaborators
    RequestLocation,

    // Logging related
    LogError {
        message: String,
    },
    LogInfo {
        message: String,
    },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        match commands.len() {
            0 => Cmd::None,
            1 => commands.into_iter().next().unwrap_or(Cmd::None),
            _ => Cmd::Batch(commands),
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::FetchPosts { .. }
            | Cmd::FetchVibes { .. }
            | Cmd::FetchNearby { .. }
            | Cmd::FetchStories
            | Cmd::SearchUsers { .. }
            | Cmd::SendEngagement { .. }
            | Cmd::SubmitPost { .. }
            | Cmd::RequestLocation => true,

            Cmd::LogError { .. } | Cmd::LogInfo { .. } | Cmd::None => false,

            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.is_async()),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            // User-visible mutations first
            Cmd::SendEngagement { .. } | Cmd::SubmitPost { .. } => 0,

            // Page fetches and interactive lookups next
            Cmd::FetchPosts { .. }
            | Cmd::FetchVibes { .. }
            | Cmd::FetchNearby { .. }
            | Cmd::FetchStories
            | Cmd::SearchUsers { .. } => 1,

            Cmd::RequestLocation => 2,

            // Logging has lowest priority
            Cmd::LogError { .. } | Cmd::LogInfo { .. } => 3,

            // Batch takes highest priority of contained commands
            Cmd::Batch(cmds) => cmds.iter().map(|cmd| cmd.priority()).min().unwrap_or(255),

            Cmd::None => 255,
        }
    }
}
