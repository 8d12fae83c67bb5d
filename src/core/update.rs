use crate::{
    core::cmd::Cmd,
    core::msg::{
        composer::ComposerMsg, feed::FeedMsg, nearby::NearbyMsg, system::SystemMsg,
        vibes::VibesMsg, Msg,
    },
    core::state::{AppState, FeedState, Screen, VibesState},
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
///
/// Most messages delegate straight to the owning state. The cross-concern
/// cases live here: screen switches reset or load other screens' state, and
/// composer outcomes touch the feed and the status bar.
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        // Screen switches. Feed and vibes are ephemeral and restart from a
        // fresh first page on re-entry; nearby is process-wide and the
        // composer keeps its draft.
        Msg::System(SystemMsg::ShowScreen(screen)) => {
            let previous = state.system.active_screen;
            if previous == screen {
                return (state, vec![]);
            }
            match previous {
                Screen::Feed => state.feed = FeedState::default(),
                Screen::Vibes => state.vibes = VibesState::default(),
                Screen::Nearby | Screen::Composer => {}
            }

            let mut commands = state.system.update(SystemMsg::ShowScreen(screen));
            commands.extend(match screen {
                Screen::Feed => state.feed.update(FeedMsg::LoadInitial),
                Screen::Vibes => state.vibes.update(VibesMsg::LoadInitial),
                Screen::Nearby => state.nearby.update(NearbyMsg::Enter),
                Screen::Composer => vec![],
            });
            (state, commands)
        }

        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        // Engagement toggles also report to the status bar
        Msg::Feed(FeedMsg::ToggleLike(id)) => {
            let commands = state.feed.update(FeedMsg::ToggleLike(id.clone()));
            if let Some(post) = state.feed.pager.items().iter().find(|p| p.id == id) {
                state.system.status_message = Some(if post.liked {
                    "[Liked]".to_owned()
                } else {
                    "[Like removed]".to_owned()
                });
            }
            (state, commands)
        }

        Msg::Feed(FeedMsg::ToggleSave(id)) => {
            let commands = state.feed.update(FeedMsg::ToggleSave(id.clone()));
            if let Some(post) = state.feed.pager.items().iter().find(|p| p.id == id) {
                state.system.status_message = Some(if post.saved {
                    "[Saved]".to_owned()
                } else {
                    "[Removed from saved]".to_owned()
                });
            }
            (state, commands)
        }

        Msg::Feed(feed_msg) => {
            let commands = state.feed.update(feed_msg);
            (state, commands)
        }

        Msg::Vibes(vibes_msg) => {
            let commands = state.vibes.update(vibes_msg);
            (state, commands)
        }

        Msg::Nearby(nearby_msg) => {
            let commands = state.nearby.update(nearby_msg);
            (state, commands)
        }

        // A successful submit clears the draft, jumps back to a refreshed
        // feed and confirms in the status bar
        Msg::Composer(ComposerMsg::SubmitSucceeded) => {
            let mut commands = state.composer.update(ComposerMsg::SubmitSucceeded);
            state.system.active_screen = Screen::Feed;
            state.system.status_message = Some("[Posted]".to_owned());
            commands.extend(state.feed.update(FeedMsg::Refresh));
            (state, commands)
        }

        Msg::Composer(ComposerMsg::SubmitFailed(error)) => {
            let mut commands = state
                .composer
                .update(ComposerMsg::SubmitFailed(error.clone()));
            state.system.status_message = Some(format!("Error: {error}"));
            (state, commands)
        }

        Msg::Composer(composer_msg) => {
            let commands = state.composer.update(composer_msg);
            (state, commands)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::state::pager::FetchKind;
    use crate::domain::entity::{Post, PostId, UserId};
    use crate::domain::page::{Cursor, Page};

    fn post(id: &str) -> Post {
        Post {
            id: PostId::from(id),
            author: UserId::from("u1"),
            author_handle: "alice".to_owned(),
            content: format!("post {id}"),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts"),
            attachments: vec![],
            poll: None,
            event: None,
            location: None,
            like_count: 0,
            comment_count: 0,
            liked: false,
            saved: false,
        }
    }

    fn state_with_feed(ids: &[&str]) -> AppState {
        let mut state = AppState::default();
        let _ = state.feed.update(FeedMsg::LoadInitial);
        let _ = state.feed.update(FeedMsg::PageLoaded {
            kind: FetchKind::Initial,
            generation: 0,
            page: Page::new(
                ids.iter().map(|id| post(id)).collect(),
                Some(Cursor::from("c1")),
            ),
        });
        state
    }

    #[test]
    fn test_system_quit_delegates() {
        let state = AppState::default();

        let (state, cmds) = update(Msg::System(SystemMsg::Quit), state);

        assert!(state.system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_switching_to_vibes_loads_and_resets_feed() {
        let state = state_with_feed(&["1", "2"]);

        let (state, cmds) = update(Msg::System(SystemMsg::ShowScreen(Screen::Vibes)), state);

        assert_eq!(state.system.active_screen, Screen::Vibes);
        // The feed was reset on the way out
        assert!(state.feed.pager.items().is_empty());
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], Cmd::FetchVibes { .. }));
    }

    #[test]
    fn test_switching_to_same_screen_is_noop() {
        let state = state_with_feed(&["1"]);

        let (state, cmds) = update(Msg::System(SystemMsg::ShowScreen(Screen::Feed)), state);

        assert!(cmds.is_empty());
        assert_eq!(state.feed.pager.items().len(), 1);
    }

    #[test]
    fn test_returning_to_nearby_preserves_state() {
        let mut state = AppState::default();
        let _ = state.nearby.update(NearbyMsg::Enter);
        let _ = state.nearby.update(NearbyMsg::PageLoaded {
            kind: FetchKind::Initial,
            generation: 0,
            page: Page::new(vec![], None),
        });
        state.system.active_screen = Screen::Nearby;

        let (state, _) = update(Msg::System(SystemMsg::ShowScreen(Screen::Feed)), state);
        let (state, cmds) = update(Msg::System(SystemMsg::ShowScreen(Screen::Nearby)), state);

        // Already loaded once: Enter does not fetch again
        assert!(cmds.is_empty());
        assert_eq!(state.system.active_screen, Screen::Nearby);
    }

    #[test]
    fn test_toggle_like_sets_status_message() {
        let state = state_with_feed(&["1"]);

        let (state, cmds) = update(Msg::Feed(FeedMsg::ToggleLike(PostId::from("1"))), state);

        assert_eq!(state.system.status_message, Some("[Liked]".to_owned()));
        assert_eq!(cmds.len(), 1);

        let (state, _) = update(Msg::Feed(FeedMsg::ToggleLike(PostId::from("1"))), state);
        assert_eq!(
            state.system.status_message,
            Some("[Like removed]".to_owned())
        );
    }

    #[test]
    fn test_submit_succeeded_returns_to_refreshed_feed() {
        let mut state = state_with_feed(&["1"]);
        state.system.active_screen = Screen::Composer;
        state.composer.lines = vec!["hello".to_owned()];
        let _ = state.composer.update(ComposerMsg::Submit);

        let (state, cmds) = update(Msg::Composer(ComposerMsg::SubmitSucceeded), state);

        assert_eq!(state.system.active_screen, Screen::Feed);
        assert_eq!(state.system.status_message, Some("[Posted]".to_owned()));
        assert!(state.composer.lines.is_empty());
        // Feed refresh fetch went out
        assert!(cmds
            .iter()
            .any(|cmd| matches!(cmd, Cmd::FetchPosts { kind: FetchKind::Initial, .. })));
    }

    #[test]
    fn test_submit_failed_surfaces_error() {
        let mut state = AppState::default();
        state.composer.lines = vec!["hello".to_owned()];
        let _ = state.composer.update(ComposerMsg::Submit);

        let (state, _) = update(
            Msg::Composer(ComposerMsg::SubmitFailed("timeout".to_owned())),
            state,
        );

        assert_eq!(state.system.status_message, Some("Error: timeout".to_owned()));
        assert!(!state.composer.is_submitting);
        assert_eq!(state.composer.lines, vec!["hello".to_owned()]);
    }
}
