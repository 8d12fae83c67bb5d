// Integration tests for the vibes swipe feed
// Covers lookahead prefetch and the loop-back-to-start behavior at end of
// data, driven through the top-level update function.

use chrono::{TimeZone, Utc};
use flowtui::{
    core::{
        cmd::Cmd,
        msg::{system::SystemMsg, vibes::VibesMsg, Msg},
        state::{pager::FetchKind, AppState, Screen},
        update::update,
    },
    domain::{
        entity::{UserId, Vibe, VibeId},
        page::{Cursor, Page},
    },
};

fn vibe(id: &str) -> Vibe {
    Vibe {
        id: VibeId::from(id),
        author: UserId::from("u1"),
        author_handle: "carol".to_owned(),
        caption: format!("vibe {id}"),
        video_url: format!("https://cdn.example/{id}.mp4"),
        created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts"),
        like_count: 0,
        liked: false,
    }
}

fn page(ids: &[&str], next: Option<&str>) -> Page<Vibe> {
    Page::new(ids.iter().map(|id| vibe(id)).collect(), next.map(Cursor::from))
}

fn loaded(kind: FetchKind, generation: u64, page: Page<Vibe>) -> Msg {
    Msg::Vibes(VibesMsg::PageLoaded {
        kind,
        generation,
        page,
    })
}

fn vibe_ids(state: &AppState) -> Vec<String> {
    state
        .vibes
        .pager
        .items()
        .iter()
        .map(|v| v.id.as_str().to_owned())
        .collect()
}

#[test]
fn test_swiping_near_tail_prefetches_next_page() {
    let state = AppState::default();
    let (state, cmds) = update(Msg::Vibes(VibesMsg::LoadInitial), state);
    let generation = match &cmds[0] {
        Cmd::FetchVibes { generation, .. } => *generation,
        other => panic!("expected vibes fetch, got {other:?}"),
    };
    let (state, _) = update(
        loaded(
            FetchKind::Initial,
            generation,
            page(&["1", "2", "3", "4", "5"], Some("c1")),
        ),
        state,
    );

    // Advancing to index 2 puts the lookahead past the tail
    let (state, cmds) = update(Msg::Vibes(VibesMsg::NextVibe), state);
    assert!(cmds.is_empty());
    let (state, cmds) = update(Msg::Vibes(VibesMsg::NextVibe), state);
    assert!(matches!(
        cmds[..],
        [Cmd::FetchVibes {
            kind: FetchKind::More,
            ..
        }]
    ));
    assert_eq!(state.vibes.current_index, 2);
}

#[test]
fn test_end_of_data_wraps_to_fresh_first_page() {
    let state = AppState::default();
    let (state, cmds) = update(Msg::Vibes(VibesMsg::LoadInitial), state);
    let generation = match &cmds[0] {
        Cmd::FetchVibes { generation, .. } => *generation,
        other => panic!("expected vibes fetch, got {other:?}"),
    };
    let (state, _) = update(
        loaded(FetchKind::Initial, generation, page(&["1", "2"], None)),
        state,
    );
    assert!(!state.vibes.pager.has_more());

    // Swiping at the end issues a first-page fetch tagged as a loop
    let (state, cmds) = update(Msg::Vibes(VibesMsg::NextVibe), state);
    let generation = match &cmds[..] {
        [Cmd::FetchVibes {
            request,
            kind: FetchKind::Loop,
            generation,
        }] => {
            assert!(request.cursor.is_empty());
            *generation
        }
        other => panic!("expected loop fetch, got {other:?}"),
    };

    // The looped page appends after the current tail, duplicates dropped
    let (state, _) = update(
        loaded(FetchKind::Loop, generation, page(&["1", "3"], Some("c1"))),
        state,
    );
    assert_eq!(vibe_ids(&state), vec!["1", "2", "3"]);
    assert!(state.vibes.pager.has_more());

    // The user keeps swiping into the appended items
    let (state, _) = update(Msg::Vibes(VibesMsg::NextVibe), state);
    assert_eq!(state.vibes.current_index, 2);
}

#[test]
fn test_leaving_vibes_screen_discards_list() {
    let mut state = AppState::default();
    state.system.active_screen = Screen::Vibes;
    let (state, cmds) = update(Msg::Vibes(VibesMsg::LoadInitial), state);
    let generation = match &cmds[0] {
        Cmd::FetchVibes { generation, .. } => *generation,
        other => panic!("expected vibes fetch, got {other:?}"),
    };
    let (state, _) = update(
        loaded(FetchKind::Initial, generation, page(&["1", "2"], Some("c1"))),
        state,
    );
    assert_eq!(vibe_ids(&state).len(), 2);

    // Switching away resets the vibes state wholesale
    let (state, _) = update(Msg::System(SystemMsg::ShowScreen(Screen::Feed)), state);
    assert!(state.vibes.pager.items().is_empty());
    assert_eq!(state.vibes.current_index, 0);

    // Coming back starts a fresh initial load
    let (state, cmds) = update(Msg::System(SystemMsg::ShowScreen(Screen::Vibes)), state);
    assert!(cmds
        .iter()
        .any(|cmd| matches!(cmd, Cmd::FetchVibes { kind: FetchKind::Initial, .. })));
    assert_eq!(state.system.active_screen, Screen::Vibes);
}
