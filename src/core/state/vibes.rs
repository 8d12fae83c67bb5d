use crate::core::cmd::{Cmd, EngagementAction};
use crate::core::msg::vibes::VibesMsg;
use crate::core::state::pager::{FetchPlan, Pager};
use crate::domain::entity::Vibe;
use crate::domain::page::PageRequest;
use crate::domain::trigger::{IndexDecision, IndexTrigger};

/// How many vibes one page request asks for.
pub const VIBES_PAGE_SIZE: u32 = 10;

/// Short-video swipe feed state. One vibe fills the screen at a time, so the
/// prefetch trigger works on the current index rather than scroll geometry,
/// and running past the end of data loops back to a fresh first page.
#[derive(Debug, Clone)]
pub struct VibesState {
    pub pager: Pager<Vibe>,
    pub current_index: usize,
    trigger: IndexTrigger,
}

impl Default for VibesState {
    fn default() -> Self {
        Self {
            pager: Pager::new(VIBES_PAGE_SIZE),
            current_index: 0,
            trigger: IndexTrigger::looping(),
        }
    }
}

impl VibesState {
    fn fetch_cmd(plan: FetchPlan) -> Cmd {
        Cmd::FetchVibes {
            request: PageRequest::new(plan.limit, plan.cursor),
            kind: plan.kind,
            generation: plan.generation,
        }
    }

    pub fn current_vibe(&self) -> Option<&Vibe> {
        self.pager.items().get(self.current_index)
    }

    /// Vibes-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: VibesMsg) -> Vec<Cmd> {
        match msg {
            VibesMsg::LoadInitial => match self.pager.load_initial() {
                Some(plan) => vec![Self::fetch_cmd(plan)],
                None => vec![],
            },

            VibesMsg::Refresh => {
                self.current_index = 0;
                match self.pager.refresh() {
                    Some(plan) => vec![Self::fetch_cmd(plan)],
                    None => vec![],
                }
            }

            VibesMsg::PageLoaded {
                kind,
                generation,
                page,
            } => {
                self.pager.on_page_loaded(kind, generation, page);
                let len = self.pager.items().len();
                if len == 0 {
                    self.current_index = 0;
                } else if self.current_index >= len {
                    self.current_index = len - 1;
                }
                vec![]
            }

            VibesMsg::PageFailed {
                kind,
                generation,
                error,
            } => {
                self.pager.on_page_failed(kind, generation, error);
                vec![]
            }

            VibesMsg::NextVibe => {
                let len = self.pager.items().len();
                if len == 0 {
                    return vec![];
                }
                self.current_index = (self.current_index + 1).min(len - 1);

                match self
                    .trigger
                    .observe(self.current_index, len, self.pager.guards())
                {
                    IndexDecision::LoadMore => match self.pager.load_more() {
                        Some(plan) => vec![Self::fetch_cmd(plan)],
                        None => vec![],
                    },
                    IndexDecision::LoopRestart => match self.pager.loop_restart() {
                        Some(plan) => vec![Self::fetch_cmd(plan)],
                        None => vec![],
                    },
                    IndexDecision::Stay => vec![],
                }
            }

            VibesMsg::PrevVibe => {
                self.current_index = self.current_index.saturating_sub(1);
                vec![]
            }

            VibesMsg::ToggleLike(id) => match self.pager.items_mut().find_mut(&id) {
                Some(vibe) => {
                    let liked = vibe.toggle_like();
                    vec![Cmd::SendEngagement {
                        action: EngagementAction::LikeVibe { id, liked },
                    }]
                }
                None => vec![],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::state::pager::FetchKind;
    use crate::domain::entity::{UserId, VibeId};
    use crate::domain::page::{Cursor, Page};

    fn vibe(id: &str) -> Vibe {
        Vibe {
            id: VibeId::from(id),
            author: UserId::from("u1"),
            author_handle: "alice".to_owned(),
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

    fn loaded(kind: FetchKind, page: Page<Vibe>) -> VibesMsg {
        VibesMsg::PageLoaded {
            kind,
            generation: 0,
            page,
        }
    }

    fn ids(state: &VibesState) -> Vec<&str> {
        state.pager.items().iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_load_initial() {
        let mut vibes = VibesState::default();

        let cmds = vibes.update(VibesMsg::LoadInitial);

        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            cmds[0],
            Cmd::FetchVibes {
                kind: FetchKind::Initial,
                ..
            }
        ));
    }

    #[test]
    fn test_next_vibe_advances_and_prefetches() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(
            FetchKind::Initial,
            page(&["1", "2", "3", "4", "5", "6"], Some("c1")),
        ));

        // index 0 -> 1: 1 + 3 < 6, no prefetch yet
        assert!(vibes.update(VibesMsg::NextVibe).is_empty());
        // index 1 -> 2: 2 + 3 < 6 still quiet
        assert!(vibes.update(VibesMsg::NextVibe).is_empty());
        // index 2 -> 3: 3 + 3 >= 6 fires
        let cmds = vibes.update(VibesMsg::NextVibe);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(
            cmds[0],
            Cmd::FetchVibes {
                kind: FetchKind::More,
                ..
            }
        ));
    }

    #[test]
    fn test_next_vibe_clamps_at_end_while_loading() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(FetchKind::Initial, page(&["1", "2"], Some("c1"))));

        vibes.update(VibesMsg::NextVibe);
        // In flight now; advancing further neither refires nor overruns
        let cmds = vibes.update(VibesMsg::NextVibe);
        assert!(cmds.is_empty());
        assert_eq!(vibes.current_index, 1);
    }

    #[test]
    fn test_end_of_data_loops_back_to_first_page() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(FetchKind::Initial, page(&["1", "2"], None)));
        assert!(!vibes.pager.has_more());

        let cmds = vibes.update(VibesMsg::NextVibe);

        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            Cmd::FetchVibes { request, kind, .. } => {
                assert_eq!(*kind, FetchKind::Loop);
                assert!(request.cursor.is_empty());
            }
            other => panic!("expected loop fetch, got {other:?}"),
        }

        // The looped page is appended, duplicates dropped
        vibes.update(loaded(FetchKind::Loop, page(&["1", "3"], Some("c1"))));
        assert_eq!(ids(&vibes), vec!["1", "2", "3"]);
        assert!(vibes.pager.has_more());
    }

    #[test]
    fn test_prev_vibe_saturates_at_zero() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(FetchKind::Initial, page(&["1", "2"], None)));

        vibes.update(VibesMsg::PrevVibe);
        assert_eq!(vibes.current_index, 0);
    }

    #[test]
    fn test_refresh_resets_index() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(FetchKind::Initial, page(&["1", "2"], None)));
        vibes.update(VibesMsg::NextVibe);
        assert_eq!(vibes.current_index, 1);

        let cmds = vibes.update(VibesMsg::Refresh);
        assert_eq!(vibes.current_index, 0);
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_toggle_like_flips_current_vibe() {
        let mut vibes = VibesState::default();
        vibes.update(VibesMsg::LoadInitial);
        vibes.update(loaded(FetchKind::Initial, page(&["1"], None)));

        let cmds = vibes.update(VibesMsg::ToggleLike(VibeId::from("1")));

        let vibe = vibes.current_vibe().expect("vibe");
        assert!(vibe.liked);
        assert_eq!(vibe.like_count, 1);
        assert_eq!(
            cmds,
            vec![Cmd::SendEngagement {
                action: EngagementAction::LikeVibe {
                    id: VibeId::from("1"),
                    liked: true,
                },
            }]
        );
    }
}
