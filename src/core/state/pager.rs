//! Cursor-pagination state machine shared by the feed, vibes and nearby screens.

use crate::domain::collections::EntitySet;
use crate::domain::entity::Entity;
use crate::domain::page::{Cursor, Page};
use crate::domain::trigger::TriggerGuards;

/// Which fetch a page result belongs to. Determines how the result is folded
/// into the pager: `Initial` replaces the list, `More` appends with dedup,
/// `Loop` appends a first page to the tail (vibes perpetual scroll).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FetchKind {
    Initial,
    More,
    Loop,
}

/// A fetch the runtime should issue on behalf of a pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub cursor: Cursor,
    pub limit: u32,
    pub kind: FetchKind,
    pub generation: u64,
}

/// Per-screen pagination state: the item list, the continuation cursor, the
/// "has more" flag and the two loading flags.
///
/// Requests are serialized by the loading guards; there is never more than
/// one in-flight fetch per pager per direction and there is no cancellation.
/// A request that never resolves leaves its flag stuck until `refresh`
/// discards state. Stale responses are ignored via the generation counter,
/// which `refresh` bumps.
#[derive(Debug, Clone)]
pub struct Pager<T: Entity> {
    items: EntitySet<T>,
    cursor: Option<Cursor>,
    has_more: bool,
    is_loading_initial: bool,
    is_loading_more: bool,
    generation: u64,
    last_error: Option<String>,
    page_size: u32,
}

impl<T: Entity> Pager<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: EntitySet::new(),
            cursor: None,
            has_more: true,
            is_loading_initial: false,
            is_loading_more: false,
            generation: 0,
            last_error: None,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &EntitySet<T> {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut EntitySet<T> {
        &mut self.items
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_initial(&self) -> bool {
        self.is_loading_initial
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Error from the last failed initial load, shown as an error card with a
    /// retry affordance. Load-more failures never set this.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn guards(&self) -> TriggerGuards {
        TriggerGuards {
            has_more: self.has_more,
            is_loading_initial: self.is_loading_initial,
            is_loading_more: self.is_loading_more,
        }
    }

    /// Request the first page. No-op while any fetch is in flight.
    pub fn load_initial(&mut self) -> Option<FetchPlan> {
        if self.is_loading_initial || self.is_loading_more {
            return None;
        }
        self.is_loading_initial = true;
        Some(FetchPlan {
            cursor: Cursor::empty(),
            limit: self.page_size,
            kind: FetchKind::Initial,
            generation: self.generation,
        })
    }

    /// Request the next page. Silent no-op unless `has_more` is set, nothing
    /// is loading, and a non-empty cursor is present. Failing a guard is not
    /// an error; the caller simply gets nothing to do.
    pub fn load_more(&mut self) -> Option<FetchPlan> {
        if !self.has_more || self.is_loading_more || self.is_loading_initial {
            return None;
        }
        let cursor = match &self.cursor {
            Some(cursor) if !cursor.is_empty() => cursor.clone(),
            _ => return None,
        };
        self.is_loading_more = true;
        Some(FetchPlan {
            cursor,
            limit: self.page_size,
            kind: FetchKind::More,
            generation: self.generation,
        })
    }

    /// Discard all pagination state and fetch the first page again. This is
    /// also the only way to recover from a fetch that never resolved.
    pub fn refresh(&mut self) -> Option<FetchPlan> {
        self.generation += 1;
        self.cursor = None;
        self.has_more = true;
        self.is_loading_initial = false;
        self.is_loading_more = false;
        self.last_error = None;
        self.load_initial()
    }

    /// Perpetual-scroll fallback: end of data was reached but the user keeps
    /// advancing, so reset the cursor to empty and append a fresh first page
    /// to the tail. Only the short-video feed calls this.
    pub fn loop_restart(&mut self) -> Option<FetchPlan> {
        if self.has_more || self.is_loading_more || self.is_loading_initial {
            return None;
        }
        self.cursor = Some(Cursor::empty());
        self.is_loading_more = true;
        Some(FetchPlan {
            cursor: Cursor::empty(),
            limit: self.page_size,
            kind: FetchKind::Loop,
            generation: self.generation,
        })
    }

    /// Fold a successful page into the pager. Results carrying a generation
    /// older than the current one are dropped: a stale fetch that resolves
    /// after a refresh must not clobber the refreshed state.
    pub fn on_page_loaded(&mut self, kind: FetchKind, generation: u64, page: Page<T>) {
        if generation != self.generation {
            log::debug!(
                "dropping stale page result (generation {generation} != {})",
                self.generation
            );
            return;
        }
        match kind {
            FetchKind::Initial => {
                self.is_loading_initial = false;
                self.last_error = None;
                self.items.clear();
                self.items.merge_page(page.items);
                self.has_more = page.next_cursor.is_some();
                self.cursor = page.next_cursor;
            }
            FetchKind::More | FetchKind::Loop => {
                self.is_loading_more = false;
                let got_items = !page.items.is_empty();
                self.items.merge_page(page.items);
                self.has_more = page.next_cursor.is_some();
                self.cursor = page.next_cursor;
                // Defensive termination: an empty page ends pagination even
                // when a cursor was technically returned.
                if !got_items {
                    self.has_more = false;
                }
            }
        }
    }

    /// Fold a failed fetch into the pager. Items and cursor are untouched;
    /// only the matching loading flag clears. Initial-load failures surface
    /// an error for the retry card, load-more failures are invisible.
    pub fn on_page_failed(&mut self, kind: FetchKind, generation: u64, error: String) {
        if generation != self.generation {
            log::debug!("dropping stale page failure (generation {generation})");
            return;
        }
        match kind {
            FetchKind::Initial => {
                self.is_loading_initial = false;
                self.last_error = Some(error);
            }
            FetchKind::More | FetchKind::Loop => {
                self.is_loading_more = false;
                log::warn!("load-more failed: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::entity::{Post, PostId, UserId};

    fn post(id: &str) -> Post {
        Post {
            id: PostId::from(id),
            author: UserId::from("u1"),
            author_handle: "alice".to_owned(),
            content: format!("post {id}"),
            created_at: chrono::Utc::now(),
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

    fn page(ids: &[&str], next: Option<&str>) -> Page<Post> {
        Page::new(
            ids.iter().map(|id| post(id)).collect(),
            next.map(Cursor::from),
        )
    }

    fn ids(pager: &Pager<Post>) -> Vec<String> {
        pager.items().iter().map(|p| p.id.0.clone()).collect()
    }

    #[test]
    fn test_pager_starts_empty_and_idle() {
        let pager: Pager<Post> = Pager::new(20);
        assert!(pager.items().is_empty());
        assert!(pager.has_more());
        assert!(!pager.is_loading_initial());
        assert!(!pager.is_loading_more());
        assert_eq!(pager.cursor(), None);
    }

    #[test]
    fn test_load_initial_replaces_items() {
        let mut pager = Pager::new(20);

        let plan = pager.load_initial().expect("should fire");
        assert_eq!(plan.kind, FetchKind::Initial);
        assert!(plan.cursor.is_empty());
        assert!(pager.is_loading_initial());

        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1", "2"], Some("c1")));
        assert_eq!(ids(&pager), vec!["1", "2"]);
        assert!(!pager.is_loading_initial());
        assert!(pager.has_more());
        assert_eq!(pager.cursor(), Some(&Cursor::from("c1")));
    }

    #[test]
    fn test_load_initial_suppressed_while_loading() {
        let mut pager: Pager<Post> = Pager::new(20);
        let _ = pager.load_initial().expect("first fires");
        assert!(pager.load_initial().is_none());
    }

    #[test]
    fn test_load_more_appends_with_dedup() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1", "2"], Some("c1")));

        let plan = pager.load_more().expect("fires");
        assert_eq!(plan.cursor, Cursor::from("c1"));
        pager.on_page_loaded(FetchKind::More, plan.generation, page(&["2", "3"], Some("c2")));

        assert_eq!(ids(&pager), vec!["1", "2", "3"]);
        assert_eq!(pager.cursor(), Some(&Cursor::from("c2")));
    }

    #[test]
    fn test_load_more_guard_against_double_fetch() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        let first = pager.load_more();
        assert!(first.is_some());
        // Second trigger while in flight is a silent no-op
        assert!(pager.load_more().is_none());
        assert!(pager.is_loading_more());
    }

    #[test]
    fn test_termination_on_absent_cursor() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], None));

        assert!(!pager.has_more());
        // Subsequent load_more issues no request
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn test_empty_page_forces_termination_despite_cursor() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        let plan = pager.load_more().expect("fires");
        pager.on_page_loaded(FetchKind::More, plan.generation, page(&[], Some("c2")));

        assert!(!pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn test_empty_present_cursor_blocks_load_more() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        // Empty-but-present cursor: has_more stays true but the cursor guard
        // keeps load_more from firing
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("")));

        assert!(pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn test_initial_failure_keeps_items_and_surfaces_error() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        let plan = pager.refresh().expect("fires");
        pager.on_page_failed(FetchKind::Initial, plan.generation, "boom".to_owned());

        assert_eq!(ids(&pager), vec!["1"]);
        assert_eq!(pager.last_error(), Some("boom"));
        assert!(!pager.is_loading_initial());
    }

    #[test]
    fn test_load_more_failure_is_silent() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        let plan = pager.load_more().expect("fires");
        pager.on_page_failed(FetchKind::More, plan.generation, "timeout".to_owned());

        assert!(pager.last_error().is_none());
        assert!(!pager.is_loading_more());
        // Guards cleared: the user may trigger again
        assert!(pager.load_more().is_some());
    }

    #[test]
    fn test_refresh_replaces_and_ignores_stale_result() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1", "2"], Some("c1")));

        // A load-more goes out but resolves after the refresh
        let stale = pager.load_more().expect("fires");
        let fresh = pager.refresh().expect("fires");
        assert_ne!(stale.generation, fresh.generation);

        pager.on_page_loaded(FetchKind::More, stale.generation, page(&["3"], Some("c2")));
        // Stale merge dropped
        assert_eq!(ids(&pager), vec!["1", "2"]);

        pager.on_page_loaded(FetchKind::Initial, fresh.generation, page(&["9"], None));
        // Refresh result replaces the list wholesale
        assert_eq!(ids(&pager), vec!["9"]);
        assert!(!pager.has_more());
    }

    #[test]
    fn test_hung_request_blocks_pagination_until_refresh() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        // The request never resolves; the flag stays stuck
        let _hung = pager.load_more().expect("fires");
        assert!(pager.is_loading_more());
        assert!(pager.load_more().is_none());
        assert!(pager.load_initial().is_none());

        // Only refresh recovers
        assert!(pager.refresh().is_some());
        assert!(!pager.is_loading_more());
    }

    #[test]
    fn test_loop_restart_appends_and_rearms() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1", "2"], None));
        assert!(!pager.has_more());

        let plan = pager.loop_restart().expect("fires");
        assert!(plan.cursor.is_empty());
        assert_eq!(plan.kind, FetchKind::Loop);

        pager.on_page_loaded(FetchKind::Loop, plan.generation, page(&["3", "4"], Some("c1")));
        // Appended, not replaced, and has_more is true again
        assert_eq!(ids(&pager), vec!["1", "2", "3", "4"]);
        assert!(pager.has_more());
    }

    #[test]
    fn test_loop_restart_requires_end_of_data() {
        let mut pager = Pager::new(20);
        let plan = pager.load_initial().expect("fires");
        pager.on_page_loaded(FetchKind::Initial, plan.generation, page(&["1"], Some("c1")));

        // has_more is still true: no loop
        assert!(pager.loop_restart().is_none());
    }
}
