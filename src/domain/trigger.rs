//! Policies that decide when a pager should request the next page.

/// Default distance-from-bottom at which the scroll variant fires.
pub const SCROLL_THRESHOLD: u32 = 200;

/// Default number of trailing items that arms the index variant.
pub const INDEX_LOOKAHEAD: usize = 3;

/// Pager flags consulted by every trigger before firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerGuards {
    pub has_more: bool,
    pub is_loading_initial: bool,
    pub is_loading_more: bool,
}

impl TriggerGuards {
    fn idle(&self) -> bool {
        !self.is_loading_initial && !self.is_loading_more
    }
}

/// Viewport geometry observed on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub scroll_top: u32,
    pub viewport_height: u32,
    pub content_height: u32,
}

impl ScrollMetrics {
    pub fn distance_from_bottom(&self) -> u32 {
        self.content_height
            .saturating_sub(self.scroll_top + self.viewport_height)
    }
}

/// Window-scroll distance trigger. Fires when the distance from the bottom
/// drops to the threshold or below, at most once per crossing: after firing
/// it stays quiet until the position rises back above the threshold.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    threshold: u32,
    armed: bool,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(SCROLL_THRESHOLD)
    }
}

impl ScrollTrigger {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            armed: true,
        }
    }

    /// Re-arm explicitly. Called when a page finishes loading, since appended
    /// content may leave the position below the threshold without ever rising
    /// back above it.
    pub fn rearm(&mut self) {
        self.armed = true;
    }

    /// Feed one scroll observation. Returns true when a load-more should fire.
    pub fn observe(&mut self, metrics: ScrollMetrics, guards: TriggerGuards) -> bool {
        let below = metrics.distance_from_bottom() <= self.threshold;
        if !below {
            self.armed = true;
            return false;
        }
        if self.armed && guards.has_more && guards.idle() {
            self.armed = false;
            return true;
        }
        false
    }
}

/// Outcome of an index-proximity observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexDecision {
    /// Nothing to do.
    Stay,
    /// Request the next page with the current cursor.
    LoadMore,
    /// End of data reached but the user keeps advancing: reset the cursor to
    /// empty and append a fresh first page to the tail (short-video feed only).
    LoopRestart,
}

/// Index-proximity trigger for virtualized/snap-scroll feeds. When `looping`
/// is enabled, running past the end of data restarts from the first page,
/// appended to the tail, instead of stopping.
#[derive(Debug, Clone)]
pub struct IndexTrigger {
    lookahead: usize,
    looping: bool,
}

impl IndexTrigger {
    pub fn new(lookahead: usize, looping: bool) -> Self {
        Self { lookahead, looping }
    }

    /// Trigger for the short-video feed: lookahead 3, perpetual scroll.
    pub fn looping() -> Self {
        Self::new(INDEX_LOOKAHEAD, true)
    }

    /// Trigger for finite lists: lookahead 3, hard stop at the end.
    pub fn finite() -> Self {
        Self::new(INDEX_LOOKAHEAD, false)
    }

    pub fn observe(&self, current_index: usize, total: usize, guards: TriggerGuards) -> IndexDecision {
        if total == 0 || !guards.idle() {
            return IndexDecision::Stay;
        }
        let near_end = current_index + self.lookahead >= total;
        if !near_end {
            return IndexDecision::Stay;
        }
        if guards.has_more {
            IndexDecision::LoadMore
        } else if self.looping {
            IndexDecision::LoopRestart
        } else {
            IndexDecision::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn guards(has_more: bool, loading_more: bool) -> TriggerGuards {
        TriggerGuards {
            has_more,
            is_loading_initial: false,
            is_loading_more: loading_more,
        }
    }

    fn metrics(distance: u32) -> ScrollMetrics {
        // viewport 100 rows, content 1000 rows, scroll_top derived from distance
        ScrollMetrics {
            scroll_top: 900 - distance,
            viewport_height: 100,
            content_height: 1000,
        }
    }

    #[test]
    fn test_distance_from_bottom() {
        let m = ScrollMetrics {
            scroll_top: 700,
            viewport_height: 100,
            content_height: 1000,
        };
        assert_eq!(m.distance_from_bottom(), 200);
    }

    #[test]
    fn test_distance_saturates_at_zero() {
        let m = ScrollMetrics {
            scroll_top: 950,
            viewport_height: 100,
            content_height: 1000,
        };
        assert_eq!(m.distance_from_bottom(), 0);
    }

    #[test]
    fn test_scroll_trigger_fires_once_per_crossing() {
        let mut trigger = ScrollTrigger::default();

        // Crossing below the threshold fires exactly once
        assert!(trigger.observe(metrics(150), guards(true, false)));
        assert!(!trigger.observe(metrics(140), guards(true, true)));
        assert!(!trigger.observe(metrics(130), guards(true, false)));

        // Rising above the threshold re-arms
        assert!(!trigger.observe(metrics(300), guards(true, false)));
        assert!(trigger.observe(metrics(190), guards(true, false)));
    }

    #[rstest]
    #[case(guards(false, false))] // no more data
    #[case(guards(true, true))] // already loading
    fn test_scroll_trigger_respects_guards(#[case] g: TriggerGuards) {
        let mut trigger = ScrollTrigger::default();
        assert!(!trigger.observe(metrics(150), g));
    }

    #[test]
    fn test_scroll_trigger_above_threshold_never_fires() {
        let mut trigger = ScrollTrigger::default();
        assert!(!trigger.observe(metrics(201), guards(true, false)));
    }

    #[rstest]
    #[case(6, 10, IndexDecision::Stay)]
    #[case(7, 10, IndexDecision::LoadMore)] // 7 + 3 >= 10
    #[case(9, 10, IndexDecision::LoadMore)]
    fn test_index_trigger_lookahead(
        #[case] index: usize,
        #[case] total: usize,
        #[case] expected: IndexDecision,
    ) {
        let trigger = IndexTrigger::finite();
        assert_eq!(trigger.observe(index, total, guards(true, false)), expected);
    }

    #[test]
    fn test_index_trigger_guards_suppress() {
        let trigger = IndexTrigger::finite();
        assert_eq!(
            trigger.observe(9, 10, guards(true, true)),
            IndexDecision::Stay
        );
        assert_eq!(trigger.observe(0, 0, guards(true, false)), IndexDecision::Stay);
    }

    #[test]
    fn test_finite_trigger_stops_at_end_of_data() {
        let trigger = IndexTrigger::finite();
        assert_eq!(
            trigger.observe(9, 10, guards(false, false)),
            IndexDecision::Stay
        );
    }

    #[test]
    fn test_looping_trigger_restarts_at_end_of_data() {
        let trigger = IndexTrigger::looping();
        assert_eq!(
            trigger.observe(9, 10, guards(false, false)),
            IndexDecision::LoopRestart
        );
        // Still loading: no restart
        assert_eq!(
            trigger.observe(9, 10, guards(false, true)),
            IndexDecision::Stay
        );
    }
}
