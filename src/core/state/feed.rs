use chrono::Utc;

use crate::core::cmd::{Cmd, EngagementAction};
use crate::core::msg::feed::FeedMsg;
use crate::core::state::pager::{FetchPlan, Pager};
use crate::domain::entity::{Post, Story};
use crate::domain::page::PageRequest;
use crate::domain::trigger::{ScrollMetrics, ScrollTrigger};

/// How many posts one page request asks for.
pub const FEED_PAGE_SIZE: u32 = 20;

/// Rendered height of one post card in rows. Scroll metrics are derived from
/// it, so the infinite-scroll threshold is measured in rows, not items.
pub const POST_CARD_HEIGHT: u32 = 6;

/// Timeline feed state: the post pager, the story rail and the selection.
///
/// Unlike the nearby screen, this state is reset every time the user leaves
/// the feed screen, so re-entering always starts from a fresh first page.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub pager: Pager<Post>,
    pub stories: Vec<Story>,
    pub selected_index: Option<usize>,
    pub viewport_height: u16,
    trigger: ScrollTrigger,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            pager: Pager::new(FEED_PAGE_SIZE),
            stories: Vec::new(),
            selected_index: None,
            viewport_height: 0,
            trigger: ScrollTrigger::default(),
        }
    }
}

impl FeedState {
    fn fetch_cmd(plan: FetchPlan) -> Cmd {
        Cmd::FetchPosts {
            request: PageRequest::new(plan.limit, plan.cursor),
            kind: plan.kind,
            generation: plan.generation,
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let selected = self.selected_index.unwrap_or(0) as u32;
        ScrollMetrics {
            scroll_top: selected * POST_CARD_HEIGHT,
            viewport_height: u32::from(self.viewport_height),
            content_height: self.pager.items().len() as u32 * POST_CARD_HEIGHT,
        }
    }

    /// Feed-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: FeedMsg) -> Vec<Cmd> {
        match msg {
            FeedMsg::LoadInitial => match self.pager.load_initial() {
                Some(plan) => vec![Self::fetch_cmd(plan), Cmd::FetchStories],
                None => vec![],
            },

            FeedMsg::LoadMore => match self.pager.load_more() {
                Some(plan) => vec![Self::fetch_cmd(plan)],
                None => vec![],
            },

            FeedMsg::Refresh => match self.pager.refresh() {
                Some(plan) => vec![Self::fetch_cmd(plan), Cmd::FetchStories],
                None => vec![],
            },

            FeedMsg::PageLoaded {
                kind,
                generation,
                page,
            } => {
                self.pager.on_page_loaded(kind, generation, page);
                self.trigger.rearm();
                // Keep the selection inside the (possibly replaced) list
                let len = self.pager.items().len();
                match self.selected_index {
                    Some(_) if len == 0 => self.selected_index = None,
                    Some(index) if index >= len => self.selected_index = Some(len - 1),
                    _ => {}
                }
                vec![]
            }

            FeedMsg::PageFailed {
                kind,
                generation,
                error,
            } => {
                self.pager.on_page_failed(kind, generation, error);
                vec![]
            }

            FeedMsg::StoriesLoaded(stories) => {
                let now = Utc::now();
                self.stories = stories
                    .into_iter()
                    .filter(|story| !story.is_expired(now))
                    .collect();
                vec![]
            }

            FeedMsg::ScrollUp => {
                match self.selected_index {
                    Some(index) if index > 0 => self.selected_index = Some(index - 1),
                    Some(_) => {}
                    None if !self.pager.items().is_empty() => self.selected_index = Some(0),
                    None => {}
                }
                vec![]
            }

            FeedMsg::ScrollDown => {
                let len = self.pager.items().len();
                if len == 0 {
                    return vec![];
                }
                let next = match self.selected_index {
                    Some(index) => (index + 1).min(len - 1),
                    None => 0,
                };
                self.selected_index = Some(next);

                if self.trigger.observe(self.scroll_metrics(), self.pager.guards()) {
                    match self.pager.load_more() {
                        Some(plan) => vec![Self::fetch_cmd(plan)],
                        None => vec![],
                    }
                } else {
                    vec![]
                }
            }

            FeedMsg::ScrollToTop => {
                if !self.pager.items().is_empty() {
                    self.selected_index = Some(0);
                }
                vec![]
            }

            FeedMsg::ViewportResized(height) => {
                self.viewport_height = height;
                vec![]
            }

            FeedMsg::ToggleLike(id) => match self.pager.items_mut().find_mut(&id) {
                Some(post) => {
                    let liked = post.toggle_like();
                    vec![Cmd::SendEngagement {
                        action: EngagementAction::LikePost { id, liked },
                    }]
                }
                None => vec![],
            },

            FeedMsg::ToggleSave(id) => match self.pager.items_mut().find_mut(&id) {
                Some(post) => {
                    let saved = post.toggle_saved();
                    vec![Cmd::SendEngagement {
                        action: EngagementAction::SavePost { id, saved },
                    }]
                }
                None => vec![],
            },
        }
    }
}
