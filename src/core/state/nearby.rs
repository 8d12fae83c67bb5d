use crate::core::cmd::{Cmd, EngagementAction};
use crate::core::msg::nearby::NearbyMsg;
use crate::core::state::pager::{FetchPlan, Pager};
use crate::domain::entity::{GeoPoint, NearbyUser};
use crate::domain::page::PageRequest;
use crate::domain::trigger::{IndexDecision, IndexTrigger};

/// How many nearby users one page request asks for.
pub const NEARBY_PAGE_SIZE: u32 = 25;

/// Nearby-users discovery state.
///
/// This state is process-wide: it survives screen switches, so `Enter` only
/// fetches when nothing has been loaded yet. The list, the cursor and the
/// selection are all preserved until an explicit `Refresh`.
#[derive(Debug, Clone)]
pub struct NearbyState {
    pub pager: Pager<NearbyUser>,
    pub selected_index: Option<usize>,
    pub location: Option<GeoPoint>,
    pub alert: Option<String>,
    trigger: IndexTrigger,
}

impl Default for NearbyState {
    fn default() -> Self {
        Self {
            pager: Pager::new(NEARBY_PAGE_SIZE),
            selected_index: None,
            location: None,
            alert: None,
            trigger: IndexTrigger::finite(),
        }
    }
}

impl NearbyState {
    fn fetch_cmd(plan: FetchPlan) -> Cmd {
        Cmd::FetchNearby {
            request: PageRequest::new(plan.limit, plan.cursor),
            kind: plan.kind,
            generation: plan.generation,
        }
    }

    /// Nearby-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: NearbyMsg) -> Vec<Cmd> {
        match msg {
            // First visit loads; later visits find the list already there
            NearbyMsg::Enter => {
                if !self.pager.items().is_empty() {
                    return vec![];
                }
                match self.pager.load_initial() {
                    Some(plan) => vec![Self::fetch_cmd(plan), Cmd::RequestLocation],
                    None => vec![],
                }
            }

            NearbyMsg::LoadMore => match self.pager.load_more() {
                Some(plan) => vec![Self::fetch_cmd(plan)],
                None => vec![],
            },

            NearbyMsg::Refresh => match self.pager.refresh() {
                Some(plan) => vec![Self::fetch_cmd(plan), Cmd::RequestLocation],
                None => vec![],
            },

            NearbyMsg::PageLoaded {
                kind,
                generation,
                page,
            } => {
                self.pager.on_page_loaded(kind, generation, page);
                let len = self.pager.items().len();
                match self.selected_index {
                    Some(_) if len == 0 => self.selected_index = None,
                    Some(index) if index >= len => self.selected_index = Some(len - 1),
                    _ => {}
                }
                vec![]
            }

            NearbyMsg::PageFailed {
                kind,
                generation,
                error,
            } => {
                self.pager.on_page_failed(kind, generation, error);
                vec![]
            }

            NearbyMsg::ScrollUp => {
                match self.selected_index {
                    Some(index) if index > 0 => self.selected_index = Some(index - 1),
                    Some(_) => {}
                    None if !self.pager.items().is_empty() => self.selected_index = Some(0),
                    None => {}
                }
                vec![]
            }

            NearbyMsg::ScrollDown => {
                let len = self.pager.items().len();
                if len == 0 {
                    return vec![];
                }
                let next = match self.selected_index {
                    Some(index) => (index + 1).min(len - 1),
                    None => 0,
                };
                self.selected_index = Some(next);

                match self.trigger.observe(next, len, self.pager.guards()) {
                    IndexDecision::LoadMore => match self.pager.load_more() {
                        Some(plan) => vec![Self::fetch_cmd(plan)],
                        None => vec![],
                    },
                    // The finite trigger never asks for a loop
                    IndexDecision::LoopRestart | IndexDecision::Stay => vec![],
                }
            }

            NearbyMsg::ToggleBlock(id) => match self.pager.items_mut().find_mut(&id) {
                Some(user) => {
                    let blocked = user.toggle_blocked();
                    vec![Cmd::SendEngagement {
                        action: EngagementAction::BlockUser { id, blocked },
                    }]
                }
                None => vec![],
            },

            NearbyMsg::LocationResolved(point) => {
                self.location = Some(point);
                self.alert = None;
                vec![]
            }

            NearbyMsg::LocationFailed(reason) => {
                self.alert = Some(reason);
                vec![]
            }

            NearbyMsg::DismissAlert => {
                self.alert = None;
                vec![]
            }
        }
    }
}
