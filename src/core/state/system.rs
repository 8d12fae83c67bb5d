use serde::{Deserialize, Serialize};

use crate::core::{cmd::Cmd, msg::system::SystemMsg};

/// The four top-level screens, cycled with the tab keys.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Screen {
    #[default]
    Feed,
    Vibes,
    Nearby,
    Composer,
}

/// System-related state
#[derive(Debug, Clone)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub active_screen: Screen,
    pub status_message: Option<String>,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            should_quit: false,
            should_suspend: false,
            active_screen: Screen::Feed,
            status_message: None,
            terminal_width: 0,
            terminal_height: 0,
        }
    }
}

impl SystemState {
    /// System-specific update function
    /// Returns: Generated commands
    ///
    /// `ShowScreen` is not handled here: switching screens resets or loads
    /// other concerns' state, so the top-level dispatcher owns it.
    pub fn update(&mut self, msg: SystemMsg) -> Vec<Cmd> {
        match msg {
            SystemMsg::Quit => {
                self.should_quit = true;
                vec![]
            }

            SystemMsg::Suspend => {
                self.should_suspend = true;
                vec![]
            }

            SystemMsg::Resume => {
                self.should_suspend = false;
                vec![]
            }

            SystemMsg::ShowScreen(screen) => {
                self.active_screen = screen;
                vec![]
            }

            SystemMsg::UpdateStatusMessage(message) => {
                self.status_message = Some(message);
                vec![]
            }

            SystemMsg::ClearStatusMessage => {
                self.status_message = None;
                vec![]
            }

            SystemMsg::ShowError(error) => {
                self.status_message = Some(format!("Error: {error}"));
                vec![]
            }

            SystemMsg::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
                vec![]
            }

            SystemMsg::Tick => vec![],
        }
    }
}
