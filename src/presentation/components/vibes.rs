//! Vibes screen component
//!
//! Shows one vibe at a time, full screen, with its position in the loaded
//! list. Navigation happens in state; this only renders the current one.

use ratatui::{prelude::*, widgets::*};

use crate::core::state::AppState;
use crate::presentation::widgets::vibe_card::VibeCardWidget;

#[derive(Debug, Clone)]
pub struct VibesComponent;

impl VibesComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        match state.vibes.current_vibe() {
            Some(vibe) => {
                let card = VibeCardWidget::new(
                    vibe,
                    state.vibes.current_index,
                    state.vibes.pager.items().len(),
                );
                frame.render_widget(card, area);
            }
            None => {
                let text = Self::empty_message(state);
                let empty = Paragraph::new(text)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().title("Vibes").borders(Borders::ALL));
                frame.render_widget(empty, area);
            }
        }
    }

    pub fn empty_message(state: &AppState) -> String {
        if state.vibes.pager.is_loading_initial() {
            "Loading...".to_owned()
        } else if let Some(error) = state.vibes.pager.last_error() {
            format!("{error}\nPress <r> to retry")
        } else {
            "No vibes to display".to_owned()
        }
    }
}

impl Default for VibesComponent {
    fn default() -> Self {
        Self::new()
    }
}
