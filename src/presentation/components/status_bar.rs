//! Status bar component
//!
//! Displays status information at the bottom of the screen.
//! This is a pure, stateless component that renders status data from AppState.

use ratatui::{prelude::*, widgets::*};

use crate::core::state::AppState;

#[derive(Debug, Clone)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    /// Render the status bar into the bottom line of the given area.
    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),    // main content area, untouched
                Constraint::Length(1), // status line
            ],
        )
        .split(area);

        frame.render_widget(Clear, layout[1]);

        let message = Self::status_text(state);
        let style = if message.starts_with("Error:") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let line = Paragraph::new(Span::styled(message, style)).style(Style::default().bg(Color::Black));
        frame.render_widget(line, layout[1]);
    }

    /// Status message, falling back to a loading indicator.
    pub fn status_text(state: &AppState) -> String {
        if let Some(message) = &state.system.status_message {
            return message.clone();
        }
        if state.feed.pager.is_loading_initial()
            || state.vibes.pager.is_loading_initial()
            || state.nearby.pager.is_loading_initial()
        {
            return "Loading...".to_owned();
        }
        String::new()
    }
}

impl Default for StatusBarComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::msg::feed::FeedMsg;

    #[test]
    fn test_status_message_takes_priority() {
        let mut state = AppState::default();
        state.system.status_message = Some("[Posted]".to_owned());
        state.feed.update(FeedMsg::LoadInitial);

        assert_eq!(StatusBarComponent::status_text(&state), "[Posted]");
    }

    #[test]
    fn test_loading_indicator_without_message() {
        let mut state = AppState::default();
        state.feed.update(FeedMsg::LoadInitial);

        assert_eq!(StatusBarComponent::status_text(&state), "Loading...");
    }

    #[test]
    fn test_empty_when_idle() {
        let state = AppState::default();
        assert_eq!(StatusBarComponent::status_text(&state), "");
    }
}
