//! Nearby screen component
//!
//! Renders the nearby-user list with distances, plus the location alert
//! line when location lookup failed or is disabled.

use ratatui::{prelude::*, widgets::*};
use thousands::Separable;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::state::AppState;
use crate::domain::entity::NearbyUser;

/// Column budget for display names. Longer names are cut on a character
/// boundary (by display width, so wide glyphs count double) and marked with
/// an ellipsis, keeping the distance column aligned on screen.
const NAME_WIDTH: usize = 24;

fn fit_name(name: &str) -> String {
    if name.width() <= NAME_WIDTH {
        return name.to_owned();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > NAME_WIDTH - 1 {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push('…');
    fitted
}

#[derive(Debug, Clone)]
pub struct NearbyComponent;

impl NearbyComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1), // location alert
                Constraint::Min(0),    // user list
            ],
        )
        .split(area);

        self.render_alert(state, frame, layout[0]);
        self.render_users(state, frame, layout[1]);
    }

    fn render_alert(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let line = match &state.nearby.alert {
            Some(alert) => Line::from(Span::styled(
                format!("{alert} (press <enter> to dismiss)"),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::default(),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_users(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let users = state.nearby.pager.items();

        if users.is_empty() {
            let text = Self::empty_message(state);
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().title("Nearby").borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = users.iter().map(|user| Self::user_row(user)).collect();
        let mut list_state = ListState::default();
        list_state.select(state.nearby.selected_index);

        let title = if state.nearby.pager.is_loading_more() {
            "Nearby (loading more...)"
        } else {
            "Nearby"
        };
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().reversed());

        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn user_row(user: &NearbyUser) -> ListItem<'_> {
        let name_style = if user.blocked {
            Style::default().fg(Color::DarkGray).crossed_out()
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![
            Span::styled(format!("@{}", user.handle), name_style),
            Span::raw(" "),
            Span::raw(fit_name(&user.display_name)),
            Span::raw(" "),
            Span::styled(
                format!("{}m", user.distance_meters.separate_with_commas()),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if user.blocked {
            spans.push(Span::styled(
                " [blocked]",
                Style::default().fg(Color::Red),
            ));
        }
        ListItem::new(Line::from(spans))
    }

    pub fn empty_message(state: &AppState) -> String {
        if state.nearby.pager.is_loading_initial() {
            "Loading...".to_owned()
        } else if let Some(error) = state.nearby.pager.last_error() {
            format!("{error}\nPress <r> to retry")
        } else {
            "Nobody nearby yet".to_owned()
        }
    }
}

impl Default for NearbyComponent {
    fn default() -> Self {
        Self::new()
    }
}
