//! Feed screen component
//!
//! Renders the story rail and the scrollable post list from AppState.

use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListView};

use crate::core::state::feed::POST_CARD_HEIGHT;
use crate::core::state::AppState;
use crate::presentation::widgets::post_card::PostCardWidget;
use crate::presentation::widgets::story_rail::StoryRailWidget;

#[derive(Debug, Clone)]
pub struct FeedComponent;

impl FeedComponent {
    pub fn new() -> Self {
        Self
    }

    /// Render the feed screen: one story rail row on top, post list below.
    pub fn view(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1), // story rail
                Constraint::Min(0),    // post list
            ],
        )
        .split(area);

        frame.render_widget(StoryRailWidget::new(&state.feed.stories), layout[0]);
        self.render_posts(state, frame, layout[1]);
    }

    fn render_posts(&self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        let posts = state.feed.pager.items();

        if posts.is_empty() {
            let text = Self::empty_message(state);
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().title("Feed").borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<PostCardWidget> = posts
            .iter()
            .map(|post| PostCardWidget::new(post.clone()))
            .collect();
        let item_count = items.len();

        let builder = ListBuilder::new(move |context| {
            let mut item = items[context.index].clone();
            item.highlight = context.is_selected;
            (item, POST_CARD_HEIGHT as u16)
        });

        let mut list_state = tui_widget_list::ListState::default();
        list_state.select(state.feed.selected_index);

        let title = if state.feed.pager.is_loading_more() {
            "Feed (loading more...)"
        } else {
            "Feed"
        };
        let list = ListView::new(builder, item_count)
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::White));

        frame.render_stateful_widget(list, area, &mut list_state);
    }

    /// Message to show when the list has nothing to render.
    pub fn empty_message(state: &AppState) -> String {
        if state.feed.pager.is_loading_initial() {
            "Loading...".to_owned()
        } else if let Some(error) = state.feed.pager.last_error() {
            format!("{error}\nPress <r> to retry")
        } else {
            "No posts to display".to_owned()
        }
    }
}

impl Default for FeedComponent {
    fn default() -> Self {
        Self::new()
    }
}
