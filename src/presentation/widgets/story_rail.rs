use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use crate::domain::entity::Story;

/// Horizontal rail of story bubbles above the feed. Unseen stories are
/// highlighted; expired ones were already filtered out of the state.
pub struct StoryRailWidget<'a> {
    stories: &'a [Story],
}

impl<'a> StoryRailWidget<'a> {
    pub fn new(stories: &'a [Story]) -> Self {
        Self { stories }
    }

    fn spans(&self) -> Vec<Span<'_>> {
        let mut spans = Vec::with_capacity(self.stories.len() * 2);
        for story in self.stories {
            let style = if story.seen {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Magenta).bold()
            };
            spans.push(Span::styled(format!("({})", story.author_handle), style));
            spans.push(Span::raw(" "));
        }
        spans
    }
}

impl Widget for StoryRailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.stories.is_empty() {
            Paragraph::new("No stories")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }
        Paragraph::new(Line::from(self.spans())).render(area, buf);
    }
}
