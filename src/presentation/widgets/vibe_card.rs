use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::domain::entity::Vibe;
use crate::presentation::widgets::engagement_stats::EngagementStats;

/// Full-screen card for a single vibe. The terminal cannot play the
/// video, so the card shows the caption and a link to the clip.
pub struct VibeCardWidget<'a> {
    vibe: &'a Vibe,
    position: usize,
    total: usize,
}

impl<'a> VibeCardWidget<'a> {
    pub fn new(vibe: &'a Vibe, position: usize, total: usize) -> Self {
        Self {
            vibe,
            position,
            total,
        }
    }

    fn title(&self) -> String {
        format!(
            " @{} ({}/{}) ",
            self.vibe.author_handle,
            self.position + 1,
            self.total
        )
    }
}

impl Widget for VibeCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(1),    // caption
                Constraint::Length(1), // video link
                Constraint::Length(1), // engagement stats
            ],
        )
        .split(inner);

        Paragraph::new(self.vibe.caption.as_str())
            .wrap(Wrap { trim: false })
            .render(layout[0], buf);
        Paragraph::new(self.vibe.video_url.as_str())
            .style(Style::default().fg(Color::DarkGray).underlined())
            .render(layout[1], buf);

        let stats: Text =
            EngagementStats::new(self.vibe.like_count, 0, self.vibe.liked, false).into();
        Paragraph::new(stats).render(layout[2], buf);
    }
}
