use chrono::{DateTime, Local, Utc};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::domain::entity::{Attachment, Post};
use crate::presentation::widgets::engagement_stats::EngagementStats;

/// A single post in the feed list. Owns a copy of the post so it can be
/// rebuilt cheaply inside the list builder closure.
#[derive(Clone)]
pub struct PostCardWidget {
    post: Post,
    pub highlight: bool,
}

impl PostCardWidget {
    pub fn new(post: Post) -> Self {
        Self {
            post,
            highlight: false,
        }
    }

    fn header_line(&self) -> Line<'_> {
        Line::from(vec![
            Span::styled(
                format!("@{}", self.post.author_handle),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::raw(" "),
            Span::styled(
                format_timestamp(self.post.created_at),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    fn badges_line(&self) -> Line<'_> {
        let mut spans = Vec::new();
        for attachment in &self.post.attachments {
            let badge = match attachment {
                Attachment::Image { .. } => "[image]",
                Attachment::Video { .. } => "[video]",
            };
            spans.push(Span::styled(badge, Style::default().fg(Color::Magenta)));
            spans.push(Span::raw(" "));
        }
        if self.post.poll.is_some() {
            spans.push(Span::styled("[poll]", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" "));
        }
        if self.post.event.is_some() {
            spans.push(Span::styled("[event]", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" "));
        }
        if self.post.location.is_some() {
            spans.push(Span::styled("[location]", Style::default().fg(Color::Blue)));
        }
        Line::from(spans)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

impl Widget for PostCardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base_style = if self.highlight {
            Style::default().bold().bg(Color::Black)
        } else {
            Style::default()
        };

        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1), // author and timestamp
                Constraint::Min(1),    // content
                Constraint::Length(1), // attachment and extras badges
                Constraint::Length(1), // engagement stats
            ],
        )
        .split(area);

        Paragraph::new(self.header_line())
            .style(base_style)
            .render(layout[0], buf);
        Paragraph::new(self.post.content.as_str())
            .style(base_style)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);
        Paragraph::new(self.badges_line())
            .style(base_style)
            .render(layout[2], buf);

        let stats: Text = EngagementStats::new(
            self.post.like_count,
            self.post.comment_count,
            self.post.liked,
            self.post.saved,
        )
        .into();
        Paragraph::new(stats).style(base_style).render(layout[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::entity::{PostId, UserId};

    fn post() -> Post {
        Post {
            id: PostId::from("p1"),
            author: UserId::from("u1"),
            author_handle: "alice".to_owned(),
            content: "hello world".to_owned(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts"),
            attachments: vec![Attachment::Image {
                url: "https://cdn.example/a.jpg".to_owned(),
            }],
            poll: None,
            event: None,
            location: None,
            like_count: 3,
            comment_count: 1,
            liked: false,
            saved: false,
        }
    }

    #[test]
    fn test_header_names_author() {
        let widget = PostCardWidget::new(post());
        let line = widget.header_line().to_string();
        assert!(line.contains("@alice"));
    }

    #[test]
    fn test_badges_reflect_extras() {
        let mut p = post();
        p.poll = Some(crate::domain::entity::Poll {
            question: "ok?".to_owned(),
            options: vec![],
        });
        let widget = PostCardWidget::new(p);
        let badges = widget.badges_line().to_string();
        assert!(badges.contains("[image]"));
        assert!(badges.contains("[poll]"));
        assert!(!badges.contains("[event]"));
    }

    #[test]
    fn test_renders_into_buffer() {
        let widget = PostCardWidget::new(post());
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);

        widget.render(area, &mut buf);

        let content: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(content.contains("@alice"));
        assert!(content.contains("hello world"));
        assert!(content.contains("3Likes"));
    }
}
