use ratatui::prelude::*;
use thousands::Separable;

/// One-line engagement summary under a post or vibe.
pub struct EngagementStats {
    likes: u64,
    comments: u64,
    liked: bool,
    saved: bool,
}

impl EngagementStats {
    pub fn new(likes: u64, comments: u64, liked: bool, saved: bool) -> Self {
        Self {
            likes,
            comments,
            liked,
            saved,
        }
    }
}

impl From<EngagementStats> for Text<'_> {
    fn from(value: EngagementStats) -> Self {
        let like_style = if value.liked {
            Style::default().fg(Color::LightRed).bold()
        } else {
            Style::default().fg(Color::LightRed)
        };
        let mut spans = vec![
            Span::styled(
                format!("{}Likes", value.likes.separate_with_commas()),
                like_style,
            ),
            Span::raw(" "),
            Span::styled(
                format!("{}Comments", value.comments.separate_with_commas()),
                Style::default().fg(Color::LightBlue),
            ),
        ];
        if value.saved {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                "Saved",
                Style::default().fg(Color::LightYellow),
            ));
        }
        Line::from(spans).into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_counts_are_comma_separated() {
        let text: Text = EngagementStats::new(1_234_567, 89, false, false).into();
        let rendered = text.to_string();
        assert!(rendered.contains("1,234,567Likes"));
        assert!(rendered.contains("89Comments"));
    }

    #[test]
    fn test_saved_marker_only_when_saved() {
        let text: Text = EngagementStats::new(0, 0, false, true).into();
        assert!(text.to_string().contains("Saved"));

        let text: Text = EngagementStats::new(0, 0, false, false).into();
        assert!(!text.to_string().contains("Saved"));
    }

    #[test]
    fn test_line_count() {
        let text: Text = EngagementStats::new(1, 2, true, true).into();
        assert_eq!(text.lines.len(), 1);
    }
}
