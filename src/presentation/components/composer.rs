//! Composer screen component
//!
//! The only component with UI state of its own: the text area. Keys are
//! fed into the text area, and the resulting lines are reported back as a
//! content-change message so the draft lives in AppState.

use ratatui::{prelude::*, widgets::*};
use tui_textarea::TextArea;

use crate::core::msg::composer::ComposerMsg;
use crate::core::state::AppState;
use crate::domain::entity::Attachment;

#[derive(Debug, Default)]
pub struct ComposerComponent {
    textarea: TextArea<'static>,
}

impl ComposerComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key into the text area and report the new draft lines.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> ComposerMsg {
        self.textarea.input(crossterm::event::Event::Key(key));
        ComposerMsg::ContentChanged(self.textarea.lines().to_vec())
    }

    /// Drop the editor content. Called after submit or discard, when the
    /// draft in AppState has already been cleared.
    pub fn reset(&mut self) {
        self.textarea = TextArea::default();
    }

    /// Sync the text area when the draft changed outside of key input,
    /// e.g. after a mention was inserted.
    pub fn sync_with_state(&mut self, state: &AppState) {
        let lines = &state.composer.lines;
        // An empty draft and an empty text area compare as [""] vs []
        if lines.is_empty() {
            if self.textarea.lines() != [""] {
                self.reset();
            }
            return;
        }
        if self.textarea.lines() != lines.as_slice() {
            self.textarea = TextArea::new(lines.clone());
            self.textarea
                .move_cursor(tui_textarea::CursorMove::Bottom);
            self.textarea.move_cursor(tui_textarea::CursorMove::End);
        }
    }

    pub fn view(&mut self, state: &AppState, frame: &mut Frame<'_>, area: Rect) {
        self.sync_with_state(state);

        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(3),    // editor
                Constraint::Length(1), // meta line
            ],
        )
        .split(area);

        let title = if state.composer.is_submitting {
            "New post (posting...)"
        } else {
            "New post: <ctrl-s> to post, <esc> to discard"
        };
        self.textarea
            .set_block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(&self.textarea, layout[0]);

        frame.render_widget(Paragraph::new(Self::meta_line(state)), layout[1]);
    }

    /// One-line summary of audience and extras attached to the draft.
    pub fn meta_line(state: &AppState) -> Line<'static> {
        let composer = &state.composer;
        let mut spans = vec![Span::styled(
            format!("To: {}", composer.audience),
            Style::default().fg(Color::Cyan),
        )];
        for attachment in &composer.attachments {
            let badge = match attachment {
                Attachment::Image { .. } => " [image]",
                Attachment::Video { .. } => " [video]",
            };
            spans.push(Span::styled(badge, Style::default().fg(Color::Magenta)));
        }
        if composer.poll.is_some() {
            spans.push(Span::styled(" [poll]", Style::default().fg(Color::Green)));
        }
        if composer.event.is_some() {
            spans.push(Span::styled(" [event]", Style::default().fg(Color::Yellow)));
        }
        if composer.location.is_some() {
            spans.push(Span::styled(" [location]", Style::default().fg(Color::Blue)));
        }
        Line::from(spans)
    }
}
