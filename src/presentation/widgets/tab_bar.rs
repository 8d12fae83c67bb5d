use ratatui::prelude::*;
use ratatui::widgets::{Tabs, Widget};
use strum::IntoEnumIterator;

use crate::core::state::Screen;

/// Top tab bar cycling through the four screens.
pub struct TabBarWidget {
    active: Screen,
}

impl TabBarWidget {
    pub fn new(active: Screen) -> Self {
        Self { active }
    }

    fn titles() -> Vec<String> {
        Screen::iter().map(|screen| screen.to_string()).collect()
    }

    fn active_index(&self) -> usize {
        Screen::iter()
            .position(|screen| screen == self.active)
            .unwrap_or(0)
    }
}

impl Widget for TabBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Tabs::new(Self::titles())
            .select(self.active_index())
            .style(Style::default().bg(Color::Black))
            .highlight_style(Style::default().reversed())
            .render(area, buf);
    }
}
