//! Single-line input widget used by the search bar and the import prompt.

use crate::state::TextInput;
use crate::view::styles::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered text input. Shows a block cursor only while focused.
pub struct SearchInput<'a> {
    input: &'a TextInput,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchInput<'a> {
    /// Unfocused input titled "Search".
    pub fn new(input: &'a TextInput, theme: &'a Theme) -> Self {
        Self {
            input,
            title: "Search",
            placeholder: "",
            focused: false,
            theme,
        }
    }

    /// Border title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Text shown dimmed while the input is empty and unfocused.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Draw the cursor.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line(&self) -> Line<'a> {
        let text = self.input.text();
        if !self.focused {
            if text.is_empty() {
                return Line::from(Span::styled(self.placeholder, self.theme.muted));
            }
            return Line::from(text.to_string());
        }

        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let under = rest.next().map_or_else(|| " ".to_string(), |c| c.to_string());
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(under, self.theme.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.accent
        } else {
            self.theme.muted
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title)
            .border_style(border_style);

        Paragraph::new(self.line())
            .block(block)
            .style(self.theme.base)
            .render(area, buf);
    }
}
