//! Help overlay listing keyboard shortcuts.
//!
//! Toggled with `?`, dismissed with `Esc` or `?`.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, POPUP_WIDTH_PERCENT};
use super::styles::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Catalog",
        &[
            ("h/j/k/l, arrows", "Move between cards"),
            ("Enter", "Open selected zone"),
            ("m", "Load more"),
            ("r", "Reload zone list"),
        ],
    ),
    (
        "Search & sort",
        &[
            ("/", "Search by name"),
            ("Ctrl+u", "Clear search"),
            ("o", "Cycle sort (Default, Name, ID)"),
        ],
    ),
    (
        "Viewer",
        &[
            ("Esc/c", "Close viewer"),
            ("f", "Toggle fullscreen"),
            ("b", "Pop out to file"),
            ("PgUp/PgDn", "Scroll"),
        ],
    ),
    (
        "Data",
        &[
            ("e", "Export saved data"),
            ("i", "Import saved data"),
        ],
    ),
    (
        "Application",
        &[
            ("d", "Toggle dark mode"),
            ("?", "Toggle this help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(build_help_content(theme))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(theme.accent),
        )
        .style(theme.base)
        .wrap(Wrap { trim: false });
    frame.render_widget(help, popup_area);

    let hint_area = Rect {
        y: popup_area.y + popup_area.height.saturating_sub(1),
        height: 1.min(popup_area.height),
        ..popup_area
    };
    let hint = Paragraph::new(Span::styled(
        " Press Esc or ? to close ",
        theme.muted.add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Centered rect covering the given percentages of `area`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn build_help_content(theme: &Theme) -> Vec<Line<'static>> {
    let key_style = theme.accent.add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (index, (title, entries)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, theme.header)));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<16}"), key_style),
                Span::styled(*description, theme.card),
            ]));
        }
    }
    lines
}
