//! Card grid: one bordered card per rendered record.

use super::constants::{CARD_HEIGHT, grid_columns};
use super::styles::Theme;
use crate::config::TemplateContext;
use crate::model::Record;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

/// Cut `text` to at most `max_width` display cells, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Index of the first grid row to draw so `selected` stays on screen.
fn first_visible_row(selected: usize, columns: usize, visible_rows: usize) -> usize {
    let selected_row = selected / columns;
    (selected_row + 1).saturating_sub(visible_rows.max(1))
}

/// Render `cards` into `area`, highlighting `selected`.
///
/// Cover URLs are resolved through `templates` and printed as text.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    cards: &[Record],
    selected: usize,
    templates: &TemplateContext,
    theme: &Theme,
) {
    if cards.is_empty() {
        let empty = Paragraph::new(Span::styled("No zones to show", theme.muted));
        frame.render_widget(empty, area);
        return;
    }

    let columns = grid_columns(area.width);
    let card_width = area.width / columns as u16;
    let visible_rows = usize::from(area.height / CARD_HEIGHT);
    let first_row = first_visible_row(selected, columns, visible_rows);

    for (index, record) in cards.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let column = index % columns;
        let card_area = Rect {
            x: area.x + column as u16 * card_width,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: card_width,
            height: CARD_HEIGHT,
        };
        render_card(frame, card_area, record, index == selected, templates, theme);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    record: &Record,
    selected: bool,
    templates: &TemplateContext,
    theme: &Theme,
) {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let style = if selected {
        theme.card_selected
    } else {
        theme.card
    };

    let cover = if record.cover.is_empty() {
        String::from("(no cover)")
    } else {
        templates.resolve(&record.cover)
    };

    let lines = vec![
        Line::from(Span::styled(truncate_to_width(&record.name, inner_width), style)),
        Line::from(Span::styled(format!("#{}", record.id), theme.muted)),
        Line::from(Span::styled(truncate_to_width(&cover, inner_width), theme.muted)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if selected { theme.accent } else { theme.muted });
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
