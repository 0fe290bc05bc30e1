//! Embedded viewer pane showing the loaded document.

use super::styles::Theme;
use crate::state::ViewerState;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draw the open document into `area`. Draws nothing when closed.
///
/// The title carries the record's name and id; the bottom border lists the
/// viewer keys.
pub fn render_viewer(
    frame: &mut Frame,
    area: Rect,
    viewer: &ViewerState,
    focused: bool,
    theme: &Theme,
) {
    let ViewerState::Open {
        record,
        document,
        scroll,
        fullscreen,
    } = viewer
    else {
        return;
    };

    let hint = if *fullscreen {
        " f: exit fullscreen · b: pop out · Esc: close "
    } else {
        " f: fullscreen · b: pop out · Esc: close "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::styled(format!(" {} ", record.name), theme.accent),
            Span::styled(format!("#{} ", record.id), theme.muted),
        ]))
        .title_bottom(Line::from(Span::styled(hint, theme.muted)))
        .border_style(if focused { theme.accent } else { theme.muted });

    let body: Vec<Line> = document.lines().map(Line::raw).collect();
    let paragraph = Paragraph::new(body)
        .block(block)
        .style(theme.base)
        .wrap(Wrap { trim: false })
        .scroll((*scroll, 0));
    frame.render_widget(paragraph, area);
}
