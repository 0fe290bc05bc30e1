//! Screen layout: header, search bar, card grid, viewer, status bar.

use super::constants::{
    HEADER_HEIGHT, POPUP_WIDTH_PERCENT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT,
    VIEWER_WIDTH_PERCENT,
};
use super::grid::render_grid;
use super::help::{centered_rect, render_help_overlay};
use super::search_input::SearchInput;
use super::styles::Theme;
use super::viewer_pane::render_viewer;
use crate::config::TemplateContext;
use crate::state::{AppState, FocusPane, StatusKind, ViewerState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

/// Areas produced by the last render, used for cursor movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderedAreas {
    /// Where the cards were drawn; `None` while a fullscreen viewer hides them.
    pub grid: Option<Rect>,
    /// Height of the viewer body, if the viewer is visible.
    pub viewer: Option<Rect>,
}

/// Render the whole catalog screen.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    templates: &TemplateContext,
    theme: &Theme,
) -> RenderedAreas {
    frame.render_widget(Block::default().style(theme.base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, theme);

    let search = SearchInput::new(state.search(), theme)
        .placeholder("Search zones...  (/)")
        .focused(state.focus == FocusPane::Search);
    frame.render_widget(search, chunks[1]);

    let areas = render_content(frame, chunks[2], state, templates, theme);

    render_status_bar(frame, chunks[3], state, theme);

    if state.focus == FocusPane::ImportPrompt {
        render_import_prompt(frame, state, theme);
    }
    if state.help_visible {
        render_help_overlay(frame, theme);
    }

    areas
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode = if state.dark_mode { "dark" } else { "light" };
    let line = Line::from(vec![
        Span::styled(" ZoneGrid ", theme.header),
        Span::raw("  "),
        Span::styled(format!("Sort: {}", state.sort().label()), theme.accent),
        Span::raw("  "),
        Span::styled(state.count_label(), theme.card),
        Span::raw("  "),
        Span::styled(format!("[{mode}]"), theme.muted),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    templates: &TemplateContext,
    theme: &Theme,
) -> RenderedAreas {
    let viewer_focused = state.focus == FocusPane::Viewer;

    match &state.viewer {
        ViewerState::Open {
            fullscreen: true, ..
        } => {
            render_viewer(frame, area, &state.viewer, viewer_focused, theme);
            RenderedAreas {
                grid: None,
                viewer: Some(area),
            }
        }
        ViewerState::Open { .. } => {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - VIEWER_WIDTH_PERCENT),
                    Constraint::Percentage(VIEWER_WIDTH_PERCENT),
                ])
                .split(area);
            let grid = render_catalog(frame, split[0], state, templates, theme);
            render_viewer(frame, split[1], &state.viewer, viewer_focused, theme);
            RenderedAreas {
                grid: Some(grid),
                viewer: Some(split[1]),
            }
        }
        ViewerState::Closed => RenderedAreas {
            grid: Some(render_catalog(frame, area, state, templates, theme)),
            viewer: None,
        },
    }
}

/// Grid plus the "Load More" hint row. Returns the grid area.
fn render_catalog(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    templates: &TemplateContext,
    theme: &Theme,
) -> Rect {
    if !state.has_more() {
        render_grid(frame, area, state.grid(), state.selected_index(), templates, theme);
        return area;
    }

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    render_grid(frame, split[0], state.grid(), state.selected_index(), templates, theme);

    let hint = Paragraph::new(Span::styled("[ Load More (m) ]", theme.accent))
        .alignment(Alignment::Center);
    frame.render_widget(hint, split[1]);
    split[0]
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let line = match &state.status {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Error => theme.error,
                StatusKind::Info => theme.card,
            };
            Line::from(Span::styled(status.text.clone(), style))
        }
        None if state.pending_loads > 0 => Line::from(Span::styled("Loading zone...", theme.muted)),
        None => Line::from(Span::styled(
            "Enter: open  /: search  o: sort  m: more  ?: help  q: quit",
            theme.muted,
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_import_prompt(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let full = frame.area();
    let width_area = centered_rect(POPUP_WIDTH_PERCENT, 100, full);
    let area = Rect {
        y: full.y + full.height.saturating_sub(SEARCH_INPUT_HEIGHT) / 2,
        height: SEARCH_INPUT_HEIGHT.min(full.height),
        ..width_area
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        SearchInput::new(&state.import_prompt, theme)
            .title(" Import file (Enter to import, Esc to cancel) ")
            .focused(true),
        area,
    );
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
