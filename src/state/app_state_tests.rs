//! Tests for AppState and event dispatch.

use super::*;
use crate::model::RecordId;
use crate::state::event::{CatalogEvent, Command};
use crate::viewer::{RenderTarget, ViewerEvent};
use std::path::PathBuf;

fn record(id: i64, name: &str) -> Record {
    Record::new(id, name, format!("{{HTML_URL}}/{id}.html"), "")
}

fn state(page_size: usize) -> AppState {
    AppState::new(NonZeroUsize::new(page_size).unwrap(), SortKey::Unordered, false)
}

fn loaded(page_size: usize, records: Vec<Record>) -> AppState {
    let mut state = state(page_size);
    state.dispatch(CatalogEvent::RecordsLoaded(Ok(records)));
    state
}

fn grid_names(state: &AppState) -> Vec<&str> {
    state.grid().iter().map(|r| r.name.as_str()).collect()
}

fn fetch_failure() -> FetchError {
    FetchError::Io {
        path: PathBuf::from("zones.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    }
}

fn type_search(state: &mut AppState, text: &str) {
    state.dispatch(CatalogEvent::SearchChanged(TextInput::new(text)));
}

// ===== Loading =====

#[test]
fn load_renders_first_page_in_original_order() {
    let state = loaded(2, vec![record(3, "C"), record(1, "A"), record(2, "B")]);

    assert_eq!(grid_names(&state), vec!["C", "A"]);
    assert_eq!(state.count_label(), "Zones Loaded: 2 of 3");
    assert!(state.has_more());
}

#[test]
fn load_applies_default_sort() {
    let mut state = AppState::new(NonZeroUsize::new(5).unwrap(), SortKey::Id, false);
    state.dispatch(CatalogEvent::RecordsLoaded(Ok(vec![record(2, "B"), record(1, "A")])));

    assert_eq!(grid_names(&state), vec!["A", "B"]);
}

#[test]
fn failed_load_shows_error_and_keeps_grid() {
    let mut state = loaded(5, vec![record(1, "A")]);
    state.dispatch(CatalogEvent::RecordsLoaded(Err(fetch_failure())));

    assert_eq!(grid_names(&state), vec!["A"]);
    let status = state.status.clone().expect("error should be shown");
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Error loading zones"));
}

#[test]
fn successful_reload_clears_error() {
    let mut state = state(5);
    state.dispatch(CatalogEvent::RecordsLoaded(Err(fetch_failure())));
    state.dispatch(CatalogEvent::RecordsLoaded(Ok(vec![record(1, "A")])));

    assert!(state.status.is_none());
}

// ===== Search / sort / load more =====

#[test]
fn search_resets_to_first_page() {
    let records = (0..10).map(|i| record(i, &format!("zone {i}"))).collect();
    let mut state = loaded(3, records);
    state.dispatch(CatalogEvent::LoadMore);
    assert_eq!(state.pagination().page_index(), 1);

    type_search(&mut state, "zone");

    assert_eq!(state.pagination().page_index(), 0);
    assert_eq!(state.grid().len(), 3);
}

#[test]
fn unchanged_search_text_keeps_pagination() {
    let records = (0..10).map(|i| record(i, &format!("zone {i}"))).collect();
    let mut state = loaded(3, records);
    state.dispatch(CatalogEvent::LoadMore);

    // Cursor movement produces a new input with the same text.
    state.dispatch(CatalogEvent::SearchChanged(TextInput::new("")));

    assert_eq!(state.pagination().page_index(), 1);
}

#[test]
fn sort_change_keeps_search_filter() {
    let mut state = loaded(
        10,
        vec![record(3, "Gamma"), record(1, "Alpha"), record(2, "Zed")],
    );
    type_search(&mut state, "a");
    state.dispatch(CatalogEvent::SortChanged(SortKey::Name));

    assert_eq!(grid_names(&state), vec!["Alpha", "Gamma"]);
}

#[test]
fn load_more_appends_and_stops_at_end() {
    let mut state = loaded(2, vec![record(1, "A"), record(2, "B"), record(3, "C")]);

    state.dispatch(CatalogEvent::LoadMore);
    assert_eq!(grid_names(&state), vec!["A", "B", "C"]);
    assert!(!state.has_more());

    state.dispatch(CatalogEvent::LoadMore);
    assert_eq!(state.grid().len(), 3);
}

#[test]
fn load_more_keeps_selection() {
    let mut state = loaded(2, vec![record(1, "A"), record(2, "B"), record(3, "C")]);
    state.move_selection(1);
    state.dispatch(CatalogEvent::LoadMore);

    assert_eq!(state.selected_index(), 1);
}

#[test]
fn move_selection_clamps_to_grid() {
    let mut state = loaded(5, vec![record(1, "A"), record(2, "B")]);

    state.move_selection(10);
    assert_eq!(state.selected_index(), 1);
    state.move_selection(-10);
    assert_eq!(state.selected_index(), 0);
}

// ===== Opening records =====

#[test]
fn open_record_by_id_emits_launch() {
    let mut state = loaded(5, vec![record(1, "A"), record(2, "B")]);

    let commands = state.dispatch(CatalogEvent::OpenRecord {
        id: RecordId::new(2),
        target: RenderTarget::Embedded,
    });

    assert_eq!(
        commands,
        vec![Command::Launch {
            record: record(2, "B"),
            target: RenderTarget::Embedded
        }]
    );
}

#[test]
fn open_unknown_id_is_silent_noop() {
    let mut state = loaded(5, vec![record(1, "A")]);

    let commands = state.dispatch(CatalogEvent::OpenRecord {
        id: RecordId::new(99),
        target: RenderTarget::Embedded,
    });

    assert!(commands.is_empty());
    assert!(state.status.is_none());
}

#[test]
fn open_by_id_str_requires_exact_match() {
    let mut state = loaded(5, vec![record(7, "Seven")]);

    assert!(state.dispatch(CatalogEvent::OpenByIdStr("07".to_string())).is_empty());
    assert_eq!(
        state.dispatch(CatalogEvent::OpenByIdStr("7".to_string())).len(),
        1
    );
}

#[test]
fn embedded_delivery_opens_viewer() {
    let mut state = loaded(5, vec![record(1, "A")]);
    state.pending_loads = 1;

    let commands = state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
        record: record(1, "A"),
        target: RenderTarget::Embedded,
        document: "<p>A</p>".to_string(),
    }));

    assert!(commands.is_empty());
    assert_eq!(state.viewer.record_id(), Some(RecordId::new(1)));
    assert_eq!(state.focus, FocusPane::Viewer);
    assert_eq!(state.pending_loads, 0);
}

#[test]
fn last_delivery_wins_viewer() {
    let mut state = loaded(5, vec![record(1, "A"), record(2, "B")]);

    for id in [1, 2] {
        state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
            record: record(id, "x"),
            target: RenderTarget::Embedded,
            document: String::new(),
        }));
    }

    assert_eq!(state.viewer.record_id(), Some(RecordId::new(2)));
}

#[test]
fn failed_delivery_leaves_viewer_untouched() {
    let mut state = loaded(5, vec![record(1, "A"), record(2, "B")]);
    state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
        record: record(1, "A"),
        target: RenderTarget::Embedded,
        document: "<p>A</p>".to_string(),
    }));

    state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Failed {
        record: record(2, "B"),
        target: RenderTarget::Embedded,
        error: fetch_failure(),
    }));

    assert_eq!(state.viewer.record_id(), Some(RecordId::new(1)));
    let status = state.status.clone().expect("failure should be shown");
    assert!(status.text.starts_with("Failed to load zone"));
}

#[test]
fn detached_delivery_requests_file_write() {
    let mut state = loaded(5, vec![record(1, "A")]);

    let commands = state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
        record: record(1, "A"),
        target: RenderTarget::Detached,
        document: "doc".to_string(),
    }));

    assert_eq!(
        commands,
        vec![Command::WriteDetached {
            record: record(1, "A"),
            document: "doc".to_string()
        }]
    );
    assert!(!state.viewer.is_open());
}

#[test]
fn close_viewer_returns_focus_to_grid() {
    let mut state = loaded(5, vec![record(1, "A")]);
    state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
        record: record(1, "A"),
        target: RenderTarget::Embedded,
        document: String::new(),
    }));

    state.dispatch(CatalogEvent::CloseViewer);

    assert!(!state.viewer.is_open());
    assert_eq!(state.focus, FocusPane::Grid);
}

#[test]
fn fullscreen_toggle_only_applies_to_open_viewer() {
    let mut state = loaded(5, vec![record(1, "A")]);
    state.dispatch(CatalogEvent::ToggleFullscreen);
    assert!(!state.viewer.is_open());

    state.dispatch(CatalogEvent::ViewerDelivered(ViewerEvent::Loaded {
        record: record(1, "A"),
        target: RenderTarget::Embedded,
        document: String::new(),
    }));
    state.dispatch(CatalogEvent::ToggleFullscreen);

    assert!(matches!(state.viewer, ViewerState::Open { fullscreen: true, .. }));
}

#[test]
fn dark_mode_toggle_requests_persist() {
    let mut state = state(5);

    assert_eq!(
        state.dispatch(CatalogEvent::ToggleDarkMode),
        vec![Command::PersistDarkMode(true)]
    );
    assert!(state.dark_mode);
}
