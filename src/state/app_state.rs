//! Catalog state owned by the single controller.
//!
//! Everything the grid, search bar and viewer need lives here; no module
//! keeps its own copy. Mutations come in as [`CatalogEvent`]s through
//! [`AppState::dispatch`], which returns the [`Command`]s the impure shell
//! must carry out.
//!
//! [`CatalogEvent`]: crate::state::event::CatalogEvent
//! [`Command`]: crate::state::event::Command

use crate::model::{FetchError, Record, RecordId, SortKey};
use crate::state::pagination::{RenderInstruction, ViewController};
use crate::state::query;
use crate::state::record_store::RecordStore;
use crate::state::text_input::TextInput;
use std::num::NonZeroUsize;
use tracing::debug;

// ===== FocusPane =====

/// Which part of the screen receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Card grid; movement keys move the selection.
    #[default]
    Grid,
    /// Search bar; keys edit the query.
    Search,
    /// Viewer pane; page keys scroll.
    Viewer,
    /// Import path prompt overlay.
    ImportPrompt,
}

// ===== ViewerState =====

/// Embedded viewer pane contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// No document shown.
    #[default]
    Closed,
    /// A delivered document.
    Open {
        /// Record the document belongs to.
        record: Record,
        /// Document text as fetched.
        document: String,
        /// First visible line.
        scroll: u16,
        /// Viewer fills the content area.
        fullscreen: bool,
    },
}

impl ViewerState {
    /// Whether a document is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, ViewerState::Open { .. })
    }

    /// Identifier of the shown record.
    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            ViewerState::Open { record, .. } => Some(record.id),
            ViewerState::Closed => None,
        }
    }
}

// ===== StatusMessage =====

/// Severity of a [`StatusMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Progress or confirmation.
    Info,
    /// Something failed; drawn in the error style.
    Error,
}

/// One-line message shown in the status bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub kind: StatusKind,
    /// Message text.
    pub text: String,
}

impl StatusMessage {
    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

// ===== AppState =====

/// Complete UI state of the catalog browser.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) store: RecordStore,
    pub(crate) search: TextInput,
    pub(crate) sort: SortKey,
    pub(crate) pagination: ViewController,
    /// Cards currently rendered, maintained from render instructions.
    pub(crate) grid: Vec<Record>,
    pub(crate) selected: usize,
    /// Embedded viewer contents.
    pub viewer: ViewerState,
    /// Pane receiving keys.
    pub focus: FocusPane,
    /// Status bar message, if any.
    pub status: Option<StatusMessage>,
    /// Active theme.
    pub dark_mode: bool,
    /// Help overlay shown.
    pub help_visible: bool,
    /// Path typed into the import prompt.
    pub import_prompt: TextInput,
    /// Viewer loads started but not yet delivered.
    pub pending_loads: usize,
}

impl AppState {
    /// Empty catalog with the given page size, sort and theme.
    pub fn new(page_size: NonZeroUsize, sort: SortKey, dark_mode: bool) -> Self {
        Self {
            store: RecordStore::new(),
            search: TextInput::default(),
            sort,
            pagination: ViewController::new(page_size),
            grid: Vec::new(),
            selected: 0,
            viewer: ViewerState::Closed,
            focus: FocusPane::Grid,
            status: None,
            dark_mode,
            help_visible: false,
            import_prompt: TextInput::default(),
            pending_loads: 0,
        }
    }

    // ===== Read access =====

    /// Full fetched record set.
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    /// Record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Search bar buffer.
    pub fn search(&self) -> &TextInput {
        &self.search
    }

    /// Current search text.
    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    /// Current sort.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Pagination controller.
    pub fn pagination(&self) -> &ViewController {
        &self.pagination
    }

    /// Cards currently on screen, in order.
    pub fn grid(&self) -> &[Record] {
        &self.grid
    }

    /// Index of the selected card within [`AppState::grid`].
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Record under the selection, if the grid is non-empty.
    pub fn selected_record(&self) -> Option<&Record> {
        self.grid.get(self.selected)
    }

    /// `visible of total`, as shown in the status bar.
    pub fn count_label(&self) -> String {
        format!(
            "Zones Loaded: {} of {}",
            self.pagination.visible_count(),
            self.pagination.total()
        )
    }

    /// Whether "Load More" has anything left to show.
    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    // ===== Pipeline =====

    /// Apply a pagination render instruction to the rendered grid.
    pub(crate) fn apply_render(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::Replace(records) => {
                self.grid = records;
                self.selected = 0;
            }
            RenderInstruction::Append(records) => {
                self.grid.extend(records);
            }
        }
    }

    /// Recompute the filtered view from scratch and return to page 0.
    pub(crate) fn recompute_view(&mut self) {
        let view = query::apply(self.store.records(), self.search.text(), self.sort);
        debug!(
            search = self.search.text(),
            sort = ?self.sort,
            matched = view.len(),
            "View recomputed"
        );
        let instruction = self.pagination.reset(view);
        self.apply_render(instruction);
    }

    /// Install a load result.
    ///
    /// On failure the previous records, view and pagination stay as they were
    /// and an error message is shown.
    pub(crate) fn records_loaded(&mut self, result: Result<Vec<Record>, FetchError>) {
        match self.store.replace_with(result) {
            Ok(()) => {
                self.recompute_view();
                self.status = None;
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(format!("Error loading zones: {err}")));
            }
        }
    }

    pub(crate) fn set_search_input(&mut self, input: TextInput) {
        let changed = input.text() != self.search.text();
        self.search = input;
        if changed {
            self.recompute_view();
        }
    }

    pub(crate) fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute_view();
    }

    pub(crate) fn load_more(&mut self) -> bool {
        match self.pagination.advance() {
            Some(instruction) => {
                self.apply_render(instruction);
                true
            }
            None => false,
        }
    }

    // ===== Grid cursor =====

    /// Move the card cursor by `delta`, clamped to the rendered grid.
    pub fn move_selection(&mut self, delta: isize) {
        if self.grid.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.grid.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
