//! Typed catalog events and the commands they produce.
//!
//! Input handlers never act on records directly. They emit a
//! [`CatalogEvent`] naming what happened (for cards, by identifier), and
//! [`AppState::dispatch`] decides what it means. Work that needs the outside
//! world comes back as [`Command`]s.

use crate::model::{FetchError, Record, RecordId, SortKey};
use crate::state::app_state::{AppState, FocusPane, StatusMessage, ViewerState};
use crate::state::text_input::TextInput;
use crate::viewer::{RenderTarget, ViewerEvent};
use tracing::debug;

/// Something that happened to the catalog.
#[derive(Debug)]
pub enum CatalogEvent {
    /// The record list fetch finished.
    RecordsLoaded(Result<Vec<Record>, FetchError>),
    /// The search bar content changed.
    SearchChanged(TextInput),
    /// The sort selector changed.
    SortChanged(SortKey),
    /// "Load More" was requested.
    LoadMore,
    /// A card was activated.
    OpenRecord {
        /// Card identifier.
        id: RecordId,
        /// Pane or pop-out.
        target: RenderTarget,
    },
    /// Open by identifier string (startup `id` parameter).
    OpenByIdStr(String),
    /// A background viewer fetch completed.
    ViewerDelivered(ViewerEvent),
    /// Close the viewer pane and return focus to the grid.
    CloseViewer,
    /// Switch the open viewer between split and fullscreen.
    ToggleFullscreen,
    /// Flip the theme and persist the choice.
    ToggleDarkMode,
}

/// Side effect requested by [`AppState::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start loading `record` into `target`.
    Launch {
        /// Record to open.
        record: Record,
        /// Pane or pop-out.
        target: RenderTarget,
    },
    /// Write a fetched document to the detached target.
    WriteDetached {
        /// Record the document belongs to.
        record: Record,
        /// Fetched document text.
        document: String,
    },
    /// Store the dark-mode preference.
    PersistDarkMode(bool),
}

impl AppState {
    /// Apply one event and return the side effects it requires.
    pub fn dispatch(&mut self, event: CatalogEvent) -> Vec<Command> {
        match event {
            CatalogEvent::RecordsLoaded(result) => {
                self.records_loaded(result);
                Vec::new()
            }
            CatalogEvent::SearchChanged(input) => {
                self.set_search_input(input);
                Vec::new()
            }
            CatalogEvent::SortChanged(sort) => {
                self.set_sort(sort);
                Vec::new()
            }
            CatalogEvent::LoadMore => {
                self.load_more();
                Vec::new()
            }
            CatalogEvent::OpenRecord { id, target } => {
                let record = self.store.records().iter().find(|r| r.id == id).cloned();
                record
                    .map(|record| vec![Command::Launch { record, target }])
                    .unwrap_or_default()
            }
            CatalogEvent::OpenByIdStr(raw) => {
                let record = self.store.find_by_id_str(&raw).cloned();
                match record {
                    Some(record) => vec![Command::Launch {
                        record,
                        target: RenderTarget::Embedded,
                    }],
                    None => {
                        debug!(id = %raw, "No record matches startup id");
                        Vec::new()
                    }
                }
            }
            CatalogEvent::ViewerDelivered(event) => self.viewer_delivered(event),
            CatalogEvent::CloseViewer => {
                self.viewer = ViewerState::Closed;
                if self.focus == FocusPane::Viewer {
                    self.focus = FocusPane::Grid;
                }
                Vec::new()
            }
            CatalogEvent::ToggleFullscreen => {
                if let ViewerState::Open { fullscreen, .. } = &mut self.viewer {
                    *fullscreen = !*fullscreen;
                }
                Vec::new()
            }
            CatalogEvent::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                vec![Command::PersistDarkMode(self.dark_mode)]
            }
        }
    }

    fn viewer_delivered(&mut self, event: ViewerEvent) -> Vec<Command> {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match event {
            ViewerEvent::Loaded {
                record,
                target: RenderTarget::Embedded,
                document,
            } => {
                self.viewer = ViewerState::Open {
                    record,
                    document,
                    scroll: 0,
                    fullscreen: false,
                };
                self.focus = FocusPane::Viewer;
                Vec::new()
            }
            ViewerEvent::Loaded {
                record,
                target: RenderTarget::Detached,
                document,
            } => vec![Command::WriteDetached { record, document }],
            ViewerEvent::Failed { error, .. } => {
                self.status = Some(StatusMessage::error(format!("Failed to load zone: {error}")));
                Vec::new()
            }
        }
    }
}
