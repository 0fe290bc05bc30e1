//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod event;
pub mod pagination;
pub mod query;
pub mod record_store;
pub mod text_input;

// Re-export for convenience
pub use app_state::{AppState, FocusPane, StatusKind, StatusMessage, ViewerState};
pub use event::{CatalogEvent, Command};
pub use pagination::{RenderInstruction, ViewController};
pub use query::{FilteredView, NameCollation, apply};
pub use record_store::RecordStore;
pub use text_input::TextInput;
