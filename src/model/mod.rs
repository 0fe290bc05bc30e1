//! Domain model types (pure).

pub mod error;
pub mod key_action;
pub mod record;
pub mod sort_key;

// Re-export for convenience
pub use error::{
    AppError, CookieApplyWarning, DecodeError, FetchError, ImportError, StoreError, TemplateError,
};
pub use key_action::KeyAction;
pub use record::{Record, RecordId, parse_records};
pub use sort_key::SortKey;
