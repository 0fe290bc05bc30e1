//! Local file reads.

use crate::model::FetchError;
use std::path::Path;

/// Read a whole file as UTF-8 text.
///
/// # Errors
///
/// Returns [`FetchError::Io`] carrying the path for any read failure,
/// including invalid UTF-8.
pub fn read_text(path: &Path) -> Result<String, FetchError> {
    std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })
}
