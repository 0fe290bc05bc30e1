//! Export and import of persisted state as `.data` files.

use crate::codec::{CookieJar, KeyValueStore, decode, encode};
use crate::model::{CookieApplyWarning, ImportError, StoreError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Key-value pairs written.
    pub keys_written: usize,
    /// Cookie assignments applied.
    pub cookies_applied: usize,
    /// Malformed cookie entries that were skipped.
    pub cookies_skipped: Vec<CookieApplyWarning>,
    /// Well-formed cookie assignments the jar failed to persist.
    pub cookies_failed: usize,
}

/// Export file name: Unix milliseconds with a `.data` extension.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("{}.data", now.timestamp_millis())
}

/// Write the current stores to `<dir>/<millis>.data`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory or file cannot be written.
pub fn export_to_dir(
    kv: &dyn KeyValueStore,
    cookies: &dyn CookieJar,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, StoreError> {
    let blob = encode(&kv.items(), &cookies.cookie_header());
    let path = dir.join(export_file_name(now));

    let io_err = |source| StoreError::Io {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;
    std::fs::write(&path, blob).map_err(io_err)?;

    info!(path = %path.display(), "State exported");
    Ok(path)
}

/// Decode `blob` and replay it against the stores.
///
/// The key-value segment is applied in one batch. Cookie assignments are
/// then applied one at a time; failures are counted and do not stop the
/// remaining assignments.
///
/// # Errors
///
/// - [`ImportError::Decode`] when the key-value segment is malformed; no
///   store is touched
/// - [`ImportError::Store`] when the key-value batch cannot be saved; no
///   cookie is applied
pub fn import_blob(
    blob: &str,
    kv: &mut dyn KeyValueStore,
    cookies: &mut dyn CookieJar,
) -> Result<ImportReport, ImportError> {
    let decoded = decode(blob)?;

    let keys_written = decoded.kv_ops.len();
    kv.set_items(decoded.kv_ops)?;

    let mut report = ImportReport {
        keys_written,
        cookies_skipped: decoded.cookie_warnings,
        ..ImportReport::default()
    };

    for warning in &report.cookies_skipped {
        warn!(%warning, "Skipping cookie entry");
    }

    for assignment in &decoded.cookie_ops {
        match cookies.apply(assignment) {
            Ok(()) => report.cookies_applied += 1,
            Err(err) => {
                warn!(cookie = %assignment.name, error = %err, "Failed to apply cookie");
                report.cookies_failed += 1;
            }
        }
    }

    info!(
        keys = report.keys_written,
        cookies = report.cookies_applied,
        skipped = report.cookies_skipped.len(),
        "State imported"
    );
    Ok(report)
}

/// Read a `.data` file and import it.
///
/// # Errors
///
/// [`ImportError::Read`] if the file cannot be read, otherwise as
/// [`import_blob`].
pub fn import_file(
    path: &Path,
    kv: &mut dyn KeyValueStore,
    cookies: &mut dyn CookieJar,
) -> Result<ImportReport, ImportError> {
    let blob = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_blob(&blob, kv, cookies)
}
