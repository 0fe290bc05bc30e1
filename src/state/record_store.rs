//! Full fetched record set.

use crate::model::{FetchError, Record};
use tracing::{info, warn};

/// Holds the complete record list as last fetched.
///
/// The set is only ever replaced wholesale; a failed load leaves the
/// previous records in place.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    loaded: bool,
}

impl RecordStore {
    /// Empty, not yet loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored set with the outcome of a load.
    ///
    /// # Errors
    ///
    /// Passes the fetch error through untouched after logging it; the stored
    /// set is not modified in that case.
    pub fn replace_with(
        &mut self,
        result: Result<Vec<Record>, FetchError>,
    ) -> Result<(), FetchError> {
        match result {
            Ok(records) => {
                info!(count = records.len(), "Record list loaded");
                self.records = records;
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Record list load failed; keeping previous set");
                Err(err)
            }
        }
    }

    /// Records in fetch order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True once at least one load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Find a record by the string form of its identifier.
    ///
    /// `None` is the silent "no matching record" outcome.
    pub fn find_by_id_str(&self, raw: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id.matches_str(raw))
    }
}
