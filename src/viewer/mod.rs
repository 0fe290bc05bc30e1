//! Viewer launcher: resolves a record's content and delivers it to a target.
//!
//! Document fetches run on short-lived background threads and report back
//! through a channel that the event loop drains with [`ViewerLauncher::poll`].
//! Nothing is cancelled: every load finishes, and whichever result is
//! drained last owns the viewer.

use crate::config::TemplateContext;
use crate::model::{FetchError, Record, RecordId};
use crate::source::{DocumentFetcher, Location};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where a fetched document is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// The viewer pane inside the TUI.
    Embedded,
    /// A standalone HTML file outside the TUI.
    Detached,
}

/// Immediate result of [`ViewerLauncher::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The record points outside the catalog; leave the app and go there.
    Navigate(String),
    /// A fetch is in flight; a [`ViewerEvent`] will follow.
    Pending {
        /// Record being fetched.
        record_id: RecordId,
        /// Resolved document location.
        location: String,
    },
}

/// Completion of a background document fetch.
#[derive(Debug)]
pub enum ViewerEvent {
    /// The document arrived.
    Loaded {
        /// Record that was opened.
        record: Record,
        /// Where the document goes.
        target: RenderTarget,
        /// Full document text.
        document: String,
    },
    /// The fetch failed; the viewer keeps its previous content.
    Failed {
        /// Record that was opened.
        record: Record,
        /// Where the document would have gone.
        target: RenderTarget,
        /// Why the fetch failed.
        error: FetchError,
    },
}

/// Opens records through a [`DocumentFetcher`].
pub struct ViewerLauncher {
    templates: TemplateContext,
    fetcher: Arc<dyn DocumentFetcher>,
    tx: Sender<ViewerEvent>,
    rx: Receiver<ViewerEvent>,
}

impl ViewerLauncher {
    /// Launcher resolving with `templates` and fetching through `fetcher`.
    pub fn new(templates: TemplateContext, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        let (tx, rx) = channel();
        Self {
            templates,
            fetcher,
            tx,
            rx,
        }
    }

    /// Content URL with placeholders substituted.
    pub fn resolve_url(&self, record: &Record) -> String {
        self.templates.resolve(&record.url)
    }

    /// Cover URL with placeholders substituted.
    pub fn resolve_cover(&self, record: &Record) -> String {
        self.templates.resolve(&record.cover)
    }

    /// Placeholder values in use.
    pub fn templates(&self) -> &TemplateContext {
        &self.templates
    }

    /// Start opening `record` in `target`.
    ///
    /// External records are never fetched; the caller gets
    /// [`LaunchOutcome::Navigate`] with the raw URL.
    pub fn open(&self, record: &Record, target: RenderTarget) -> LaunchOutcome {
        if record.is_external() {
            info!(id = %record.id, url = %record.url, "Navigating to external record");
            return LaunchOutcome::Navigate(record.url.clone());
        }

        let resolved = self.resolve_url(record);
        let location = Location::parse(&resolved);
        debug!(id = %record.id, %location, ?target, "Loading viewer document");

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let job_record = record.clone();
        let job_location = location.clone();
        let job = move || {
            let event = match fetcher.fetch_text(&job_location) {
                Ok(document) => ViewerEvent::Loaded {
                    record: job_record,
                    target,
                    document,
                },
                Err(error) => ViewerEvent::Failed {
                    record: job_record,
                    target,
                    error,
                },
            };
            // Receiver gone means the app is shutting down.
            let _ = tx.send(event);
        };

        if let Err(err) = std::thread::Builder::new()
            .name("viewer-fetch".to_string())
            .spawn(job.clone())
        {
            warn!(error = %err, "Could not spawn fetch thread; loading inline");
            job();
        }

        LaunchOutcome::Pending {
            record_id: record.id,
            location: location.to_string(),
        }
    }

    /// Drain every completed fetch without blocking, in completion order.
    pub fn poll(&self) -> Vec<ViewerEvent> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next completed fetch.
    pub fn wait(&self, timeout: Duration) -> Option<ViewerEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Write a document for the detached target as `<dir>/<id>.html`.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory or file cannot be
/// written.
pub fn write_detached(dir: &Path, record: &Record, document: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.html", record.id));
    std::fs::write(&path, document)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned documents keyed by location string.
    struct FakeFetcher {
        documents: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl DocumentFetcher for FakeFetcher {
        fn fetch_text(&self, location: &Location) -> Result<String, FetchError> {
            let key = location.to_string();
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(key.clone());
            }
            self.documents
                .get(&key)
                .cloned()
                .ok_or_else(|| FetchError::Io {
                    path: PathBuf::from(&key),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                })
        }
    }

    fn launcher(fetcher: Arc<FakeFetcher>) -> ViewerLauncher {
        ViewerLauncher::new(TemplateContext::from_bases("/covers", "/html"), fetcher)
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn external_record_navigates_without_fetching() {
        let fetcher = Arc::new(FakeFetcher::new(&[]));
        let launcher = launcher(Arc::clone(&fetcher));
        let record = Record::new(1, "Ext", "https://example.com/play", "");

        let outcome = launcher.open(&record, RenderTarget::Embedded);

        assert_eq!(
            outcome,
            LaunchOutcome::Navigate("https://example.com/play".to_string())
        );
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[test]
    fn template_record_is_resolved_and_delivered() {
        let fetcher = Arc::new(FakeFetcher::new(&[("/html/1.html", "<p>one</p>")]));
        let launcher = launcher(fetcher);
        let record = Record::new(1, "One", "{HTML_URL}/1.html", "{COVER_URL}/1.png");

        let outcome = launcher.open(&record, RenderTarget::Embedded);
        assert_eq!(
            outcome,
            LaunchOutcome::Pending {
                record_id: RecordId::new(1),
                location: "/html/1.html".to_string()
            }
        );

        match launcher.wait(WAIT) {
            Some(ViewerEvent::Loaded {
                record,
                target,
                document,
            }) => {
                assert_eq!(record.id, RecordId::new(1));
                assert_eq!(target, RenderTarget::Embedded);
                assert_eq!(document, "<p>one</p>");
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn fetch_failure_is_reported_as_failed_event() {
        let launcher = launcher(Arc::new(FakeFetcher::new(&[])));
        let record = Record::new(2, "Gone", "{HTML_URL}/2.html", "");

        launcher.open(&record, RenderTarget::Detached);

        match launcher.wait(WAIT) {
            Some(ViewerEvent::Failed { record, target, .. }) => {
                assert_eq!(record.id, RecordId::new(2));
                assert_eq!(target, RenderTarget::Detached);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn resolve_cover_uses_cover_base() {
        let launcher = launcher(Arc::new(FakeFetcher::new(&[])));
        let record = Record::new(3, "C", "", "{COVER_URL}/3.png");

        assert_eq!(launcher.resolve_cover(&record), "/covers/3.png");
    }

    #[test]
    fn poll_is_empty_when_nothing_completed() {
        let launcher = launcher(Arc::new(FakeFetcher::new(&[])));
        assert!(launcher.poll().is_empty());
    }

    #[test]
    fn write_detached_names_file_after_id() {
        let dir = std::env::temp_dir().join("zonegrid_viewer_detached");
        let _ = std::fs::remove_dir_all(&dir);

        let record = Record::new(77, "Pop", "", "");
        let path = write_detached(&dir, &record, "<html></html>").unwrap();

        assert!(path.ends_with("77.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
