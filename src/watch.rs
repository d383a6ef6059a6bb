//! File watching for refresh-on-change
//!
//! Uses the `notify` crate with debouncing so an editor's save (often a
//! write plus a rename) triggers one refresh.

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

type EventResult = Result<Vec<DebouncedEvent>, notify::Error>;

/// Watches a single file for changes
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<EventResult>,
    path: PathBuf,
}

impl FileWatcher {
    /// Watch `path`. The parent directory is watched non-recursively so the
    /// watch survives editors that replace the file on save.
    pub fn new(path: &Path, debounce: Duration) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(debounce, tx)?;

        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching {}", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the watched file changes.
    ///
    /// Returns `false` once the watcher has shut down.
    pub fn wait_for_change(&self) -> bool {
        loop {
            match self.rx.recv_timeout(Duration::from_secs(1)) {
                Ok(result) => {
                    if self.is_relevant(result) {
                        return true;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    fn is_relevant(&self, result: EventResult) -> bool {
        match result {
            Ok(events) => events.iter().any(|event| {
                // Continuous events during active changes - wait for the settled one
                !matches!(event.kind, DebouncedEventKind::AnyContinuous) && event.path == self.path
            }),
            Err(e) => {
                tracing::warn!("File watcher error: {:?}", e);
                false
            }
        }
    }
}
