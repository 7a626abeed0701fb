// src/watch/watcher.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::engine::Orchestrator;
use crate::engine::summary::exit_code_for;
use crate::errors::{ReadyError, Result};

use super::guard::SingleFlight;
use super::patterns::IgnoreSet;

/// Reruns the orchestrator on filesystem changes, one run at a time.
///
/// A change that arrives while a run is in flight is dropped, not queued:
/// any burst during a run produces no extra run, and the first change after
/// the run completes starts exactly one more.
#[derive(Debug)]
pub struct WatchLoop {
    orchestrator: Arc<Orchestrator>,
    guard: Arc<SingleFlight>,
    /// Aggregate issue count of the most recently completed run.
    last_issues: Arc<AtomicU32>,
    fatal_tx: mpsc::UnboundedSender<ReadyError>,
    fatal_rx: mpsc::UnboundedReceiver<ReadyError>,
}

impl WatchLoop {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();
        Self {
            orchestrator,
            guard: SingleFlight::new(),
            last_issues: Arc::new(AtomicU32::new(0)),
            fatal_tx,
            fatal_rx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.guard.is_in_flight()
    }

    pub fn last_issue_count(&self) -> u32 {
        self.last_issues.load(Ordering::Acquire)
    }

    /// Exit code reflecting the most recently completed run.
    pub fn exit_code(&self) -> i32 {
        exit_code_for(self.last_issue_count())
    }

    /// Run the orchestrator to completion under the guard and record its
    /// aggregate.
    pub async fn run_once(&self) -> Result<()> {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("run already in flight; skipping");
            return Ok(());
        };
        let summary = self.orchestrator.run().await?;
        self.last_issues
            .store(summary.total_issues(), Ordering::Release);
        Ok(())
    }

    /// Start a rerun in the background unless one is already in flight.
    ///
    /// Returns the handle of the started run, or `None` when the request was
    /// dropped. A run that fails to start (e.g. a blank command) is reported
    /// to [`WatchLoop::watch`], which then stops with that error.
    pub fn request_run(&self) -> Option<JoinHandle<()>> {
        let Some(permit) = self.guard.try_acquire() else {
            debug!("change ignored; a run is already in flight");
            return None;
        };

        let orchestrator = Arc::clone(&self.orchestrator);
        let last_issues = Arc::clone(&self.last_issues);
        let fatal_tx = self.fatal_tx.clone();

        Some(tokio::spawn(async move {
            let _permit = permit;
            match orchestrator.run().await {
                Ok(summary) => {
                    last_issues.store(summary.total_issues(), Ordering::Release);
                }
                Err(err) => {
                    error!(error = %err, "rerun aborted");
                    let _ = fatal_tx.send(err);
                }
            }
        }))
    }

    /// Start the initial run, then watch `root` recursively and rerun on
    /// every relevant change until `shutdown` resolves.
    ///
    /// The initial run goes through [`WatchLoop::request_run`], so it is
    /// skipped when a run is already in flight and `shutdown` is honoured
    /// while it is still going. On shutdown the watcher is closed and the
    /// exit code of the last completed run is returned straight away (0 when
    /// none has completed); an in-flight run is not awaited.
    pub async fn watch<S>(
        mut self,
        root: impl Into<PathBuf>,
        ignore: IgnoreSet,
        shutdown: S,
    ) -> Result<i32>
    where
        S: Future<Output = ()>,
    {
        let root = root.into();
        // Canonicalize once so we have a stable base path.
        let root = root.canonicalize().unwrap_or(root);

        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

        // Closure called synchronously by notify whenever an event arrives.
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event_tx.send(event).is_err() {
                        debug!("watch loop gone; dropping notify event");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "file watch error");
                }
            },
            Config::default(),
        )?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        info!(root = ?root, ignore = ?ignore.patterns(), "file watcher started");

        self.request_run();

        tokio::pin!(shutdown);

        let code = loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("shutdown requested; closing watcher");
                    break self.exit_code();
                }

                Some(err) = self.fatal_rx.recv() => {
                    drop(watcher);
                    return Err(err);
                }

                event = event_rx.recv() => {
                    let Some(event) = event else {
                        warn!("watch event channel closed");
                        break self.exit_code();
                    };
                    if is_relevant(&event, &root, &ignore) {
                        debug!(kind = ?event.kind, paths = ?event.paths, "change detected");
                        self.request_run();
                    }
                }
            }
        };

        drop(watcher);
        Ok(code)
    }
}

/// Whether an event describes a change rather than a mere read.
pub fn is_change_event(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}

fn is_relevant(event: &Event, root: &Path, ignore: &IgnoreSet) -> bool {
    if !is_change_event(&event.kind) {
        return false;
    }
    // Rescans and other path-less notifications count as changes.
    event.paths.is_empty()
        || event
            .paths
            .iter()
            .any(|path| !ignore.is_ignored_path(root, path))
}
