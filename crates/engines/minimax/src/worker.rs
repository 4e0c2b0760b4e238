//! Background search.
//!
//! One search at a time runs on Tokio's blocking pool over its own copy of the
//! board. The finished result waits in a single slot until the owner of the
//! live board collects it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tilechess_core::{Board, Engine, SearchResult};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Completed(SearchResult),
}

#[derive(Debug)]
struct Shared {
    state: Mutex<SearchState>,
    done: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, next: SearchState) {
        *self.lock() = next;
        self.done.notify_waiters();
    }
}

/// Runs engine searches off the caller's thread. Cheap to clone; clones share
/// the same slot.
#[derive(Debug, Clone)]
pub struct SearchWorker {
    shared: Arc<Shared>,
}

impl Default for SearchWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchWorker {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SearchState::Idle),
                done: Notify::new(),
            }),
        }
    }

    /// Starts `engine` on a snapshot of `board`. Returns false without doing
    /// anything if a search is running, a result has not been collected, or
    /// there is no Tokio runtime to run it on.
    pub fn start<E: Engine + 'static>(&self, board: &Board, mut engine: E) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            error!(engine = engine.name(), "search not started: no Tokio runtime");
            return false;
        };

        {
            let mut state = self.shared.lock();
            if *state != SearchState::Idle {
                return false;
            }
            *state = SearchState::Searching;
        }

        let snapshot = board.clone();
        let shared = Arc::clone(&self.shared);
        debug!(engine = engine.name(), side = %snapshot.active_color(), "search started");

        runtime.spawn(async move {
            let joined = tokio::task::spawn_blocking(move || engine.search(&snapshot)).await;
            match joined {
                Ok(result) => {
                    debug!(nodes = result.nodes, score = result.score, "search completed");
                    shared.finish(SearchState::Completed(result));
                }
                Err(err) => {
                    error!(error = %err, "search task failed");
                    shared.finish(SearchState::Idle);
                }
            }
        });
        true
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.shared.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        *self.shared.lock() == SearchState::Searching
    }

    /// Takes a completed result, if any, and returns the worker to idle.
    pub fn try_take(&self) -> Option<SearchResult> {
        let mut state = self.shared.lock();
        match std::mem::replace(&mut *state, SearchState::Idle) {
            SearchState::Completed(result) => Some(result),
            other => {
                *state = other;
                None
            }
        }
    }

    /// Waits for the running search and takes its result. Returns `None`
    /// straight away when idle, or if the search died.
    pub async fn wait(&self) -> Option<SearchResult> {
        loop {
            // Register before checking so a finish in between is not missed.
            let notified = self.shared.done.notified();
            {
                let mut state = self.shared.lock();
                match std::mem::replace(&mut *state, SearchState::Idle) {
                    SearchState::Completed(result) => return Some(result),
                    SearchState::Idle => return None,
                    SearchState::Searching => *state = SearchState::Searching,
                }
            }
            notified.await;
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
