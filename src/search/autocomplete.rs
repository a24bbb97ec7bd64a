//! Debounced location autocomplete
//!
//! Each text change restarts a quiet-window timer. When the window passes
//! without another edit, one lookup is issued for the latest text. Lookups
//! are tagged with a [`RequestSequence`] number and only the most recently
//! issued one may update the visible results.
//!
//! ```text
//! Idle ──edit──▶ PendingDebounce ──quiet window──▶ InFlight ──response──▶ Idle
//!                  ▲        │edit                      │edit
//!                  └────────┘◀─────────────────────────┘
//! ```

use super::sequence::RequestSequence;
use super::LocationSearch;
use crate::geo::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Observable controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteState {
    /// Nothing scheduled or outstanding
    Idle,
    /// Waiting for typing to pause
    PendingDebounce,
    /// The latest lookup has been sent and not answered
    InFlight,
}

#[derive(Debug, Default)]
struct Inner {
    /// Pending quiet-window timer
    timer: Option<JoinHandle<()>>,
    /// Bumped on every edit; a timer only fires if it still matches
    edits: u64,
    /// Sequence number of the unanswered latest lookup
    in_flight: Option<u64>,
    results: Vec<Location>,
}

/// Location autocomplete over any [`LocationSearch`]
///
/// Must be used inside a Tokio runtime; timers are spawned tasks.
#[derive(Debug)]
pub struct AutocompleteController<S> {
    search: Arc<S>,
    quiet_window: Duration,
    sequence: Arc<RequestSequence>,
    inner: Arc<Mutex<Inner>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: LocationSearch + 'static> AutocompleteController<S> {
    pub fn new(search: Arc<S>, quiet_window: Duration) -> Self {
        Self {
            search,
            quiet_window,
            sequence: Arc::new(RequestSequence::new()),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn quiet_window(&self) -> Duration {
        self.quiet_window
    }

    /// Handle a change of the search text
    ///
    /// Blank text clears the results and returns to idle at once, without
    /// a lookup. Anything else (re)starts the quiet window.
    pub fn on_input(&self, text: &str) {
        let mut inner = lock(&self.inner);
        inner.edits += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }

        let query = text.trim();
        if query.is_empty() {
            // Outstanding lookups become stale
            self.sequence.next();
            inner.in_flight = None;
            inner.results.clear();
            return;
        }

        let edit = inner.edits;
        let query = query.to_string();
        let search = Arc::clone(&self.search);
        let sequence = Arc::clone(&self.sequence);
        let shared = Arc::clone(&self.inner);
        let quiet_window = self.quiet_window;

        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_window).await;

            let seq = {
                let mut inner = lock(&shared);
                if inner.edits != edit {
                    return;
                }
                inner.timer = None;
                let seq = sequence.next();
                inner.in_flight = Some(seq);
                seq
            };

            debug!("Location lookup #{} for {:?}", seq, query);
            let outcome = search.search_locations(&query).await;

            let mut inner = lock(&shared);
            if !sequence.is_latest(seq) {
                debug!("Discarding stale lookup #{} for {:?}", seq, query);
                return;
            }

            inner.in_flight = None;
            match outcome {
                Ok(results) => inner.results = results,
                Err(e) => {
                    warn!("Location lookup for {:?} failed: {}", query, e);
                    inner.results.clear();
                }
            }
        }));
    }

    pub fn state(&self) -> AutocompleteState {
        let inner = lock(&self.inner);
        if inner.timer.is_some() {
            AutocompleteState::PendingDebounce
        } else if inner.in_flight.is_some() {
            AutocompleteState::InFlight
        } else {
            AutocompleteState::Idle
        }
    }

    /// Visible results from the latest answered lookup
    pub fn results(&self) -> Vec<Location> {
        lock(&self.inner).results.clone()
    }
}

impl<S> Drop for AutocompleteController<S> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.inner).timer.take() {
            timer.abort();
        }
    }
}
