/// Photo list state machine
///
/// Owns the [`FetchState`] shown by the home screen. The controller never
/// runs futures itself: every fetch is handed back to the caller, which
/// drives it on the UI runtime and feeds the [`FetchOutcome`] back through
/// [`PhotosController::complete`].
///
/// Transitions:
/// - construction: Loading, first fetch dispatched
/// - fetch succeeded: Success(photos)
/// - fetch failed: Error
/// - retry: Loading, previous fetch aborted, new fetch dispatched

use std::future::Future;
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable, Aborted};
use futures::FutureExt;
use tracing::{debug, info, warn};

use super::data::{FetchState, Photo};
use super::repository::PhotoRepository;
use crate::api::ApiError;

/// Result of one dispatched fetch
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The repository returned
    Finished {
        generation: u64,
        result: Result<Vec<Photo>, ApiError>,
    },
    /// The fetch was aborted by a retry or by teardown
    Cancelled { generation: u64 },
}

/// Drives the Loading/Success/Error cycle for the photo list
pub struct PhotosController<R> {
    repository: Arc<R>,
    state: FetchState,
    /// Incremented on every dispatch; outcomes from older fetches are ignored
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl<R: PhotoRepository> PhotosController<R> {
    /// Create the controller in the Loading state together with its first fetch
    pub fn new(repository: R) -> (Self, impl Future<Output = FetchOutcome> + Send + 'static) {
        let mut controller = Self {
            repository: Arc::new(repository),
            state: FetchState::Loading,
            generation: 0,
            in_flight: None,
        };
        let fetch = controller.dispatch();
        (controller, fetch)
    }

    /// Current state, read-only
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Whether a dispatched fetch has not reported back yet
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Restart the fetch
    ///
    /// Latest wins: a fetch that is still in flight is aborted and its
    /// outcome will be discarded.
    pub fn retry(&mut self) -> impl Future<Output = FetchOutcome> + Send + 'static {
        info!(previous = self.state_name(), "🔄 Retrying photo fetch");
        self.dispatch()
    }

    /// Apply a fetch outcome
    ///
    /// Returns true if the state changed.
    pub fn complete(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Cancelled { generation } => {
                debug!(generation, "fetch cancelled");
                false
            }
            FetchOutcome::Finished { generation, .. } if generation != self.generation => {
                debug!(generation, current = self.generation, "ignoring stale fetch outcome");
                false
            }
            FetchOutcome::Finished { result, .. } => {
                self.in_flight = None;
                self.state = match result {
                    Ok(photos) => FetchState::Success(photos),
                    Err(err) => {
                        warn!(error = %err, "⚠️  Failed to fetch photos");
                        FetchState::Error
                    }
                };
                true
            }
        }
    }

    fn dispatch(&mut self) -> impl Future<Output = FetchOutcome> + Send + 'static {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.generation += 1;
        self.state = FetchState::Loading;

        let generation = self.generation;
        let repository = Arc::clone(&self.repository);
        let (handle, registration) = AbortHandle::new_pair();
        self.in_flight = Some(handle);

        let fetch = async move { repository.get_photos().await };

        Abortable::new(fetch, registration).map(move |result| match result {
            Ok(result) => FetchOutcome::Finished { generation, result },
            Err(Aborted) => FetchOutcome::Cancelled { generation },
        })
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error => "error",
        }
    }
}

impl<R> Drop for PhotosController<R> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
