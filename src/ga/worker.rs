//! Background execution for interactive callers.
//!
//! [`spawn_solver`] moves an engine onto its own thread. Progress flows back
//! one way over a channel; cancellation is a shared flag checked only at
//! generation boundaries, so a population is never left half-built.
//! Dropping the [`SolverHandle`] cancels the run.

use super::runner::{GenerationStats, GeneticEngine, Solution};
use crate::error::{TspError, TspResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::warn;

/// Handle to a solver running on a background thread.
///
/// The progress channel is unbounded: one [`GenerationStats`] is queued per
/// generation until it is received. Long runs should drain it with
/// [`poll_progress`](SolverHandle::poll_progress) or iterate
/// [`progress`](SolverHandle::progress).
///
/// Dropping the handle requests cancellation, so an abandoned run stops at
/// its next generation boundary and its result is discarded.
///
/// # Usage
///
/// ```
/// use u_tspga::distance::DistanceMatrix;
/// use u_tspga::ga::{spawn_solver, GaConfig, GeneticEngine};
/// use u_tspga::random::create_rng;
///
/// let matrix = DistanceMatrix::generate_from_coordinates(10, 100, &mut create_rng(1)).unwrap();
/// let engine = GeneticEngine::new(matrix, GaConfig::new(30, 0.1, 20).with_seed(2)).unwrap();
///
/// let handle = spawn_solver(engine);
/// let progress: Vec<_> = handle.progress().iter().collect();
/// let solution = handle.join().unwrap();
///
/// assert_eq!(progress.len(), 20);
/// assert_eq!(progress.last().unwrap().best_distance, solution.distance);
/// ```
#[derive(Debug)]
pub struct SolverHandle {
    progress: Receiver<GenerationStats>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<TspResult<Solution>>>,
}

/// Runs `engine.solve()` on a dedicated thread.
pub fn spawn_solver(mut engine: GeneticEngine) -> SolverHandle {
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    let thread = thread::spawn(move || {
        engine.solve_with_observer(Some(flag), |stats| {
            // receiver dropped: caller stopped listening, keep solving
            let _ = tx.send(*stats);
        })
    });

    SolverHandle {
        progress: rx,
        cancel,
        thread: Some(thread),
    }
}

impl SolverHandle {
    /// Receiver of per-generation progress.
    ///
    /// The channel closes when the run ends, so iterating it blocks until
    /// completion.
    pub fn progress(&self) -> &Receiver<GenerationStats> {
        &self.progress
    }

    /// Drains the progress received so far without blocking.
    pub fn poll_progress(&self) -> Vec<GenerationStats> {
        self.progress.try_iter().collect()
    }

    /// Requests cancellation at the next generation boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the run to end and returns its result.
    ///
    /// # Errors
    /// [`TspError::WorkerPanicked`] if the solver thread panicked.
    pub fn join(mut self) -> TspResult<Solution> {
        let thread = self.thread.take().ok_or(TspError::WorkerPanicked)?;
        thread.join().map_err(|_| {
            warn!("solver thread panicked");
            TspError::WorkerPanicked
        })?
    }
}

impl Drop for SolverHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.cancel();
        }
    }
}
