//! Bounded worker pool with a batch deadline.
//!
//! Tasks run on a dedicated rayon pool and report back over a crossbeam
//! channel tagged with their input index, so results land in input order
//! whatever order they finish in. When the deadline passes, tasks that have
//! not started are skipped, and every unfinished slot is reported as timed
//! out; finished results are kept.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, RecvTimeoutError};
use tracing::warn;

use crate::error::EngineError;

/// Why a slot has no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    /// The deadline passed first.
    TimedOut,
    /// The task panicked.
    Panicked(String),
}

/// Results of one batch, in input order.
#[derive(Debug)]
pub struct BatchOutcome<R> {
    /// One slot per input.
    pub slots: Vec<Result<R, TaskFailure>>,
    /// True when the deadline cut the batch short.
    pub timed_out: bool,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Fixed-size pool for CPU-bound batches.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
    timeout: Duration,
}

impl WorkerPool {
    /// Creates a pool of `workers` threads (at least one) and a per-batch
    /// deadline.
    #[must_use]
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
        }
    }

    /// Thread count.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `task` over every item and waits for all of them or the
    /// deadline, whichever comes first.
    pub fn run<T, R, F>(&self, items: Vec<T>, task: F) -> Result<BatchOutcome<R>, EngineError>
    where
        T: Send + Sync + 'static,
        R: Send + 'static,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        let start = Instant::now();
        let deadline = start + self.timeout;
        let total = items.len();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("yieldline-worker-{i}"))
            .build()
            .map_err(|e| EngineError::Pool(e.to_string()))?;

        let (tx, rx) = channel::unbounded();
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = Arc::new(task);

        for (index, item) in items.into_iter().enumerate() {
            let tx = tx.clone();
            let cancelled = Arc::clone(&cancelled);
            let task = Arc::clone(&task);
            pool.spawn(move || {
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let result = catch_unwind(AssertUnwindSafe(|| task.as_ref()(&item)))
                    .map_err(|payload| TaskFailure::Panicked(panic_message(payload.as_ref())));
                // The receiver is gone once the batch has timed out.
                let _ = tx.send((index, result));
            });
        }
        drop(tx);

        let mut slots: Vec<Option<Result<R, TaskFailure>>> = (0..total).map(|_| None).collect();
        let mut received = 0;
        let mut timed_out = false;
        while received < total {
            match rx.recv_deadline(deadline) {
                Ok((index, result)) => {
                    slots[index] = Some(result);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    cancelled.store(true, Ordering::Relaxed);
                    timed_out = true;
                    warn!(
                        completed = received,
                        total,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "batch deadline passed"
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let slots = slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(TaskFailure::TimedOut)))
            .collect();
        Ok(BatchOutcome {
            slots,
            timed_out,
            elapsed: start.elapsed(),
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
