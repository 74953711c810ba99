//! Detached worker threads with in-flight accounting.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Name given to every worker thread.
pub const WORKER_THREAD_NAME: &str = "Server Thread";

/// How many handlers may run at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkerPolicy {
    /// One new thread per line, no cap.
    #[default]
    Unbounded,
    /// At most `n` in flight; extra lines are rejected.
    Bounded(usize),
}

impl WorkerPolicy {
    /// `Bounded` for `Some(n)`, `Unbounded` for `None`.
    pub fn from_limit(limit: Option<usize>) -> Self {
        limit.map_or(WorkerPolicy::Unbounded, WorkerPolicy::Bounded)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("All {limit} workers are busy")]
    Saturated { limit: usize },

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Spawns one named thread per job and tracks how many are running.
#[derive(Debug, Default)]
pub struct WorkerPool {
    policy: WorkerPolicy,
    in_flight: Mutex<usize>,
    idle: Condvar,
}

impl WorkerPool {
    pub fn new(policy: WorkerPolicy) -> Arc<Self> {
        Arc::new(Self {
            policy,
            in_flight: Mutex::new(0),
            idle: Condvar::new(),
        })
    }

    pub fn policy(&self) -> WorkerPolicy {
        self.policy
    }

    pub fn in_flight(&self) -> usize {
        *self.in_flight.lock()
    }

    /// Run `job` on a fresh worker thread.
    pub fn spawn<F>(self: &Arc<Self>, job: F) -> Result<(), SubmitError>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut in_flight = self.in_flight.lock();
            if let WorkerPolicy::Bounded(limit) = self.policy
                && *in_flight >= limit
            {
                return Err(SubmitError::Saturated { limit });
            }
            *in_flight += 1;
        }

        let pool = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let _slot = Slot(pool);
                job();
            });

        if let Err(err) = spawned {
            self.release();
            return Err(err.into());
        }
        tracing::trace!(in_flight = self.in_flight(), "Worker started");
        Ok(())
    }

    /// Block until no job is running or `timeout` passes.
    ///
    /// Returns whether the pool is idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut in_flight = self.in_flight.lock();
        while *in_flight > 0 {
            if self.idle.wait_until(&mut in_flight, deadline).timed_out() {
                return *in_flight == 0;
            }
        }
        true
    }

    fn release(&self) {
        let mut in_flight = self.in_flight.lock();
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.idle.notify_all();
        }
    }
}

/// Frees a pool slot when the job ends, even by unwinding.
struct Slot(Arc<WorkerPool>);

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.release();
    }
}
