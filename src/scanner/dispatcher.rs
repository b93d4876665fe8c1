//! Bounded-concurrency fan-out of probe calls.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{Probe, ProbeOutcome};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Runs a probe over a unit space with at most `pool_size` probes in flight.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    pool_size: usize,
}

impl Dispatcher {
    /// Create a dispatcher. A pool size of zero is treated as one.
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size: pool_size.max(1),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Probe every unit exactly once.
    ///
    /// `on_outcome` is called once per unit from whichever task finished it,
    /// in completion order. Returns the number of units processed, only
    /// after every one of them has completed: this is the barrier.
    ///
    /// A probe that panics is reported as [`ProbeOutcome::Error`] for its
    /// unit and does not disturb the others.
    pub async fn run<P, I, F>(&self, units: I, probe: Arc<P>, on_outcome: F) -> ScanResult<usize>
    where
        P: Probe + 'static,
        I: IntoIterator<Item = P::Unit>,
        F: Fn(P::Unit, ProbeOutcome<P::Finding>) + Send + Sync + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let on_outcome = Arc::new(on_outcome);
        let mut tasks = JoinSet::new();
        let mut dispatched = 0usize;

        info!(probe = probe.name(), pool_size = self.pool_size, "dispatch started");

        for unit in units {
            // Admission control: wait for a free slot before spawning.
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|_| ScanError::PoolClosed)?;

            let probe = Arc::clone(&probe);
            let on_outcome = Arc::clone(&on_outcome);

            tasks.spawn(async move {
                let outcome = match AssertUnwindSafe(probe.probe(unit)).catch_unwind().await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(%unit, "probe panicked");
                        ProbeOutcome::error("probe panicked")
                    }
                };
                debug!(%unit, outcome = outcome.kind(), "unit probed");
                on_outcome(unit, outcome);
                drop(permit);
            });
            dispatched += 1;

            // Reap finished tasks so the set does not grow with the range.
            while let Some(joined) = tasks.try_join_next() {
                log_join_failure(joined);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            log_join_failure(joined);
        }

        info!(probe = probe.name(), units = dispatched, "dispatch finished");
        Ok(dispatched)
    }
}

fn log_join_failure(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        warn!(error = %e, "probe task failed");
    }
}
