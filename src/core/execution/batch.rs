use super::config::{ConcurrencyMode, EvaluationConfig};
use crate::core::snapshot::{AeroForces, Snapshot, SnapshotError, SnapshotPool};
use crate::core::vehicle::FlightConditions;
use log::debug;
use rayon::prelude::*;

/// Evaluate every flight condition on its own clone of `base`.
///
/// Results come back in the order of `conditions`. Every clone is released to
/// `pool`, whether its evaluation succeeded or not.
pub fn evaluate_batch(
    pool: &SnapshotPool,
    base: &Snapshot,
    conditions: &[FlightConditions],
    config: &EvaluationConfig,
) -> Result<Vec<AeroForces>, SnapshotError> {
    debug!(
        "Evaluating {} conditions ({:?})",
        conditions.len(),
        config.concurrency_mode
    );
    match config.concurrency_mode {
        ConcurrencyMode::Sequential => conditions
            .iter()
            .map(|c| evaluate_one(pool, base, c))
            .collect(),
        ConcurrencyMode::Rayon => {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(size) = config.thread_pool_size {
                builder = builder.num_threads(size);
            }
            let threads = builder
                .build()
                .map_err(|e| SnapshotError::ThreadPool(e.to_string()))?;
            threads.install(|| {
                conditions
                    .par_iter()
                    .map(|c| evaluate_one(pool, base, c))
                    .collect()
            })
        }
    }
}

fn evaluate_one(
    pool: &SnapshotPool,
    base: &Snapshot,
    conditions: &FlightConditions,
) -> Result<AeroForces, SnapshotError> {
    let mut snapshot = pool.borrow_clone(base)?;
    let result = snapshot.evaluate(conditions);
    pool.release(snapshot);
    result
}
