//! Parallel principal-congruence sweeps.

use ua_clo::congruence_closure;
use ua_core::{Algebra, UaError};
use ua_part::Partition;

/// Closes the principal congruence of every pair `a < b`, fanned across a
/// pool of worker threads.
///
/// Each closure reads only the immutable algebra, so workers share no
/// mutable state and need no locking. Chunks are merged back in pair order,
/// making the result identical to the serial sweep regardless of the worker
/// count.
pub fn principal_sweep(alg: &dyn Algebra, workers: usize) -> Result<Vec<Partition>, UaError> {
    let n = alg.universe_size();
    let mut pairs = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            pairs.push((a, b));
        }
    }
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let workers = workers.max(1).min(pairs.len());
    if workers == 1 {
        return pairs
            .iter()
            .map(|&(a, b)| congruence_closure(alg, &[(a, b)]))
            .collect();
    }

    let chunk_len = pairs.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || -> Result<Vec<Partition>, UaError> {
                    chunk
                        .iter()
                        .map(|&(a, b)| congruence_closure(alg, &[(a, b)]))
                        .collect()
                })
            })
            .collect();
        let mut merged = Vec::with_capacity(pairs.len());
        for handle in handles {
            match handle.join() {
                Ok(result) => merged.extend(result?),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        Ok(merged)
    })
}
