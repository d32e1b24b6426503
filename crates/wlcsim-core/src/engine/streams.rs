//! Deterministic assignment of random streams to units of work.
//!
//! A sweep draws all of its randomness from a single run seed. Chunk `w` of cell `k` owns the
//! ChaCha stream `k * workers + w` of that seed, so a run is reproduced exactly by the same seed
//! and worker count regardless of thread scheduling.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::Range;
use tracing::info;

/// Returns the configured seed, or draws one from OS entropy and logs it so the run can be
/// repeated.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!(seed, "No seed configured; drew one from OS entropy.");
            seed
        }
    }
}

/// Number of independent streams per cell.
pub fn resolve_workers(workers: Option<usize>) -> usize {
    workers.unwrap_or_else(default_workers).max(1)
}

#[cfg(feature = "parallel")]
fn default_workers() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
fn default_workers() -> usize {
    1
}

pub fn worker_stream(seed: u64, cell: usize, workers: usize, worker: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream((cell * workers + worker) as u64);
    rng
}

/// Splits `0..n` into at most `workers` contiguous, non-empty chunks whose sizes differ by at
/// most one. Each chunk is paired with its worker index.
pub fn partition(n: usize, workers: usize) -> Vec<(usize, Range<usize>)> {
    let workers = workers.max(1).min(n.max(1));
    let base = n / workers;
    let extra = n % workers;
    let mut start = 0;
    (0..workers)
        .map(|w| {
            let len = base + usize::from(w < extra);
            let range = start..start + len;
            start += len;
            (w, range)
        })
        .filter(|(_, range)| !range.is_empty())
        .collect()
}
