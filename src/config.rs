//! Runtime tunables.
//!
//! Values come from environment variables read once per process, and can be
//! overridden programmatically. Passing `0` to a setter reverts to the
//! environment or built-in default.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Buffers handed to each worker by the parallel batch when nothing else is
/// configured.
pub const DEFAULT_PAR_BATCH_CHUNK: usize = 4;

/// Environment variable read by [`parallel_batch_chunk`].
pub const PAR_BATCH_CHUNK_ENV: &str = "KDCT_PAR_BATCH_CHUNK";

static PAR_BATCH_CHUNK_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static PAR_BATCH_CHUNK_ENV_VALUE: OnceLock<usize> = OnceLock::new();

fn env_batch_chunk() -> usize {
    *PAR_BATCH_CHUNK_ENV_VALUE.get_or_init(|| {
        std::env::var(PAR_BATCH_CHUNK_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v != 0)
            .unwrap_or(DEFAULT_PAR_BATCH_CHUNK)
    })
}

/// Number of buffers each parallel worker transforms with one context.
/// Always at least 1.
pub fn parallel_batch_chunk() -> usize {
    match PAR_BATCH_CHUNK_OVERRIDE.load(Ordering::Relaxed) {
        0 => env_batch_chunk(),
        n => n,
    }
}

/// Override the parallel batch chunk size. `0` reverts to
/// `KDCT_PAR_BATCH_CHUNK` or [`DEFAULT_PAR_BATCH_CHUNK`].
pub fn set_parallel_batch_chunk(chunk: usize) {
    PAR_BATCH_CHUNK_OVERRIDE.store(chunk, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_and_zero_reverts() {
        let base = parallel_batch_chunk();
        assert!(base >= 1);
        set_parallel_batch_chunk(9);
        assert_eq!(parallel_batch_chunk(), 9);
        set_parallel_batch_chunk(0);
        assert_eq!(parallel_batch_chunk(), base);
    }
}
