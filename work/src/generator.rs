//! PoW generation: sequential, or split across a rayon thread pool.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::validator::work_hash_with;
use crate::{WorkError, WorkNonce, WorkTarget};

/// Finds the smallest nonce whose work hash meets a [`WorkTarget`].
///
/// Both modes return the same nonce for the same input; the parallel mode
/// only changes how fast it is found.
#[derive(Clone)]
pub struct WorkGenerator {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl WorkGenerator {
    /// Brute-force on the calling thread, counting up from zero.
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Split the nonce space across `threads` workers.
    ///
    /// `threads <= 1` falls back to [`WorkGenerator::sequential`].
    pub fn parallel(threads: usize) -> Result<Self, WorkError> {
        if threads <= 1 {
            return Ok(Self::sequential());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ballot-work-{i}"))
            .build()
            .map_err(|e| WorkError::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of worker threads used per search.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    /// Generate the smallest nonce for which
    /// `target.is_met_by(work_hash(preimage, nonce))` holds.
    ///
    /// No attempt limit: with the default target the expected cost is
    /// 65 536 hashes and the search returns in milliseconds.
    pub fn generate(&self, preimage: &str, target: &WorkTarget) -> Result<WorkNonce, WorkError> {
        match &self.pool {
            None => search_sequential(preimage, target),
            Some(pool) => pool.install(|| search_parallel(preimage, target)),
        }
    }
}

impl Default for WorkGenerator {
    fn default() -> Self {
        Self::sequential()
    }
}

impl std::fmt::Debug for WorkGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkGenerator")
            .field("threads", &self.threads())
            .finish()
    }
}

fn search_sequential(preimage: &str, target: &WorkTarget) -> Result<WorkNonce, WorkError> {
    let mut buf = String::with_capacity(20);
    let mut nonce = 0u64;
    loop {
        if target.is_met_by(&work_hash_with(preimage, nonce, &mut buf)) {
            return Ok(WorkNonce(nonce));
        }
        nonce = nonce.checked_add(1).ok_or(WorkError::Exhausted)?;
    }
}

/// Each worker scans `tid, tid + n, tid + 2n, ...` in increasing order and
/// publishes hits with `fetch_min`. A worker stops once its next nonce is
/// not below the best hit so far. Every nonce below the final best has
/// therefore been checked, so the result is the global minimum.
fn search_parallel(preimage: &str, target: &WorkTarget) -> Result<WorkNonce, WorkError> {
    let best = AtomicU64::new(u64::MAX);
    let workers = rayon::current_num_threads().max(1);
    let stride = workers as u64;

    (0..workers).into_par_iter().for_each(|worker| {
        let mut buf = String::with_capacity(20);
        let mut nonce = worker as u64;
        loop {
            if nonce >= best.load(Ordering::Relaxed) {
                return;
            }
            if target.is_met_by(&work_hash_with(preimage, nonce, &mut buf)) {
                best.fetch_min(nonce, Ordering::Relaxed);
                return;
            }
            nonce = match nonce.checked_add(stride) {
                Some(next) => next,
                None => return,
            };
        }
    });

    match best.load(Ordering::Relaxed) {
        u64::MAX => Err(WorkError::Exhausted),
        nonce => Ok(WorkNonce(nonce)),
    }
}
