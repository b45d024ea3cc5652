//! Fixed-size worker pool for term evaluation
//!
//! Built once and reused for every parallel computation of the engine that
//! owns it. Dropping the pool joins its threads.

use rayon::prelude::*;
use rayon::ThreadPool;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;

/// Pool of worker threads, one task per item
#[derive(Debug, Clone)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
}

impl WorkerPool {
    /// Build a pool with `num_threads` workers
    ///
    /// # Errors
    ///
    /// Returns an error if the threads cannot be spawned.
    pub fn new(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(|i| format!("qsplit-worker-{i}"))
            .build()?;
        debug!(workers = pool.current_num_threads(), "worker pool started");
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Number of worker threads
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Whether both handles share the same underlying threads
    pub fn same_pool(&self, other: &WorkerPool) -> bool {
        Arc::ptr_eq(&self.pool, &other.pool)
    }

    /// Run `task` on every item and collect the results in input order
    ///
    /// Items are handed out one at a time. The first error aborts the
    /// remaining work and is returned.
    pub fn try_map<T, R, F>(&self, items: &[T], task: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync + Send,
    {
        self.pool
            .install(|| items.par_iter().with_max_len(1).map(task).collect())
    }
}
