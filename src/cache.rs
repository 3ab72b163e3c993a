//! Process-wide content cache with compute-once semantics.
//!
//! Detail-page content is memoized per absolute URL for the lifetime of the
//! process: the first request computes the value; every later request,
//! whether from the same feed request or a concurrent one, shares the
//! result. A `None`
//! value (non-article target, missing container) is a value like any other
//! and is memoized the same way.
//!
//! Each key gets its own `OnceCell`, so at most one computation per key is
//! ever in flight; concurrent callers for the same key await the winner
//! instead of issuing duplicate fetches. A failed computation leaves the
//! slot empty, so a later request may retry.
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

#[derive(Default)]
pub struct ContentCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<Option<String>>>>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached value for `key`, or run `compute` to produce it.
    ///
    /// Concurrent calls with the same key race to initialize a shared cell;
    /// losers await the in-flight computation. On `Err` nothing is stored
    /// and the error is returned to this caller only.
    pub async fn get_or_try_compute<F, Fut, E>(
        &self,
        key: &str,
        compute: F,
    ) -> Result<Option<String>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<String>, E>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(key.to_string()).or_default())
        };

        Ok(cell.get_or_try_init(compute).await?.clone())
    }

    /// Number of keys with a settled value.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
