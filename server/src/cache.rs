//! Per-key single-flight coalescing
//!
//! At most one computation runs per key. Callers arriving while it runs
//! join it and receive a clone of its output. The computation runs on its
//! own task so a caller that goes away does not take it down; only when
//! every waiter has gone is it aborted and the slot released. A finished
//! computation releases its slot before publishing, so results are never
//! retained here.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

/// Every waiter left before the computation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abandoned;

struct Flight<T> {
    id: u64,
    rx: watch::Receiver<Option<T>>,
    waiters: Arc<AtomicUsize>,
    abort: AbortHandle,
}

type Slots<T> = Arc<DashMap<String, Flight<T>>>;

pub struct SingleFlight<T> {
    slots: Slots<T>,
    next_id: AtomicU64,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

/// Releases a waiter; the last one out aborts an unfinished flight
struct WaiterGuard<T> {
    slots: Slots<T>,
    key: String,
    id: u64,
    waiters: Arc<AtomicUsize>,
}

impl<T> Drop for WaiterGuard<T> {
    fn drop(&mut self) {
        if self.waiters.fetch_sub(1, Ordering::SeqCst) != 1 {
            return;
        }
        // Re-checked under the shard lock: a joiner may have arrived
        let removed = self.slots.remove_if(&self.key, |_, flight| {
            flight.id == self.id && flight.waiters.load(Ordering::SeqCst) == 0
        });
        if let Some((key, flight)) = removed {
            debug!(key = %key, "Abandoning computation with no waiters");
            flight.abort.abort();
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of computations currently running
    pub fn in_flight(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    fn waiting(&self, key: &str) -> usize {
        self.slots
            .get(key)
            .map_or(0, |flight| flight.waiters.load(Ordering::SeqCst))
    }

    /// Run `make()` for `key`, or join the run already in progress
    ///
    /// The flag is true when this call joined another caller's run.
    pub async fn run<F, Fut>(&self, key: &str, make: F) -> Result<(T, bool), Abandoned>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (mut rx, joined, guard) = match self.slots.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                let flight = entry.get();
                flight.waiters.fetch_add(1, Ordering::SeqCst);
                debug!(key, "Joining in-flight computation");
                let guard = WaiterGuard {
                    slots: Arc::clone(&self.slots),
                    key: key.to_string(),
                    id: flight.id,
                    waiters: Arc::clone(&flight.waiters),
                };
                (flight.rx.clone(), true, guard)
            }
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let (tx, rx) = watch::channel(None);
                let waiters = Arc::new(AtomicUsize::new(1));

                let fut = make();
                let slots = Arc::clone(&self.slots);
                let owned_key = key.to_string();
                let handle = tokio::spawn(async move {
                    let value = fut.await;
                    slots.remove_if(&owned_key, |_, flight| flight.id == id);
                    let _ = tx.send(Some(value));
                });

                entry.insert(Flight {
                    id,
                    rx: rx.clone(),
                    waiters: Arc::clone(&waiters),
                    abort: handle.abort_handle(),
                });
                let guard = WaiterGuard {
                    slots: Arc::clone(&self.slots),
                    key: key.to_string(),
                    id,
                    waiters,
                };
                (rx, false, guard)
            }
        };

        let outcome = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| value.clone());
        drop(guard);
        outcome.map(|value| (value, joined)).ok_or(Abandoned)
    }
}
