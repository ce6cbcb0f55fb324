//! Race between an in-flight call and an optional deadline.
//!
//! Both sides run as their own task and compete for a single [`Settlement`]. The first
//! to settle delivers; every later completion is dropped. The losing call is never
//! aborted, only ignored: a late response still runs to completion in the background.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a race ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Race<T> {
    /// The call finished before the deadline.
    Completed(T),
    /// The deadline elapsed first.
    TimedOut(Duration),
    /// The call ended without a value: it panicked, or the runtime dropped it.
    Abandoned,
}

type Deliver<T> = Box<dyn FnOnce(T) + Send>;

/// Single-assignment slot shared by the competing completions.
///
/// [`settle`](Self::settle) flips an atomic flag; only the caller that flips it gets to
/// run the delivery callback.
pub struct Settlement<T> {
    settled: AtomicBool,
    deliver: Mutex<Option<Deliver<T>>>,
}

impl<T> Settlement<T> {
    /// Create an unsettled slot that hands the winning value to `deliver`.
    pub fn new(deliver: impl FnOnce(T) + Send + 'static) -> Self {
        Self {
            settled: AtomicBool::new(false),
            deliver: Mutex::new(Some(Box::new(deliver))),
        }
    }

    /// Try to settle with `value`.
    ///
    /// Returns `true` if this call won and the value was delivered, `false` if the slot
    /// was already settled (the value is dropped).
    pub fn settle(&self, value: T) -> bool {
        if self.settled.swap(true, Ordering::AcqRel) {
            return false;
        }

        let deliver = self
            .deliver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(deliver) = deliver {
            deliver(value);
        }
        true
    }

    /// Returns `true` once a value has been delivered.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }
}

impl<T> std::fmt::Debug for Settlement<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settlement")
            .field("settled", &self.is_settled())
            .finish_non_exhaustive()
    }
}

/// Held by the work task; settles with [`Race::Abandoned`] if the task ends without a value.
struct WorkGuard<T> {
    settlement: Arc<Settlement<Race<T>>>,
    timer: Option<JoinHandle<()>>,
}

impl<T> WorkGuard<T> {
    fn complete(mut self, value: T) {
        if self.settlement.settle(Race::Completed(value)) {
            self.cancel_timer();
        } else {
            warn!("discarding completion that arrived after the deadline");
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for WorkGuard<T> {
    fn drop(&mut self) {
        if self.settlement.settle(Race::Abandoned) {
            warn!("call ended without a result");
            self.cancel_timer();
        }
    }
}

/// Spawn `work` and, when `ttl` is set, a deadline timer; the first to finish is handed
/// to `deliver`, exactly once.
///
/// When `work` wins, the pending timer is cancelled. When the timer wins, `work` keeps
/// running and its result is discarded. If `work` panics before either side settled,
/// [`Race::Abandoned`] is delivered right away.
pub fn spawn_race<T, F, D>(work: F, ttl: Option<Duration>, deliver: D)
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
    D: FnOnce(Race<T>) + Send + 'static,
{
    let settlement = Arc::new(Settlement::new(deliver));

    let timer = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| {
        let settlement = Arc::clone(&settlement);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if settlement.settle(Race::TimedOut(ttl)) {
                let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
                debug!(ttl_ms, "deadline elapsed before completion");
            }
        })
    });

    let guard = WorkGuard { settlement, timer };
    tokio::spawn(async move {
        let value = work.await;
        guard.complete(value);
    });
}

/// Await `work`, bounded by `ttl`.
///
/// Without a ttl (or with a zero one) no timer is started and `work` is simply awaited
/// in place.
pub async fn race<T, F>(work: F, ttl: Option<Duration>) -> Race<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    let Some(ttl) = ttl.filter(|ttl| !ttl.is_zero()) else {
        return Race::Completed(work.await);
    };

    let (tx, rx) = oneshot::channel();
    spawn_race(work, Some(ttl), move |race| {
        // The receiver is gone when the caller stopped waiting.
        let _ = tx.send(race);
    });

    rx.await.unwrap_or(Race::Abandoned)
}
