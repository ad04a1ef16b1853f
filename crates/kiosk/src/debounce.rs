//! Cancellable debounce timers.
//!
//! A [`Debouncer`] holds at most one pending action. Scheduling a new action
//! aborts the previous one, so only the last action in a burst runs, one
//! `delay` after it was scheduled. [`DebouncedValue`] publishes a value
//! through a `watch` channel on the same terms.
//!
//! Both types spawn Tokio tasks and must be used inside a runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Handle to a single clear-and-reschedule timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `action` after the quiet period, replacing any pending action.
    pub fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action();
        });

        if let Some(previous) = self.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.lock().take() {
            pending.abort();
        }
    }

    /// Whether an action is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(|h| !h.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ---------------------------------------------------------------------------
// DebouncedValue
// ---------------------------------------------------------------------------

/// A value whose updates become visible only after a quiet period.
#[derive(Debug)]
pub struct DebouncedValue<T> {
    tx: Arc<watch::Sender<T>>,
    debouncer: Debouncer,
}

impl<T> DebouncedValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Publish `value` once no newer value arrives within the delay.
    pub fn set(&self, value: T) {
        let tx = Arc::clone(&self.tx);
        self.debouncer.schedule(move || {
            tx.send_replace(value);
        });
    }

    /// Publish `value` immediately, discarding any pending update.
    pub fn set_now(&self, value: T) {
        self.debouncer.cancel();
        self.tx.send_replace(value);
    }

    /// The last published value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::sleep;

    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn only_last_value_in_a_burst_is_published() {
        let value = DebouncedValue::new("first".to_string(), DELAY);

        value.set("second".to_string());
        sleep(Duration::from_millis(250)).await;
        value.set("third".to_string());

        // t = 749ms: the rescheduled timer has not fired.
        sleep(Duration::from_millis(499)).await;
        assert_eq!(value.get(), "first");

        // t = 751ms
        sleep(Duration::from_millis(2)).await;
        assert_eq!(value.get(), "third");
    }

    #[tokio::test(start_paused = true)]
    async fn intermediate_value_is_never_observed() {
        let value = DebouncedValue::new("first".to_string(), DELAY);
        let mut rx = value.subscribe();

        value.set("second".to_string());
        sleep(Duration::from_millis(250)).await;
        value.set("third".to_string());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "third");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn set_now_cancels_pending_update() {
        let value = DebouncedValue::new(0, DELAY);

        value.set(1);
        assert!(value.is_pending());
        value.set_now(2);
        assert!(!value.is_pending());

        sleep(DELAY * 2).await;
        assert_eq!(value.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_the_action() {
        let calls = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(DELAY);

        let counter = Arc::clone(&calls);
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        sleep(DELAY * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_fire_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let debouncer = Debouncer::new(DELAY);

        for _ in 0..2 {
            for _ in 0..3 {
                let counter = Arc::clone(&calls);
                debouncer.schedule(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });
                sleep(Duration::from_millis(100)).await;
            }
            sleep(DELAY).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!debouncer.is_pending());
    }
}
