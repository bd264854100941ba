use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// A callback scheduled to run once after a delay on the tokio runtime.
/// Cancelling, or dropping the handle, prevents it from running if it has
/// not started yet.
pub struct ScheduledCallback {
    handle: JoinHandle<()>,
}

impl ScheduledCallback {
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledCallback {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// The latest pushed value and the push that produced it.
struct Pending<T> {
    value: Option<T>,
    generation: u64,
}

/// Delays delivery of a rapidly changing value until it has been stable for
/// the quiet interval. Each push restarts the interval; only the latest
/// value is delivered.
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Arc<Mutex<Pending<T>>>,
    timer: Option<ScheduledCallback>,
    sink: Sink<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            quiet,
            pending: Arc::new(Mutex::new(Pending {
                value: None,
                generation: 0,
            })),
            timer: None,
            sink: Arc::new(sink),
        }
    }

    pub fn quiet_interval(&self) -> Duration {
        self.quiet
    }

    /// Records `value` and restarts the quiet interval.
    pub fn push(&mut self, value: T) {
        let generation = {
            let mut pending = lock(&self.pending);
            pending.value = Some(value);
            pending.generation += 1;
            pending.generation
        };
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }

        let pending = self.pending.clone();
        let sink = self.sink.clone();
        self.timer = Some(ScheduledCallback::schedule(self.quiet, move || {
            deliver_if_current(&pending, generation, &sink);
        }));
    }

    /// Delivers the pending value now, if any, and stops the timer.
    pub fn flush(&mut self) -> bool {
        self.cancel();
        let value = lock(&self.pending).value.take();
        match value {
            Some(value) => {
                (self.sink)(value);
                true
            }
            None => false,
        }
    }

    /// Stops the timer without delivering. The pending value is kept for a
    /// later `flush`.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn has_pending(&self) -> bool {
        lock(&self.pending).value.is_some()
    }
}

/// Timer body. A timer that fires after a newer push (abort raced with an
/// already running task) leaves the newer value for its own timer.
fn deliver_if_current<T>(pending: &Mutex<Pending<T>>, generation: u64, sink: &Sink<T>) -> bool {
    let value = {
        let mut pending = lock(pending);
        if pending.generation != generation {
            return false;
        }
        pending.value.take()
    };
    match value {
        Some(value) => {
            sink(value);
            true
        }
        None => false,
    }
}

fn lock<T>(slot: &Mutex<Pending<T>>) -> std::sync::MutexGuard<'_, Pending<T>> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}
