use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Callback run on every display refresh.
pub type RefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Display refresh signal (vsync) the player subscribes to while playing.
pub trait RefreshSource: Send {
    /// Start calling `callback` on every refresh, replacing any earlier subscription.
    fn subscribe(&mut self, callback: RefreshCallback);

    /// Stop calling the callback. No call is in flight once this returns.
    fn unsubscribe(&mut self);
}

/// Fixed-interval ticker running on its own thread.
pub struct IntervalRefresh {
    interval: Duration,
    running: Option<(Arc<AtomicBool>, JoinHandle<()>)>,
}

impl IntervalRefresh {
    /// Tick every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    /// Tick `hz` times per second. Non-positive rates fall back to 60 Hz.
    pub fn from_hz(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 60.0 };
        Self::new(Duration::from_secs_f64(1.0 / hz))
    }

    /// Tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl RefreshSource for IntervalRefresh {
    fn subscribe(&mut self, callback: RefreshCallback) {
        self.unsubscribe();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let interval = self.interval;
        let spawned = std::thread::Builder::new()
            .name("nglbind-refresh".to_owned())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    std::thread::sleep(interval);
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    callback();
                }
            });
        match spawned {
            Ok(handle) => self.running = Some((stop, handle)),
            Err(err) => tracing::warn!(%err, "failed to start refresh thread"),
        }
    }

    fn unsubscribe(&mut self) {
        if let Some((stop, handle)) = self.running.take() {
            stop.store(true, Ordering::Release);
            if handle.join().is_err() {
                tracing::warn!("refresh thread panicked");
            }
        }
    }
}

impl Drop for IntervalRefresh {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Refresh source fired explicitly. Clones share the subscription.
#[derive(Clone, Default)]
pub struct ManualRefresh {
    callback: Arc<Mutex<Option<RefreshCallback>>>,
}

impl ManualRefresh {
    /// Run the subscribed callback once. Returns `false` when nothing is subscribed.
    pub fn fire(&self) -> bool {
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match callback {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }

    /// A callback is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.callback
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl RefreshSource for ManualRefresh {
    fn subscribe(&mut self, callback: RefreshCallback) {
        *self.callback.lock().unwrap_or_else(|e| e.into_inner()) = Some(callback);
    }

    fn unsubscribe(&mut self) {
        *self.callback.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl std::fmt::Debug for ManualRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualRefresh")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/refresh.rs"]
mod tests;
