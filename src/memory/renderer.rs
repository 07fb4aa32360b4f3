use crate::native::RawScene;
use crate::render::{CaptureBuffer, NativeWindow, RenderConfig, RenderContext, WindowHandle};
use crate::scene::Scene;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Call made before `configure` or not supported by the current target.
pub const STATUS_INVALID_USAGE: i32 = -5;
/// Draw failure injected through [`RenderProbe::fail_next_draws`].
pub const STATUS_DRAW_FAILED: i32 = -6;
/// Scene rejection injected through [`RenderProbe::fail_next_scenes`].
pub const STATUS_SCENE_REJECTED: i32 = -7;

/// One call received by a [`MemoryRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    /// `configure` with the accepted status.
    Configure(i32),
    /// `set_scene`; `None` detaches.
    SetScene(Option<RawScene>),
    /// `draw` at a time in seconds.
    Draw(f64),
    /// `update` at a time in seconds.
    Update(f64),
    /// `resize`.
    Resize(u32, u32),
    /// `set_capture_buffer`; `true` when a buffer was attached.
    SetCaptureBuffer(bool),
    /// `release`.
    Release,
}

#[derive(Debug, Default)]
struct ProbeState {
    events: Vec<RenderEvent>,
    failing_draws: u32,
    failing_scenes: u32,
    draws_held: bool,
}

/// Observer shared between a [`MemoryRenderer`] and the test or tool driving it.
#[derive(Clone, Debug, Default)]
pub struct RenderProbe {
    inner: Arc<(Mutex<ProbeState>, Condvar)>,
}

impl RenderProbe {
    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, event: RenderEvent) {
        self.lock().events.push(event);
        self.inner.1.notify_all();
    }

    /// Every call so far, in order.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.lock().events.clone()
    }

    /// Times passed to `draw`, including failed draws.
    pub fn draw_times(&self) -> Vec<f64> {
        self.lock()
            .events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Draw(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.lock().events.clear();
    }

    /// Make the next `n` draws fail with [`STATUS_DRAW_FAILED`].
    pub fn fail_next_draws(&self, n: u32) {
        self.lock().failing_draws = n;
    }

    /// Make the next `n` scene changes fail with [`STATUS_SCENE_REJECTED`].
    pub fn fail_next_scenes(&self, n: u32) {
        self.lock().failing_scenes = n;
    }

    /// While held, `draw` records its call and then blocks until released.
    pub fn hold_draws(&self, held: bool) {
        self.lock().draws_held = held;
        self.inner.1.notify_all();
    }

    /// Block until `pred` holds for the recorded calls or `timeout` elapses.
    pub fn wait_until(&self, timeout: Duration, pred: impl Fn(&[RenderEvent]) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if pred(&state.events) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            state = match self.inner.1.wait_timeout(state, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    fn take_draw_failure(&self) -> bool {
        take_one(&mut self.lock().failing_draws)
    }

    fn take_scene_failure(&self) -> bool {
        take_one(&mut self.lock().failing_scenes)
    }

    fn wait_for_draw_release(&self) {
        let mut state = self.lock();
        while state.draws_held {
            state = self.inner.1.wait(state).unwrap_or_else(|e| e.into_inner());
        }
    }
}

fn take_one(left: &mut u32) -> bool {
    if *left == 0 {
        return false;
    }
    *left -= 1;
    true
}

/// Renderer that records calls and fills capture buffers with the clear color.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    probe: RenderProbe,
    config: Option<RenderConfig>,
    scene: Option<RawScene>,
    capture: Option<CaptureBuffer>,
}

impl MemoryRenderer {
    /// Renderer reporting to `probe`.
    pub fn new(probe: RenderProbe) -> Self {
        Self {
            probe,
            ..Self::default()
        }
    }

    /// Probe this renderer reports to.
    pub fn probe(&self) -> &RenderProbe {
        &self.probe
    }
}

impl RenderContext for MemoryRenderer {
    fn configure(&mut self, config: &RenderConfig) -> i32 {
        let status = match config.validate() {
            Ok(()) => {
                self.config = Some(config.clone());
                0
            }
            Err(message) => {
                tracing::debug!(%message, "rejecting render config");
                STATUS_INVALID_USAGE
            }
        };
        self.probe.record(RenderEvent::Configure(status));
        status
    }

    fn set_scene(&mut self, scene: Option<&Scene>) -> i32 {
        let raw = scene.map(Scene::raw);
        self.probe.record(RenderEvent::SetScene(raw));
        if self.config.is_none() {
            return STATUS_INVALID_USAGE;
        }
        if self.probe.take_scene_failure() {
            return STATUS_SCENE_REJECTED;
        }
        self.scene = raw;
        0
    }

    fn draw(&mut self, time: f64) -> i32 {
        self.probe.record(RenderEvent::Draw(time));
        self.probe.wait_for_draw_release();
        let Some(config) = &self.config else {
            return STATUS_INVALID_USAGE;
        };
        if self.probe.take_draw_failure() {
            return STATUS_DRAW_FAILED;
        }
        if let Some(buffer) = &self.capture {
            let mut pixels = buffer.lock().unwrap_or_else(|e| e.into_inner());
            if pixels.len() != config.capture_len() {
                return STATUS_INVALID_USAGE;
            }
            let rgba = config.clear_rgba8();
            for px in pixels.chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
        0
    }

    fn update(&mut self, time: f64) -> i32 {
        self.probe.record(RenderEvent::Update(time));
        if self.config.is_none() {
            STATUS_INVALID_USAGE
        } else {
            0
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> i32 {
        self.probe.record(RenderEvent::Resize(width, height));
        match &mut self.config {
            Some(config) if !config.offscreen => {
                config.width = width;
                config.height = height;
                0
            }
            _ => STATUS_INVALID_USAGE,
        }
    }

    fn set_capture_buffer(&mut self, buffer: Option<CaptureBuffer>) -> i32 {
        self.probe
            .record(RenderEvent::SetCaptureBuffer(buffer.is_some()));
        match &self.config {
            Some(config) if config.offscreen => {
                self.capture = buffer;
                0
            }
            _ => STATUS_INVALID_USAGE,
        }
    }

    fn release(&mut self) {
        self.probe.record(RenderEvent::Release);
        self.config = None;
        self.scene = None;
        self.capture = None;
    }
}

/// Window stand-in that remembers whether it was released.
#[derive(Clone, Debug)]
pub struct MemoryWindow {
    handle: WindowHandle,
    released: Arc<AtomicBool>,
}

impl MemoryWindow {
    /// Window reporting `handle`.
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// `true` once [`NativeWindow::release`] ran on this window or a clone of it.
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl NativeWindow for MemoryWindow {
    fn handle(&self) -> WindowHandle {
        self.handle
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/memory/renderer.rs"]
mod tests;
