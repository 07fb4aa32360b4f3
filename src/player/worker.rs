use crate::foundation::core::Rational;
use crate::foundation::error::{NglError, NglResult};
use crate::player::clock::PlaybackClock;
use crate::player::command::Command;
use crate::player::queue::CommandQueue;
use crate::player::refresh::{IntervalRefresh, RefreshCallback, RefreshSource};
use crate::player::time::{SystemTimeSource, TimeSource};
use crate::render::{CaptureBuffer, NativeWindow, RenderConfig, RenderContext};
use crate::scene::Scene;
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

/// Outcome of one draw, passed to [`PlayerListener::on_frame_drawn`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame rendered (for explicit-time draws, the nearest frame).
    pub frame_index: i64,
    /// Time passed to the renderer in seconds.
    pub time: f64,
    /// Renderer status, `0` on success.
    pub status: i32,
    /// Failed draws in a row, including this one.
    pub consecutive_failures: u32,
}

/// Notifications delivered on the worker thread.
pub trait PlayerListener: Send {
    /// The renderer is configured and commands are being processed.
    fn on_ready(&mut self) {}

    /// First successful draw after start, a scene change, a seek or a loop wrap.
    fn on_first_frame(&mut self) {}

    /// Every draw, successful or not.
    fn on_frame_drawn(&mut self, report: &FrameReport) {
        let _ = report;
    }
}

/// Everything a player needs, with defaults for the optional parts.
pub struct PlayerSetup {
    renderer: Box<dyn RenderContext>,
    config: RenderConfig,
    window: Option<Box<dyn NativeWindow>>,
    time: Arc<dyn TimeSource>,
    refresh: Box<dyn RefreshSource>,
    listener: Option<Box<dyn PlayerListener>>,
    frame_rate: Rational,
    duration: f64,
}

impl PlayerSetup {
    /// Render with `renderer` configured by `config`, timed by the system clock and a 60 Hz
    /// ticker.
    pub fn new(renderer: Box<dyn RenderContext>, config: RenderConfig) -> Self {
        Self {
            renderer,
            config,
            window: None,
            time: Arc::new(SystemTimeSource::new()),
            refresh: Box::new(IntervalRefresh::from_hz(60.0)),
            listener: None,
            frame_rate: Rational::default(),
            duration: 0.0,
        }
    }

    /// Present to `window`; its handle overrides [`RenderConfig::window`].
    pub fn with_window(mut self, window: Box<dyn NativeWindow>) -> Self {
        self.window = Some(window);
        self
    }

    /// Read time from `time`.
    pub fn with_time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = time;
        self
    }

    /// Drive draws from `refresh`.
    pub fn with_refresh(mut self, refresh: Box<dyn RefreshSource>) -> Self {
        self.refresh = refresh;
        self
    }

    /// Deliver notifications to `listener`.
    pub fn with_listener(mut self, listener: Box<dyn PlayerListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Timeline used until a scene is set.
    pub fn with_timeline(mut self, frame_rate: Rational, duration: f64) -> Self {
        self.frame_rate = frame_rate;
        self.duration = duration;
        self
    }
}

/// Handle to a playback worker thread.
///
/// Every method enqueues a command and returns immediately; the worker applies commands in order
/// and owns the renderer exclusively. After [`Player::release`] every method fails with
/// [`NglError::Player`].
pub struct Player {
    queue: Arc<CommandQueue>,
    worker: Option<JoinHandle<()>>,
}

impl Player {
    /// Start the worker and configure the renderer on it.
    ///
    /// Blocks until configuration finished; a rejected configuration is returned as
    /// [`NglError::Configure`] and the worker is gone.
    pub fn spawn(setup: PlayerSetup) -> NglResult<Self> {
        let queue = Arc::new(CommandQueue::default());
        let (ready_tx, ready_rx) = mpsc::channel();
        let worker = Worker::new(setup, queue.clone());
        let handle = std::thread::Builder::new()
            .name("nglbind-player".to_owned())
            .spawn(move || worker.run(ready_tx))
            .map_err(|e| NglError::player(format!("spawn worker: {e}")))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                queue,
                worker: Some(handle),
            }),
            Ok(Err(err)) => {
                let _ = handle.join();
                Err(err)
            }
            Err(_) => {
                let _ = handle.join();
                Err(NglError::player("worker exited during configuration"))
            }
        }
    }

    fn send(&self, cmd: Command) -> NglResult<()> {
        let name = cmd.name();
        if self.queue.push(cmd) {
            Ok(())
        } else {
            Err(NglError::player(format!("'{name}' after release")))
        }
    }

    fn send_draw(&self, cmd: Command) -> NglResult<()> {
        if self.queue.push_draw(cmd) {
            Ok(())
        } else {
            Err(NglError::player("'draw' after release"))
        }
    }

    /// Begin or resume playback and subscribe to the refresh signal.
    pub fn start(&self) -> NglResult<()> {
        self.send(Command::Start)
    }

    /// Freeze on the current frame.
    pub fn pause(&self) -> NglResult<()> {
        self.send(Command::Pause)
    }

    /// Stop playback and unsubscribe from the refresh signal. Jumps ahead of pending commands.
    pub fn stop(&self) -> NglResult<()> {
        self.send(Command::Stop)
    }

    /// Move by `frames` (negative goes back) and pause.
    pub fn step(&self, frames: i64) -> NglResult<()> {
        self.send(Command::Step(frames))
    }

    /// Jump to `secs`.
    pub fn seek(&self, secs: f64) -> NglResult<()> {
        self.send(Command::Seek(secs))
    }

    /// Replace the scene (or detach it with `None`). Jumps ahead of pending commands.
    pub fn set_scene(&self, scene: Option<Scene>) -> NglResult<()> {
        self.send(Command::SetScene(scene))
    }

    /// Resize the onscreen target.
    pub fn resize(&self, width: u32, height: u32) -> NglResult<()> {
        self.send(Command::Resize(width, height))
    }

    /// Route rendered pixels into `buffer` (offscreen only).
    pub fn set_capture_buffer(&self, buffer: Option<CaptureBuffer>) -> NglResult<()> {
        self.send(Command::SetCaptureBuffer(buffer))
    }

    /// Draw the current frame. A pending draw request is replaced, never duplicated.
    pub fn request_render(&self) -> NglResult<()> {
        self.send_draw(Command::Draw)
    }

    /// Draw at `time` seconds without moving the clock.
    pub fn request_render_at(&self, time: f64) -> NglResult<()> {
        self.send_draw(Command::DrawAt(time))
    }

    /// Tear down the refresh subscription, renderer and window, then join the worker.
    pub fn release(&mut self) -> NglResult<()> {
        let Some(handle) = self.worker.take() else {
            return Err(NglError::player("already released"));
        };
        self.queue.push_last(Command::Release);
        handle
            .join()
            .map_err(|_| NglError::player("worker panicked"))
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if self.worker.is_some()
            && let Err(err) = self.release()
        {
            tracing::warn!(%err, "player release on drop failed");
        }
    }
}

struct Worker {
    renderer: Box<dyn RenderContext>,
    config: RenderConfig,
    window: Option<Box<dyn NativeWindow>>,
    time: Arc<dyn TimeSource>,
    refresh: Box<dyn RefreshSource>,
    listener: Option<Box<dyn PlayerListener>>,
    queue: Arc<CommandQueue>,
    clock: PlaybackClock,
    default_timeline: (Rational, f64),
    scene: Option<Scene>,
    subscribed: bool,
    consecutive_failures: u32,
}

impl Worker {
    fn new(setup: PlayerSetup, queue: Arc<CommandQueue>) -> Self {
        let mut config = setup.config;
        if let Some(window) = &setup.window {
            config.window = Some(window.handle());
        }
        Self {
            renderer: setup.renderer,
            config,
            window: setup.window,
            time: setup.time,
            refresh: setup.refresh,
            listener: setup.listener,
            queue,
            clock: PlaybackClock::new(setup.frame_rate, setup.duration),
            default_timeline: (setup.frame_rate, setup.duration),
            scene: None,
            subscribed: false,
            consecutive_failures: 0,
        }
    }

    fn run(mut self, ready: mpsc::Sender<NglResult<()>>) {
        let status = self.renderer.configure(&self.config);
        if status != 0 {
            let err = match self.config.validate() {
                Err(message) => NglError::configure(status, message),
                Ok(()) => NglError::configure(status, "renderer rejected the configuration"),
            };
            self.teardown();
            let _ = ready.send(Err(err));
            return;
        }
        let _ = ready.send(Ok(()));
        tracing::debug!(
            backend = ?self.config.backend,
            offscreen = self.config.offscreen,
            "player ready"
        );
        if let Some(listener) = &mut self.listener {
            listener.on_ready();
        }

        while let Some(cmd) = self.queue.pop() {
            tracing::debug!(command = ?cmd, "player command");
            if matches!(cmd, Command::Release) {
                break;
            }
            self.handle(cmd);
        }
        self.teardown();
        let dropped = self.queue.close();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped commands after release");
        }
    }

    fn now(&self) -> i64 {
        self.time.now_nanos()
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Start => {
                let now = self.now();
                self.clock.start(now);
                self.subscribe();
            }
            Command::Pause => {
                self.clock.pause();
            }
            Command::Stop => {
                let now = self.now();
                self.clock.stop(now);
                self.unsubscribe();
            }
            Command::Step(frames) => {
                let now = self.now();
                self.clock.step(frames, now);
                self.queue.push_draw(Command::Draw);
            }
            Command::Seek(secs) => {
                let now = self.now();
                self.clock.seek(secs, now);
                self.queue.push_draw(Command::Draw);
            }
            Command::SetScene(scene) => self.set_scene(scene),
            Command::Resize(width, height) => {
                let status = self.renderer.resize(width, height);
                if status != 0 {
                    tracing::warn!(width, height, status, "renderer rejected resize");
                }
                self.queue.push_draw(Command::Draw);
            }
            Command::SetCaptureBuffer(buffer) => {
                let status = self.renderer.set_capture_buffer(buffer);
                if status != 0 {
                    tracing::warn!(status, "renderer rejected capture buffer");
                }
            }
            Command::Draw => self.draw(),
            Command::DrawAt(time) => {
                let status = self.renderer.draw(time);
                let frame_index = self.clock.frame_rate().secs_to_frame_round(time);
                self.report(frame_index, time, status);
            }
            Command::Release => {}
        }
    }

    fn set_scene(&mut self, scene: Option<Scene>) {
        let status = self.renderer.set_scene(scene.as_ref());
        if status != 0 {
            tracing::warn!(status, "renderer rejected scene, keeping the current one");
            return;
        }
        let (frame_rate, duration) = match &scene {
            Some(s) => (s.frame_rate(), s.duration()),
            None => self.default_timeline,
        };
        let now = self.now();
        self.clock.set_scene(frame_rate, duration, now);
        self.scene = scene;
        self.queue.push_draw(Command::Draw);
    }

    fn draw(&mut self) {
        let now = self.now();
        let tick = self.clock.tick(now);
        if tick.wrapped {
            tracing::debug!(frame_rate = %self.clock.frame_rate(), "timeline looped");
        }
        let status = self.renderer.draw(tick.time);
        if status == 0
            && self.clock.frame_rendered(now)
            && let Some(listener) = &mut self.listener
        {
            listener.on_first_frame();
        }
        self.report(tick.frame_index, tick.time, status);
    }

    fn report(&mut self, frame_index: i64, time: f64, status: i32) {
        if status == 0 {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            tracing::warn!(
                frame_index,
                time,
                status,
                consecutive_failures = self.consecutive_failures,
                "draw failed"
            );
        }
        let report = FrameReport {
            frame_index,
            time,
            status,
            consecutive_failures: self.consecutive_failures,
        };
        if let Some(listener) = &mut self.listener {
            listener.on_frame_drawn(&report);
        }
    }

    fn subscribe(&mut self) {
        if self.subscribed {
            return;
        }
        let queue = self.queue.clone();
        let callback: RefreshCallback = Arc::new(move || {
            queue.push_draw(Command::Draw);
        });
        self.refresh.subscribe(callback);
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        if self.subscribed {
            self.refresh.unsubscribe();
            self.subscribed = false;
        }
    }

    fn teardown(&mut self) {
        self.unsubscribe();
        self.renderer.release();
        self.scene = None;
        if let Some(mut window) = self.window.take() {
            window.release();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/worker.rs"]
mod tests;
