use crate::render::CaptureBuffer;
use crate::scene::Scene;

/// Message processed by the player worker.
pub enum Command {
    /// Begin or resume playback.
    Start,
    /// Freeze on the current frame.
    Pause,
    /// Stop and leave the refresh signal.
    Stop,
    /// Move by a number of frames and pause.
    Step(i64),
    /// Jump to a time in seconds.
    Seek(f64),
    /// Replace the scene, or detach it with `None`.
    SetScene(Option<Scene>),
    /// Resize the onscreen target.
    Resize(u32, u32),
    /// Route rendered pixels into a buffer.
    SetCaptureBuffer(Option<CaptureBuffer>),
    /// Render the clock's current frame.
    Draw,
    /// Render an explicit time, bypassing the clock.
    DrawAt(f64),
    /// Tear everything down and end the worker.
    Release,
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::Step(_) => "step",
            Command::Seek(_) => "seek",
            Command::SetScene(_) => "set_scene",
            Command::Resize(..) => "resize",
            Command::SetCaptureBuffer(_) => "set_capture_buffer",
            Command::Draw => "draw",
            Command::DrawAt(_) => "draw_at",
            Command::Release => "release",
        }
    }

    /// Commands that jump ahead of pending work.
    pub fn is_priority(&self) -> bool {
        matches!(self, Command::SetScene(_) | Command::Stop)
    }

    pub(crate) fn is_draw(&self) -> bool {
        matches!(self, Command::Draw | Command::DrawAt(_))
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Step(n) => write!(f, "Step({n})"),
            Command::Seek(t) => write!(f, "Seek({t})"),
            Command::Resize(w, h) => write!(f, "Resize({w}, {h})"),
            Command::DrawAt(t) => write!(f, "DrawAt({t})"),
            other => f.write_str(other.name()),
        }
    }
}
