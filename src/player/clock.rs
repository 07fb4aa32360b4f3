use crate::foundation::core::{Rational, secs_to_nanos};

/// Transport state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Not playing; the refresh signal is not subscribed.
    #[default]
    Stopped,
    /// Frame index follows wall-clock time.
    Playing,
    /// Frame index frozen.
    Paused,
}

/// Result of one render tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Frame to render.
    pub frame_index: i64,
    /// Presentation time of that frame in seconds.
    pub time: f64,
    /// The timeline looped back to frame 0 on this tick.
    pub wrapped: bool,
}

/// Maps monotonic nanoseconds to frame indices.
///
/// All timestamps are caller-supplied nanoseconds so the clock can be driven by any
/// [`crate::player::TimeSource`]. Frame arithmetic stays in integers; only [`Tick::time`] is
/// floating point.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    frame_rate: Rational,
    duration_nanos: i64,
    state: PlaybackState,
    frame_index: i64,
    offset: Option<i64>,
    got_first_frame: bool,
}

impl PlaybackClock {
    /// Stopped clock at frame 0. An invalid frame rate falls back to 60/1.
    pub fn new(frame_rate: Rational, duration: f64) -> Self {
        let mut clock = Self {
            frame_rate: Rational::default(),
            duration_nanos: 0,
            state: PlaybackState::Stopped,
            frame_index: 0,
            offset: None,
            got_first_frame: false,
        };
        clock.set_timeline(frame_rate, duration);
        clock
    }

    fn set_timeline(&mut self, frame_rate: Rational, duration: f64) {
        if frame_rate.is_valid_frame_rate() {
            self.frame_rate = frame_rate;
        } else {
            tracing::warn!(%frame_rate, "invalid frame rate, keeping {}", self.frame_rate);
        }
        self.duration_nanos = secs_to_nanos(duration);
    }

    /// Transport state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current frame index.
    pub fn frame_index(&self) -> i64 {
        self.frame_index
    }

    /// Frame rate in use.
    pub fn frame_rate(&self) -> Rational {
        self.frame_rate
    }

    /// Timeline length in nanoseconds.
    pub fn duration_nanos(&self) -> i64 {
        self.duration_nanos
    }

    /// A frame has been rendered since the last reset.
    pub fn got_first_frame(&self) -> bool {
        self.got_first_frame
    }

    /// Wall-clock anchor of frame 0, `None` until first reset.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Last frame reachable by stepping: `floor(duration * num / den)`.
    pub fn max_frame(&self) -> i64 {
        self.frame_rate.nanos_to_frames(self.duration_nanos)
    }

    /// Presentation time of the current frame in seconds.
    pub fn time(&self) -> f64 {
        self.frame_rate.frame_to_secs(self.frame_index)
    }

    // Anchor the clock so the current frame maps to `now`.
    fn reset_offset(&mut self, now: i64) {
        let since_start = self.frame_rate.frames_to_nanos(self.frame_index);
        self.offset = Some(now.saturating_sub(since_start));
    }

    /// Stopped or Paused → Playing and re-arm the first-frame flag. Returns `false` when
    /// already playing.
    pub fn start(&mut self, now: i64) -> bool {
        if self.state == PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Playing;
        self.got_first_frame = false;
        self.reset_offset(now);
        true
    }

    /// Playing → Paused. Returns `false` in any other state.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        true
    }

    /// Any state → Stopped. The frame index is kept.
    pub fn stop(&mut self, now: i64) {
        self.state = PlaybackState::Stopped;
        self.reset_offset(now);
    }

    /// Move by `frames`, clamped to `[0, max_frame]`, and pause there.
    pub fn step(&mut self, frames: i64, now: i64) {
        self.frame_index = self
            .frame_index
            .saturating_add(frames)
            .clamp(0, self.max_frame());
        self.state = PlaybackState::Paused;
        self.reset_offset(now);
    }

    /// Jump to the frame nearest `secs`, clamped to the timeline.
    pub fn seek(&mut self, secs: f64, now: i64) {
        self.frame_index = self
            .frame_rate
            .secs_to_frame_round(secs)
            .clamp(0, self.max_frame());
        self.got_first_frame = false;
        self.reset_offset(now);
    }

    /// Switch to a new timeline and restart at frame 0. The transport state is kept.
    pub fn set_scene(&mut self, frame_rate: Rational, duration: f64, now: i64) {
        self.set_timeline(frame_rate, duration);
        self.frame_index = 0;
        self.got_first_frame = false;
        self.reset_offset(now);
    }

    /// Compute the frame to render at `now`.
    ///
    /// While playing the frame follows `now - offset`; reaching the duration (or having no
    /// anchor) loops back to frame 0 and clears the first-frame flag.
    pub fn tick(&mut self, now: i64) -> Tick {
        let mut wrapped = false;
        if self.state == PlaybackState::Playing {
            match self.offset.map(|o| now.saturating_sub(o)) {
                Some(elapsed) if (0..self.duration_nanos).contains(&elapsed) => {
                    self.frame_index = self.frame_rate.nanos_to_frames(elapsed);
                }
                _ => {
                    self.offset = Some(now);
                    self.frame_index = 0;
                    self.got_first_frame = false;
                    wrapped = true;
                }
            }
        }
        Tick {
            frame_index: self.frame_index,
            time: self.time(),
            wrapped,
        }
    }

    /// Record a successful render at `now`.
    ///
    /// Returns `true` for the first one since the last reset, re-anchoring the clock on it.
    pub fn frame_rendered(&mut self, now: i64) -> bool {
        if self.got_first_frame {
            return false;
        }
        self.got_first_frame = true;
        self.reset_offset(now);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/clock.rs"]
mod tests;
