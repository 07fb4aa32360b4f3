//! Playback clock and frame scheduler.
//!
//! A [`Player`] owns one worker thread that holds the renderer exclusively. Transport calls,
//! refresh ticks and scene changes are commands on a single deque processed in order; `stop` and
//! `set_scene` jump ahead of pending draws. The frame math lives in [`PlaybackClock`], which
//! has no threads or I/O and is driven by caller-supplied nanoseconds.

/// Frame index arithmetic and transport state.
pub mod clock;
/// Worker commands.
pub mod command;
pub(crate) mod queue;
/// Display refresh sources.
pub mod refresh;
/// Monotonic time sources.
pub mod time;
/// Worker thread and the [`Player`] handle.
pub mod worker;

pub use clock::{PlaybackClock, PlaybackState, Tick};
pub use command::Command;
pub use refresh::{IntervalRefresh, ManualRefresh, RefreshCallback, RefreshSource};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use worker::{FrameReport, Player, PlayerListener, PlayerSetup};
