//! In-memory engine and renderer.
//!
//! Stand-ins for the native engine that keep the full node graph in process. They back the
//! integration tests and the `play` command when no device is attached.

/// Node store implementing [`crate::native::Engine`].
pub mod engine;
/// Recording renderer implementing [`crate::render::RenderContext`].
pub mod renderer;
/// Field declarations derived from a spec document.
pub mod schema;
pub(crate) mod serial;
/// Stored field values and graph snapshots.
pub mod value;

pub use engine::{LIVE_ID_KEY, MemoryEngine};
pub use renderer::{
    MemoryRenderer, MemoryWindow, RenderEvent, RenderProbe, STATUS_DRAW_FAILED,
    STATUS_INVALID_USAGE, STATUS_SCENE_REJECTED,
};
pub use schema::{
    STATUS_INVALID_HANDLE, STATUS_OUT_OF_RANGE, STATUS_TYPE_MISMATCH, STATUS_UNKNOWN_FIELD, Schema,
};
pub use value::{FieldValue, NodeSnapshot, SnapshotValue};
