//! Scenes: a root node graph plus duration, frame rate and aspect ratio.

/// Scene handle and metadata.
pub mod object;

pub use object::{Scene, SceneParams};
