//! Boundary to the external renderer.

/// Renderer configuration.
pub mod config;
/// Render context and native window traits.
pub mod context;

pub use config::{Backend, RenderConfig, WindowHandle};
pub use context::{CaptureBuffer, NativeWindow, RenderContext, reset_scene};
