use crate::render::config::{RenderConfig, WindowHandle};
use crate::scene::Scene;
use std::sync::{Arc, Mutex};

/// Pixel buffer shared between a renderer and its owner; filled with RGBA8 on every draw.
pub type CaptureBuffer = Arc<Mutex<Vec<u8>>>;

/// Rendering context of the external engine.
///
/// Every call returns the engine's raw status (`0` = success). A context is used from one thread
/// at a time; the player moves it onto its worker.
pub trait RenderContext: Send {
    /// Create the graphics context.
    fn configure(&mut self, config: &RenderConfig) -> i32;

    /// Attach a scene, or detach the current one with `None`.
    fn set_scene(&mut self, scene: Option<&Scene>) -> i32;

    /// Evaluate and render the scene at `time` seconds.
    fn draw(&mut self, time: f64) -> i32;

    /// Evaluate the scene at `time` seconds without rendering.
    fn update(&mut self, time: f64) -> i32;

    /// Resize the onscreen target.
    fn resize(&mut self, width: u32, height: u32) -> i32;

    /// Route rendered pixels into `buffer` (or stop with `None`).
    fn set_capture_buffer(&mut self, buffer: Option<CaptureBuffer>) -> i32;

    /// Destroy the graphics context.
    fn release(&mut self);
}

/// Platform window the renderer presents to.
pub trait NativeWindow: Send {
    /// Handle passed in [`RenderConfig::window`].
    fn handle(&self) -> WindowHandle;

    /// Release the platform window. Called exactly once.
    fn release(&mut self);
}

/// Detach the scene and draw once so the target shows the clear color.
pub fn reset_scene(ctx: &mut dyn RenderContext) -> i32 {
    let ret = ctx.set_scene(None);
    if ret != 0 {
        return ret;
    }
    ctx.draw(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
