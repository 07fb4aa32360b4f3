use serde::{Deserialize, Serialize};

/// Graphics backend selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// OpenGL ES.
    #[default]
    #[serde(alias = "opengles", alias = "gles")]
    OpenGlEs,
    /// Vulkan.
    Vulkan,
}

/// Opaque platform window handle handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

/// Renderer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Graphics backend.
    pub backend: Backend,
    /// Render into an offscreen target instead of a window.
    pub offscreen: bool,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
    /// MSAA sample count, `0` to disable.
    pub samples: u32,
    /// Clear color as RGBA floats in `[0, 1]`.
    pub clear_color: [f32; 4],
    /// Native window to present to (onscreen only).
    #[serde(skip)]
    pub window: Option<WindowHandle>,
    /// Swap interval; `None` keeps the platform default.
    pub swap_interval: Option<i32>,
    /// Attach presentation timestamps to presented frames.
    pub set_surface_pts: bool,
    /// Draw the performance overlay.
    pub hud: bool,
    /// Overlay scale factor.
    pub hud_scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::OpenGlEs,
            offscreen: false,
            width: 0,
            height: 0,
            samples: 0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            window: None,
            swap_interval: None,
            set_surface_pts: false,
            hud: false,
            hud_scale: 1,
        }
    }
}

impl RenderConfig {
    /// Offscreen configuration of the given size.
    pub fn offscreen(width: u32, height: u32) -> Self {
        Self {
            offscreen: true,
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the combinations every renderer rejects.
    pub fn validate(&self) -> Result<(), String> {
        if self.offscreen {
            if self.width == 0 || self.height == 0 {
                return Err(format!(
                    "offscreen target needs a non-zero size, got {}x{}",
                    self.width, self.height
                ));
            }
            if self.window.is_some() {
                return Err("offscreen rendering does not take a window".to_owned());
            }
        } else if self.window.is_none() {
            return Err("onscreen rendering needs a window".to_owned());
        }
        if self
            .clear_color
            .iter()
            .any(|c| !c.is_finite() || !(0.0..=1.0).contains(c))
        {
            return Err(format!("clear color {:?} out of [0, 1]", self.clear_color));
        }
        if self.hud && self.hud_scale == 0 {
            return Err("hud_scale must be >= 1".to_owned());
        }
        Ok(())
    }

    /// Clear color quantized to RGBA8.
    pub fn clear_rgba8(&self) -> [u8; 4] {
        self.clear_color
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Bytes needed for a capture buffer matching the target size.
    pub fn capture_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
