//! Player configuration and spec file discovery.

use crate::foundation::core::Rational;
use crate::foundation::error::{NglError, NglResult};
use crate::render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Environment variable naming the engine's install prefix.
pub const SPECS_ENV: &str = "NGL_ANDROID_ENV";

/// ABI directories searched below [`SPECS_ENV`], in order.
pub const SPECS_ABIS: [&str; 3] = ["arm64-v8a", "armeabi-v7a", "x86_64"];

const SPECS_RELATIVE: &str = "share/nopegl/nodes.specs";

/// Settings for a [`crate::player::Player`] built from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Renderer configuration.
    pub render: RenderConfig,
    /// Refresh rate of the interval ticker, in Hz.
    pub refresh_hz: f64,
    /// Frame rate used until a scene is set.
    pub frame_rate: Rational,
    /// Duration in seconds used until a scene is set.
    pub duration: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig {
                swap_interval: Some(-1),
                set_surface_pts: true,
                ..RenderConfig::default()
            },
            refresh_hz: 60.0,
            frame_rate: Rational::default(),
            duration: 0.0,
        }
    }
}

impl PlayerConfig {
    /// Parse from JSON text. Missing keys take their defaults.
    pub fn from_json_str(raw: &str) -> NglResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| NglError::serde(format!("parse player config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> NglResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| NglError::serde(format!("parse player config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> NglResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| NglError::io(format!("open player config '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the player cannot run with. The render configuration is checked by the
    /// renderer itself.
    pub fn validate(&self) -> NglResult<()> {
        if !self.refresh_hz.is_finite() || self.refresh_hz <= 0.0 {
            return Err(NglError::serde(format!(
                "refresh_hz must be > 0, got {}",
                self.refresh_hz
            )));
        }
        if !self.frame_rate.is_valid_frame_rate() {
            return Err(NglError::serde(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(NglError::serde(format!(
                "duration must be >= 0, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

/// Spec file locations below an install prefix, in search order.
pub fn spec_candidates(prefix: &Path) -> Vec<PathBuf> {
    SPECS_ABIS
        .iter()
        .map(|abi| prefix.join(abi).join(SPECS_RELATIVE))
        .collect()
}

/// First existing spec file below `prefix`.
pub fn discover_specs_in(prefix: &Path) -> NglResult<PathBuf> {
    let candidates = spec_candidates(prefix);
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let searched = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(NglError::io(format!("no nodes.specs file found in {searched}")))
}

/// Locate the spec file through [`SPECS_ENV`].
pub fn discover_specs() -> NglResult<PathBuf> {
    let prefix = std::env::var_os(SPECS_ENV)
        .ok_or_else(|| NglError::io(format!("{SPECS_ENV} environment variable is not set")))?;
    discover_specs_in(Path::new(&prefix))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
