use crate::foundation::core::Rational;
use crate::foundation::error::{NglError, NglResult};
use crate::native::{EngineRef, RawScene};
use crate::node::Node;
use std::collections::BTreeMap;
use std::fmt;

/// Scene-wide metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneParams {
    /// Scene duration in seconds.
    pub duration: f64,
    /// Frame rate used to quantize playback time.
    pub frame_rate: Rational,
    /// Display aspect ratio.
    pub aspect_ratio: Rational,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            duration: 0.0,
            frame_rate: Rational::new(60, 1),
            aspect_ratio: Rational::new(1, 1),
        }
    }
}

/// An engine scene: a root node graph plus playback metadata.
pub struct Scene {
    engine: EngineRef,
    raw: RawScene,
    params: SceneParams,
    live_controls: BTreeMap<String, Node>,
}

impl Scene {
    /// Build a scene around `root`.
    pub fn new(engine: &EngineRef, root: &Node, params: SceneParams) -> NglResult<Self> {
        let raw = engine.scene_create(root.raw(), &params);
        if raw.is_null() {
            return Err(NglError::native_call("scene_create", -1));
        }
        Self::adopt(engine, raw, params)
    }

    /// Rebuild a scene from the text produced by [`Scene::serialize`].
    pub fn from_serialized(engine: &EngineRef, text: &str) -> NglResult<Self> {
        let raw = engine.scene_from_string(text);
        if raw.is_null() {
            return Err(NglError::native_call("scene_from_string", -1));
        }
        let Some(params) = engine.scene_params(raw) else {
            engine.scene_release(raw);
            return Err(NglError::native_call("scene_params", -1));
        };
        Self::adopt(engine, raw, params)
    }

    fn adopt(engine: &EngineRef, raw: RawScene, params: SceneParams) -> NglResult<Self> {
        let mut scene = Self {
            engine: engine.clone(),
            raw,
            params,
            live_controls: BTreeMap::new(),
        };
        let controls = engine
            .scene_live_controls(raw)
            .map_err(|status| NglError::native_call("scene_live_controls", status))?;
        for (id, node) in controls {
            let node = Node::from_raw(engine, node, true)?;
            scene.live_controls.insert(id, node);
        }
        Ok(scene)
    }

    /// Serialize the scene to the engine's text format.
    pub fn serialize(&self) -> NglResult<String> {
        self.engine
            .scene_serialize(self.raw)
            .ok_or_else(|| NglError::native_call("scene_serialize", -1))
    }

    /// Live control node registered under `id`.
    pub fn live_control(&self, id: &str) -> Option<&Node> {
        self.live_controls.get(id)
    }

    /// Live control identifiers in sorted order.
    pub fn live_control_ids(&self) -> impl Iterator<Item = &str> {
        self.live_controls.keys().map(String::as_str)
    }

    /// Underlying engine handle.
    pub fn raw(&self) -> RawScene {
        self.raw
    }

    /// Engine that owns this scene.
    pub fn engine(&self) -> &EngineRef {
        &self.engine
    }

    /// Scene metadata.
    pub fn params(&self) -> SceneParams {
        self.params
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.params.duration
    }

    /// Frame rate.
    pub fn frame_rate(&self) -> Rational {
        self.params.frame_rate
    }

    /// Aspect ratio.
    pub fn aspect_ratio(&self) -> Rational {
        self.params.aspect_ratio
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.live_controls.clear();
        self.engine.scene_release(self.raw);
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("raw", &self.raw.0)
            .field("params", &self.params)
            .field("live_controls", &self.live_controls.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
