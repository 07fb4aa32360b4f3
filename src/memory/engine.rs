use crate::foundation::core::NodeType;
use crate::foundation::error::NglResult;
use crate::memory::schema::{STATUS_INVALID_HANDLE, STATUS_TYPE_MISMATCH, Schema};
use crate::memory::serial;
use crate::memory::value::{FieldValue, NodeSnapshot, SnapshotValue, native_wire_type};
use crate::native::{Engine, NativeValue, RawNode, RawScene};
use crate::scene::SceneParams;
use crate::specs::{NodeTypeRegistry, Specs};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Field that registers a node as a live control of the scene containing it.
pub const LIVE_ID_KEY: &str = "live_id";

#[derive(Clone, Debug)]
pub(crate) struct NodeEntry {
    pub(crate) ty: NodeType,
    pub(crate) refs: u32,
    pub(crate) fields: BTreeMap<String, FieldValue>,
}

#[derive(Clone, Debug)]
struct SceneEntry {
    root: RawNode,
    params: SceneParams,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) nodes: HashMap<u64, NodeEntry>,
    scenes: HashMap<u64, SceneEntry>,
    next_id: u64,
}

impl State {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn retain(&mut self, node: RawNode) {
        if let Some(entry) = self.nodes.get_mut(&node.0) {
            entry.refs += 1;
        }
    }

    // Iterative so long chains do not recurse.
    fn release(&mut self, node: RawNode) {
        let mut pending = vec![node];
        while let Some(raw) = pending.pop() {
            let Some(entry) = self.nodes.get_mut(&raw.0) else {
                continue;
            };
            entry.refs = entry.refs.saturating_sub(1);
            if entry.refs > 0 {
                continue;
            }
            if let Some(freed) = self.nodes.remove(&raw.0) {
                for value in freed.fields.values() {
                    pending.extend(value.children());
                }
            }
        }
    }
}

/// Reference-counted node store implementing [`Engine`] without a GPU.
///
/// Used by the test-suite and the `play` command. With a [`Schema`] every setter call is checked
/// against the declared fields and failures surface as the `STATUS_*` codes.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    state: Mutex<State>,
    schema: Option<Schema>,
}

impl MemoryEngine {
    /// Engine accepting any node type and field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine validating calls against `schema`.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            state: Mutex::new(State::default()),
            schema: Some(schema),
        }
    }

    /// Engine validating calls against a spec document.
    pub fn from_specs(specs: &Specs, registry: &NodeTypeRegistry) -> NglResult<Self> {
        Ok(Self::with_schema(Schema::from_specs(specs, registry)?))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.lock().nodes.len()
    }

    /// Number of live scenes.
    pub fn scene_count(&self) -> usize {
        self.lock().scenes.len()
    }

    /// Current reference count of `node`, `None` once freed.
    pub fn ref_count(&self, node: RawNode) -> Option<u32> {
        self.lock().nodes.get(&node.0).map(|e| e.refs)
    }

    /// Type of a live node.
    pub fn node_type(&self, node: RawNode) -> Option<NodeType> {
        self.lock().nodes.get(&node.0).map(|e| e.ty)
    }

    /// Stored value of one field.
    pub fn field(&self, node: RawNode, key: &str) -> Option<FieldValue> {
        self.lock().nodes.get(&node.0)?.fields.get(key).cloned()
    }

    /// Root node of a live scene.
    pub fn scene_root(&self, scene: RawScene) -> Option<RawNode> {
        self.lock().scenes.get(&scene.0).map(|s| s.root)
    }

    /// Structural copy of the graph below `node`. `None` for dead handles and cyclic graphs.
    pub fn snapshot(&self, node: RawNode) -> Option<NodeSnapshot> {
        let state = self.lock();
        snapshot_node(&state, node, &mut HashSet::new())
    }

    /// Structural copy of a scene's graph.
    pub fn scene_snapshot(&self, scene: RawScene) -> Option<NodeSnapshot> {
        let root = self.scene_root(scene)?;
        self.snapshot(root)
    }

    fn check(&self, ty: NodeType, key: &str, value: &FieldValue) -> i32 {
        match &self.schema {
            Some(schema) => schema.check(ty, key, value.wire_type(), value.choice_text()),
            None => 0,
        }
    }

    fn build_scene(&self, decoded: serial::DecodedScene) -> Result<RawScene, String> {
        for (i, node) in decoded.nodes.iter().enumerate() {
            if let Some(schema) = &self.schema
                && !schema.knows(node.ty)
            {
                return Err(format!("line {}: node type {} is not declared", i + 1, node.ty));
            }
            for (key, value) in &node.fields {
                let status = self.check(node.ty, key, value);
                if status != 0 {
                    return Err(format!("line {}: field '{key}' rejected with {status}", i + 1));
                }
            }
        }

        let mut state = self.lock();
        let state = &mut *state;
        let mut raws: Vec<RawNode> = Vec::with_capacity(decoded.nodes.len());
        for node in decoded.nodes {
            let id = state.alloc_id();
            let mut fields = node.fields;
            for value in fields.values_mut() {
                value.map_nodes(|idx| raws[idx.0 as usize]);
                for child in value.children() {
                    state.retain(child);
                }
            }
            state.nodes.insert(
                id,
                NodeEntry {
                    ty: node.ty,
                    refs: 1,
                    fields,
                },
            );
            raws.push(RawNode(id));
        }

        let Some((&root, rest)) = raws.split_last() else {
            return Err("scene has no nodes".to_owned());
        };
        for &raw in rest {
            state.release(raw);
        }
        let id = state.alloc_id();
        state.scenes.insert(
            id,
            SceneEntry {
                root,
                params: decoded.params,
            },
        );
        Ok(RawScene(id))
    }
}

fn snapshot_node(state: &State, node: RawNode, visiting: &mut HashSet<u64>) -> Option<NodeSnapshot> {
    let entry = state.nodes.get(&node.0)?;
    if !visiting.insert(node.0) {
        return None;
    }
    let mut fields = BTreeMap::new();
    for (key, value) in &entry.fields {
        let snap = match value {
            FieldValue::Node(n) => {
                SnapshotValue::Node(Box::new(snapshot_node(state, *n, visiting)?))
            }
            FieldValue::NodeList(list) => SnapshotValue::NodeList(
                list.iter()
                    .map(|n| snapshot_node(state, *n, visiting))
                    .collect::<Option<Vec<_>>>()?,
            ),
            FieldValue::Dict(map) => SnapshotValue::Dict(
                map.iter()
                    .map(|(k, n)| Some((k.clone(), snapshot_node(state, *n, visiting)?)))
                    .collect::<Option<BTreeMap<_, _>>>()?,
            ),
            other => SnapshotValue::Plain(other.clone()),
        };
        fields.insert(key.clone(), snap);
    }
    visiting.remove(&node.0);
    Some(NodeSnapshot {
        ty: entry.ty,
        fields,
    })
}

impl Engine for MemoryEngine {
    fn node_create(&self, ty: NodeType) -> RawNode {
        if let Some(schema) = &self.schema
            && !schema.knows(ty)
        {
            tracing::debug!(node_type = %ty, "refusing to create undeclared node type");
            return RawNode::NULL;
        }
        let mut state = self.lock();
        let id = state.alloc_id();
        state.nodes.insert(
            id,
            NodeEntry {
                ty,
                refs: 1,
                fields: BTreeMap::new(),
            },
        );
        RawNode(id)
    }

    fn node_ref(&self, node: RawNode) {
        self.lock().retain(node);
    }

    fn node_unref(&self, node: RawNode) {
        self.lock().release(node);
    }

    fn node_set(&self, node: RawNode, key: &str, value: NativeValue<'_>) -> i32 {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(ty) = state.nodes.get(&node.0).map(|e| e.ty) else {
            return STATUS_INVALID_HANDLE;
        };
        if let Some(schema) = &self.schema {
            let choice = match value {
                NativeValue::Select(s) | NativeValue::Flags(s) => Some(s),
                _ => None,
            };
            let status = schema.check(ty, key, native_wire_type(&value), choice);
            if status != 0 {
                tracing::debug!(
                    node = schema.node_name(ty).unwrap_or("?"),
                    key,
                    status,
                    "rejected field"
                );
                return status;
            }
        }

        let targets: Vec<RawNode> = match value {
            NativeValue::Node(n) | NativeValue::Dict { node: n, .. } => vec![n],
            NativeValue::AddNodes(list) => list.to_vec(),
            _ => Vec::new(),
        };
        if targets.iter().any(|t| !state.nodes.contains_key(&t.0)) {
            return STATUS_INVALID_HANDLE;
        }
        for &t in &targets {
            state.retain(t);
        }

        let Some(entry) = state.nodes.get_mut(&node.0) else {
            return STATUS_INVALID_HANDLE;
        };
        let old = entry.fields.remove(key);
        let children_of = |old: Option<FieldValue>| old.map(|v| v.children()).unwrap_or_default();
        let (new, displaced) = match (value, old) {
            (NativeValue::AddNodes(list), Some(FieldValue::NodeList(mut cur))) => {
                cur.extend_from_slice(list);
                (FieldValue::NodeList(cur), Vec::new())
            }
            (NativeValue::AddNodes(list), old) => {
                (FieldValue::NodeList(list.to_vec()), children_of(old))
            }
            (NativeValue::AddDoubles(list), Some(FieldValue::DoubleList(mut cur))) => {
                cur.extend_from_slice(list);
                (FieldValue::DoubleList(cur), Vec::new())
            }
            (NativeValue::AddDoubles(list), old) => {
                (FieldValue::DoubleList(list.to_vec()), children_of(old))
            }
            (NativeValue::Dict { name, node }, Some(FieldValue::Dict(mut cur))) => {
                let replaced = cur.insert(name.to_owned(), node);
                (FieldValue::Dict(cur), replaced.into_iter().collect())
            }
            (NativeValue::Dict { name, node }, old) => {
                let map = BTreeMap::from([(name.to_owned(), node)]);
                (FieldValue::Dict(map), children_of(old))
            }
            (scalar, old) => match FieldValue::from_native(&scalar) {
                Some(v) => (v, children_of(old)),
                None => return STATUS_TYPE_MISMATCH,
            },
        };
        entry.fields.insert(key.to_owned(), new);
        for d in displaced {
            state.release(d);
        }
        0
    }

    fn scene_create(&self, root: RawNode, params: &SceneParams) -> RawScene {
        let mut state = self.lock();
        if !state.nodes.contains_key(&root.0) {
            return RawScene::NULL;
        }
        state.retain(root);
        let id = state.alloc_id();
        state.scenes.insert(
            id,
            SceneEntry {
                root,
                params: *params,
            },
        );
        RawScene(id)
    }

    fn scene_from_string(&self, text: &str) -> RawScene {
        match serial::decode(text).and_then(|decoded| self.build_scene(decoded)) {
            Ok(scene) => scene,
            Err(message) => {
                tracing::warn!(%message, "failed to load serialized scene");
                RawScene::NULL
            }
        }
    }

    fn scene_params(&self, scene: RawScene) -> Option<SceneParams> {
        self.lock().scenes.get(&scene.0).map(|s| s.params)
    }

    fn scene_serialize(&self, scene: RawScene) -> Option<String> {
        let state = self.lock();
        let entry = state.scenes.get(&scene.0)?;
        match serial::encode(&state, entry.root, &entry.params) {
            Ok(text) => Some(text),
            Err(message) => {
                tracing::warn!(%message, "failed to serialize scene");
                None
            }
        }
    }

    fn scene_live_controls(&self, scene: RawScene) -> Result<Vec<(String, RawNode)>, i32> {
        let mut state = self.lock();
        let root = state
            .scenes
            .get(&scene.0)
            .map(|s| s.root)
            .ok_or(STATUS_INVALID_HANDLE)?;
        let mut controls = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![root];
        while let Some(raw) = pending.pop() {
            if !seen.insert(raw.0) {
                continue;
            }
            let Some(entry) = state.nodes.get(&raw.0) else {
                continue;
            };
            if let Some(FieldValue::Str(id)) = entry.fields.get(LIVE_ID_KEY)
                && !id.is_empty()
            {
                controls.push((id.clone(), raw));
            }
            for value in entry.fields.values() {
                pending.extend(value.children());
            }
        }
        controls.sort();
        for (_, raw) in &controls {
            state.retain(*raw);
        }
        Ok(controls)
    }

    fn scene_release(&self, scene: RawScene) {
        let mut state = self.lock();
        if let Some(entry) = state.scenes.remove(&scene.0) {
            state.release(entry.root);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/memory/engine.rs"]
mod tests;
