//! Line-oriented scene text.
//!
//! ```text
//! # nglbind scene v1
//! # duration=4010000000000000
//! # framerate=60/1
//! # aspect_ratio=16/9
//! Quad
//! Draw geometry=n:1 label=s:quad
//! ```
//!
//! Nodes are written children first with the root last. A node reference is the distance back
//! to the referenced line (`1` is the previous line). Floats are stored as IEEE bit patterns so
//! a round trip is exact.

use crate::foundation::core::{NodeType, Rational};
use crate::foundation::error::NglError;
use crate::memory::engine::State;
use crate::memory::value::FieldValue;
use crate::native::RawNode;
use crate::scene::SceneParams;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

const MAGIC: &str = "# nglbind scene v1";

pub(crate) struct DecodedNode {
    pub(crate) ty: NodeType,
    /// Node references hold line indices.
    pub(crate) fields: BTreeMap<String, FieldValue>,
}

pub(crate) struct DecodedScene {
    pub(crate) params: SceneParams,
    pub(crate) nodes: Vec<DecodedNode>,
}

pub(crate) fn encode(state: &State, root: RawNode, params: &SceneParams) -> Result<String, String> {
    let mut enc = Encoder {
        state,
        lines: Vec::new(),
        index: HashMap::new(),
        visiting: HashSet::new(),
    };
    enc.visit(root)?;

    let mut out = String::new();
    let _ = writeln!(out, "{MAGIC}");
    let _ = writeln!(out, "# duration={:016x}", params.duration.to_bits());
    let _ = writeln!(out, "# framerate={}", params.frame_rate);
    let _ = writeln!(out, "# aspect_ratio={}", params.aspect_ratio);
    for line in enc.lines {
        let _ = writeln!(out, "{line}");
    }
    Ok(out)
}

struct Encoder<'a> {
    state: &'a State,
    lines: Vec<String>,
    index: HashMap<u64, usize>,
    visiting: HashSet<u64>,
}

impl Encoder<'_> {
    fn visit(&mut self, node: RawNode) -> Result<usize, String> {
        if let Some(&line) = self.index.get(&node.0) {
            return Ok(line);
        }
        if !self.visiting.insert(node.0) {
            return Err(format!("node graph has a cycle through handle {}", node.0));
        }
        let state = self.state;
        let entry = state
            .nodes
            .get(&node.0)
            .ok_or_else(|| format!("dangling node handle {}", node.0))?;
        for value in entry.fields.values() {
            for child in value.children() {
                self.visit(child)?;
            }
        }

        let at = self.lines.len();
        let back = |n: RawNode| at - self.index[&n.0];
        let mut line = entry.ty.to_string();
        for (key, value) in &entry.fields {
            line.push(' ');
            line.push_str(&percent_encode(key));
            line.push('=');
            encode_value(&mut line, value, back);
        }
        self.lines.push(line);
        self.index.insert(node.0, at);
        self.visiting.remove(&node.0);
        Ok(at)
    }
}

fn join<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(",")
}

fn f32_hex(v: &f32) -> String {
    format!("{:08x}", v.to_bits())
}

fn encode_value(out: &mut String, value: &FieldValue, back: impl Fn(RawNode) -> usize) {
    let _ = match value {
        FieldValue::Int(v) => write!(out, "i:{v}"),
        FieldValue::IVec2(v) => write!(out, "iv:{}", join(v, i32::to_string)),
        FieldValue::IVec3(v) => write!(out, "iv:{}", join(v, i32::to_string)),
        FieldValue::IVec4(v) => write!(out, "iv:{}", join(v, i32::to_string)),
        FieldValue::UInt(v) => write!(out, "u:{v}"),
        FieldValue::UVec2(v) => write!(out, "uv:{}", join(v, u32::to_string)),
        FieldValue::UVec3(v) => write!(out, "uv:{}", join(v, u32::to_string)),
        FieldValue::UVec4(v) => write!(out, "uv:{}", join(v, u32::to_string)),
        FieldValue::Bool(v) => write!(out, "b:{}", u8::from(*v)),
        FieldValue::Float(v) => write!(out, "f:{}", f32_hex(v)),
        FieldValue::Double(v) => write!(out, "d:{:016x}", v.to_bits()),
        FieldValue::Vec2(v) => write!(out, "v:{}", join(v, f32_hex)),
        FieldValue::Vec3(v) => write!(out, "v:{}", join(v, f32_hex)),
        FieldValue::Vec4(v) => write!(out, "v:{}", join(v, f32_hex)),
        FieldValue::Mat4(v) => write!(out, "m4:{}", join(v, f32_hex)),
        FieldValue::Str(v) => write!(out, "s:{}", percent_encode(v)),
        FieldValue::Data(v) => {
            out.push_str("x:");
            for b in v {
                let _ = write!(out, "{b:02x}");
            }
            Ok(())
        }
        FieldValue::Select(v) => write!(out, "sel:{}", percent_encode(v)),
        FieldValue::Flags(v) => write!(out, "fl:{}", percent_encode(v)),
        FieldValue::Rational(v) => write!(out, "r:{v}"),
        FieldValue::Node(n) => write!(out, "n:{}", back(*n)),
        FieldValue::NodeList(list) => write!(out, "nl:{}", join(list, |n| back(*n).to_string())),
        FieldValue::DoubleList(list) => {
            write!(out, "dl:{}", join(list, |v| format!("{:016x}", v.to_bits())))
        }
        FieldValue::Dict(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, n)| format!("{}={}", percent_encode(k), back(*n)))
                .collect();
            write!(out, "nd:{}", entries.join(","))
        }
    };
}

fn is_plain(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'/' | b':')
}

pub(crate) fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_plain(b) {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

pub(crate) fn percent_decode(s: &str) -> Result<String, String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s
                .get(i + 1..i + 3)
                .ok_or_else(|| format!("truncated escape in '{s}'"))?;
            let b = u8::from_str_radix(hex, 16).map_err(|_| format!("bad escape '%{hex}'"))?;
            out.push(b);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| format!("'{s}' is not UTF-8"))
}

pub(crate) fn decode(text: &str) -> Result<DecodedScene, String> {
    let mut params = SceneParams::default();
    let mut nodes: Vec<DecodedNode> = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lineno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some((key, value)) = comment.trim().split_once('=') {
                apply_header(&mut params, key.trim(), value.trim())
                    .map_err(|e| format!("line {lineno}: {e}"))?;
            }
            continue;
        }
        let node = decode_node(line, nodes.len()).map_err(|e| format!("line {lineno}: {e}"))?;
        nodes.push(node);
    }
    if nodes.is_empty() {
        return Err("scene has no nodes".to_owned());
    }
    Ok(DecodedScene { params, nodes })
}

fn apply_header(params: &mut SceneParams, key: &str, value: &str) -> Result<(), String> {
    let rational = |v: &str| v.parse::<Rational>().map_err(|e| e.to_string());
    match key {
        "duration" => {
            let bits = u64::from_str_radix(value, 16).map_err(|_| format!("bad duration '{value}'"))?;
            params.duration = f64::from_bits(bits);
        }
        "framerate" => params.frame_rate = rational(value)?,
        "aspect_ratio" => params.aspect_ratio = rational(value)?,
        _ => {}
    }
    Ok(())
}

fn decode_node(line: &str, at: usize) -> Result<DecodedNode, String> {
    let tag = line.get(..4).ok_or_else(|| format!("short node line '{line}'"))?;
    let ty = NodeType::parse(tag).ok_or_else(|| format!("bad node tag '{tag}'"))?;
    let rest = &line[4..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return Err(format!("node tag '{tag}' must be followed by a space"));
    }
    let mut fields = BTreeMap::new();
    for field in rest.split(' ').filter(|f| !f.is_empty()) {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| format!("field '{field}' has no '='"))?;
        let key = percent_decode(key)?;
        let (sigil, payload) = value
            .split_once(':')
            .ok_or_else(|| format!("field '{key}' has no type sigil"))?;
        let value = decode_value(sigil, payload, at).map_err(|e| format!("field '{key}': {e}"))?;
        if fields.insert(key.clone(), value).is_some() {
            return Err(format!("duplicate field '{key}'"));
        }
    }
    Ok(DecodedNode { ty, fields })
}

fn items(payload: &str) -> impl Iterator<Item = &str> {
    payload.split(',').filter(|s| !s.is_empty())
}

fn parse_num<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("bad number '{s}'"))
}

fn parse_f32(s: &str) -> Result<f32, String> {
    u32::from_str_radix(s, 16)
        .map(f32::from_bits)
        .map_err(|_| format!("bad float '{s}'"))
}

fn parse_f64(s: &str) -> Result<f64, String> {
    u64::from_str_radix(s, 16)
        .map(f64::from_bits)
        .map_err(|_| format!("bad double '{s}'"))
}

fn backref(s: &str, at: usize) -> Result<RawNode, String> {
    let back: usize = parse_num(s)?;
    if back == 0 || back > at {
        return Err(format!("node reference {back} out of range"));
    }
    Ok(RawNode((at - back) as u64))
}

fn parse_list<T>(payload: &str, f: impl Fn(&str) -> Result<T, String>) -> Result<Vec<T>, String> {
    items(payload).map(f).collect()
}

fn fixed<T, const N: usize>(v: Vec<T>) -> Result<[T; N], String> {
    let len = v.len();
    v.try_into()
        .map_err(|_| format!("expected {N} components, found {len}"))
}

fn decode_value(sigil: &str, payload: &str, at: usize) -> Result<FieldValue, String> {
    Ok(match sigil {
        "i" => FieldValue::Int(parse_num(payload)?),
        "u" => FieldValue::UInt(parse_num(payload)?),
        "iv" => {
            let v: Vec<i32> = parse_list(payload, parse_num)?;
            match v.len() {
                2 => FieldValue::IVec2(fixed(v)?),
                3 => FieldValue::IVec3(fixed(v)?),
                4 => FieldValue::IVec4(fixed(v)?),
                n => return Err(format!("ivec with {n} components")),
            }
        }
        "uv" => {
            let v: Vec<u32> = parse_list(payload, parse_num)?;
            match v.len() {
                2 => FieldValue::UVec2(fixed(v)?),
                3 => FieldValue::UVec3(fixed(v)?),
                4 => FieldValue::UVec4(fixed(v)?),
                n => return Err(format!("uvec with {n} components")),
            }
        }
        "b" => match payload {
            "0" => FieldValue::Bool(false),
            "1" => FieldValue::Bool(true),
            other => return Err(format!("bad bool '{other}'")),
        },
        "f" => FieldValue::Float(parse_f32(payload)?),
        "d" => FieldValue::Double(parse_f64(payload)?),
        "v" => {
            let v = parse_list(payload, parse_f32)?;
            match v.len() {
                2 => FieldValue::Vec2(fixed(v)?),
                3 => FieldValue::Vec3(fixed(v)?),
                4 => FieldValue::Vec4(fixed(v)?),
                n => return Err(format!("vec with {n} components")),
            }
        }
        "m4" => FieldValue::Mat4(fixed(parse_list(payload, parse_f32)?)?),
        "s" => FieldValue::Str(percent_decode(payload)?),
        "x" => {
            if payload.len() % 2 != 0 {
                return Err("odd length data".to_owned());
            }
            let data = (0..payload.len())
                .step_by(2)
                .map(|i| {
                    payload
                        .get(i..i + 2)
                        .and_then(|b| u8::from_str_radix(b, 16).ok())
                        .ok_or_else(|| format!("bad data byte at {i}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            FieldValue::Data(data)
        }
        "sel" => FieldValue::Select(percent_decode(payload)?),
        "fl" => FieldValue::Flags(percent_decode(payload)?),
        "r" => FieldValue::Rational(payload.parse().map_err(|e: NglError| e.to_string())?),
        "n" => FieldValue::Node(backref(payload, at)?),
        "nl" => FieldValue::NodeList(parse_list(payload, |s| backref(s, at))?),
        "dl" => FieldValue::DoubleList(parse_list(payload, parse_f64)?),
        "nd" => {
            let mut map = BTreeMap::new();
            for entry in items(payload) {
                let (name, back) = entry
                    .split_once('=')
                    .ok_or_else(|| format!("dict entry '{entry}' has no '='"))?;
                map.insert(percent_decode(name)?, backref(back, at)?);
            }
            FieldValue::Dict(map)
        }
        other => return Err(format!("unknown type sigil '{other}'")),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/memory/serial.rs"]
mod tests;
