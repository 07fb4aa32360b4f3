use crate::codegen::GenerateOptions;
use crate::codegen::synth::{ClassDef, Definitions, EnumDef, FieldDef};
use crate::codegen::types::CallFamily;
use crate::foundation::error::{NglError, NglResult};
use crate::specs::TypeName;
use std::fmt::Write as _;
use std::path::Path;

const HEADER: &str = "// @generated by nglbind from the engine node specification. Do not edit.";

/// Name of the module index written next to the generated files.
pub const INDEX_FILE: &str = "mod.rs";

/// One output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub name: String,
    /// Full file contents.
    pub contents: String,
}

/// Render every definition plus the module index. Output order and text are deterministic.
pub fn emit(defs: &Definitions, opts: &GenerateOptions) -> Vec<GeneratedFile> {
    let mut files = Vec::with_capacity(defs.enums.len() + defs.classes.len() + 1);
    for e in &defs.enums {
        files.push(GeneratedFile {
            name: format!("{}.rs", e.module),
            contents: emit_enum(e),
        });
    }
    for c in &defs.classes {
        files.push(GeneratedFile {
            name: format!("{}.rs", c.module),
            contents: emit_class(c, opts),
        });
    }
    files.push(GeneratedFile {
        name: INDEX_FILE.to_owned(),
        contents: emit_index(defs),
    });
    files
}

/// Replace the contents of `out_dir` with `files`.
pub fn write_files(out_dir: &Path, files: &[GeneratedFile]) -> NglResult<()> {
    if out_dir.exists() {
        std::fs::remove_dir_all(out_dir).map_err(|e| {
            NglError::io(format!("clear output dir '{}': {e}", out_dir.display()))
        })?;
    }
    std::fs::create_dir_all(out_dir)
        .map_err(|e| NglError::io(format!("create output dir '{}': {e}", out_dir.display())))?;
    for f in files {
        let path = out_dir.join(&f.name);
        std::fs::write(&path, &f.contents)
            .map_err(|e| NglError::io(format!("write '{}': {e}", path.display())))?;
    }
    Ok(())
}

fn push_doc(out: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            let _ = writeln!(out, "{indent}///");
        } else {
            let _ = writeln!(out, "{indent}/// {line}");
        }
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn emit_index(defs: &Definitions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out, "#![allow(missing_docs)]");
    let _ = writeln!(out, "#![allow(clippy::too_many_arguments)]");
    let mut modules: Vec<(&str, &str)> = defs
        .enums
        .iter()
        .map(|e| (e.module.as_str(), e.name.as_str()))
        .chain(defs.classes.iter().map(|c| (c.module.as_str(), c.name.as_str())))
        .collect();
    modules.sort_unstable();
    if modules.is_empty() {
        return out;
    }
    let _ = writeln!(out);
    for (module, _) in &modules {
        let _ = writeln!(out, "pub mod {module};");
    }
    let _ = writeln!(out);
    for (module, name) in &modules {
        let _ = writeln!(out, "pub use {module}::{name};");
    }
    out
}

fn emit_enum(e: &EnumDef) -> String {
    let mut out = String::new();
    let name = &e.name;
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Values accepted by `{}` fields.", e.group);
    let _ = writeln!(out, "#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]");
    let _ = writeln!(out, "pub enum {name} {{");
    for v in &e.variants {
        push_doc(&mut out, "    ", &v.doc);
        let _ = writeln!(out, "    {},", v.ident);
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    /// Every variant, in declaration order.");
    let _ = writeln!(out, "    pub const ALL: [{name}; {}] = [", e.variants.len());
    for v in &e.variants {
        let _ = writeln!(out, "        {name}::{},", v.ident);
    }
    let _ = writeln!(out, "    ];");
    let _ = writeln!(out);
    let _ = writeln!(out, "    /// Literal value passed to the engine.");
    let _ = writeln!(out, "    pub fn native_value(self) -> &'static str {{");
    let _ = writeln!(out, "        match self {{");
    for v in &e.variants {
        let _ = writeln!(out, "            {name}::{} => {:?},", v.ident, v.wire);
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out);
    let _ = writeln!(out, "    /// Variant for a literal engine value.");
    let _ = writeln!(out, "    pub fn from_native(value: &str) -> Option<Self> {{");
    let _ = writeln!(out, "        match value {{");
    for v in &e.variants {
        let _ = writeln!(out, "            {:?} => Some({name}::{}),", v.wire, v.ident);
    }
    let _ = writeln!(out, "            _ => None,");
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}

fn call_expr(target: &str, f: &FieldDef, var: &str) -> String {
    format!(
        "{target}.{}({:?}, {})",
        f.mapped.family.method(),
        f.key,
        f.mapped.family.arg(var)
    )
}

fn node_expr(target: &str, f: &FieldDef, var: &str) -> String {
    format!(
        "{target}.{}({:?}, &{var})",
        CallFamily::Node.method(),
        f.key
    )
}

fn emit_class(c: &ClassDef, opts: &GenerateOptions) -> String {
    let mut out = String::new();
    let name = &c.name;
    let pkg = &opts.package;
    let any_node_or_value = c.fields.iter().any(|f| f.can_be_node);
    let any_rational = c.fields.iter().any(|f| f.ty == TypeName::Rational);
    let any_dict = c.fields.iter().any(|f| f.ty == TypeName::NodeDict);

    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    if any_dict {
        let _ = writeln!(out, "use std::collections::BTreeMap;");
        let _ = writeln!(out);
    }
    if any_node_or_value {
        let _ = writeln!(
            out,
            "use {pkg}::node::{{EngineRef, Node, NodeOrValue, NodeType}};"
        );
    } else {
        let _ = writeln!(out, "use {pkg}::node::{{EngineRef, Node, NodeType}};");
    }
    if any_rational {
        let _ = writeln!(out, "use {pkg}::{{NglResult, Rational}};");
    } else {
        let _ = writeln!(out, "use {pkg}::NglResult;");
    }
    let _ = writeln!(out);

    match &c.source_file {
        Some(file) => {
            let _ = writeln!(out, "/// `{}` node (`{file}`).", c.node_name);
        }
        None => {
            let _ = writeln!(out, "/// `{}` node.", c.node_name);
        }
    }
    if !c.fields.is_empty() {
        let _ = writeln!(out, "///");
        let _ = writeln!(out, "/// # Fields");
        let _ = writeln!(out, "///");
        for f in &c.fields {
            let doc = one_line(&f.doc);
            if doc.is_empty() {
                let _ = writeln!(out, "/// - `{}`", f.key);
            } else {
                let _ = writeln!(out, "/// - `{}`: {doc}", f.key);
            }
        }
    }
    let _ = writeln!(out, "#[derive(Clone, Debug, PartialEq)]");
    let _ = writeln!(out, "pub struct {name}(Node);");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    /// Engine type tag.");
    let tag = c.tag.tag();
    let _ = writeln!(
        out,
        "    pub const TYPE: NodeType = NodeType::from_tag(*b{:?});",
        String::from_utf8_lossy(&tag)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "    /// Create the node and assign every provided field in declaration order."
    );
    if c.fields.is_empty() {
        let _ = writeln!(out, "    pub fn new(engine: &EngineRef) -> NglResult<Self> {{");
    } else {
        let _ = writeln!(out, "    pub fn new(");
        let _ = writeln!(out, "        engine: &EngineRef,");
        for f in &c.fields {
            let _ = writeln!(out, "        {}: {},", f.ident, f.ctor_type());
        }
        let _ = writeln!(out, "    ) -> NglResult<Self> {{");
    }
    let _ = writeln!(out, "        let node = Node::create(engine, Self::TYPE)?;");
    for f in &c.fields {
        let mut indent = "        ";
        if f.nullable {
            let _ = writeln!(out, "        if let Some({0}) = {0} {{", f.ident);
            indent = "            ";
        }
        if f.can_be_node {
            let _ = writeln!(out, "{indent}match {} {{", f.ident);
            let _ = writeln!(
                out,
                "{indent}    NodeOrValue::Node(value) => {}?,",
                node_expr("node", f, "value")
            );
            let _ = writeln!(
                out,
                "{indent}    NodeOrValue::Value(value) => {}?,",
                call_expr("node", f, "value")
            );
            let _ = writeln!(out, "{indent}}}");
        } else {
            let _ = writeln!(out, "{indent}{}?;", call_expr("node", f, &f.ident));
        }
        if f.nullable {
            let _ = writeln!(out, "        }}");
        }
    }
    let _ = writeln!(out, "        Ok(Self(node))");
    let _ = writeln!(out, "    }}");

    for f in &c.fields {
        let _ = writeln!(out);
        push_doc(&mut out, "    ", &f.doc);
        let _ = writeln!(
            out,
            "    pub fn {}(&self, {}: {}) -> NglResult<()> {{",
            f.setter,
            f.ident,
            f.value_type()
        );
        if f.can_be_node {
            let _ = writeln!(out, "        match {} {{", f.ident);
            let _ = writeln!(
                out,
                "            NodeOrValue::Node(value) => {},",
                node_expr("self.0", f, "value")
            );
            let _ = writeln!(
                out,
                "            NodeOrValue::Value(value) => {},",
                call_expr("self.0", f, "value")
            );
            let _ = writeln!(out, "        }}");
        } else {
            let _ = writeln!(out, "        {}", call_expr("self.0", f, &f.ident));
        }
        let _ = writeln!(out, "    }}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "    /// Wrapped node handle.");
    let _ = writeln!(out, "    pub fn into_node(self) -> Node {{");
    let _ = writeln!(out, "        self.0");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let _ = writeln!(out, "impl std::ops::Deref for {name} {{");
    let _ = writeln!(out, "    type Target = Node;");
    let _ = writeln!(out);
    let _ = writeln!(out, "    fn deref(&self) -> &Node {{");
    let _ = writeln!(out, "        &self.0");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl AsRef<Node> for {name} {{");
    let _ = writeln!(out, "    fn as_ref(&self) -> &Node {{");
    let _ = writeln!(out, "        &self.0");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
    let _ = writeln!(out, "impl From<{name}> for Node {{");
    let _ = writeln!(out, "    fn from(value: {name}) -> Node {{");
    let _ = writeln!(out, "        value.0");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/codegen/emit.rs"]
mod tests;
