//! Spec-driven generator for typed node wrappers.
//!
//! The pipeline is `Specs` → [`synth::synthesize`] (type mapping, naming, collision checks) →
//! [`emit::emit`] (source text) → [`emit::write_files`]. Every check runs before the output
//! directory is touched, so a failing run leaves the previous output intact.

/// Source text rendering and file output.
pub mod emit;
/// Identifier casing.
pub mod naming;
/// Enum and node type synthesis.
pub mod synth;
/// Wire type → Rust type mapping.
pub mod types;

use crate::foundation::error::NglResult;
use crate::specs::{NodeTypeRegistry, Specs};
use std::path::Path;

pub use emit::{GeneratedFile, emit, write_files};
pub use synth::{ClassDef, Definitions, EnumDef, FieldDef, VariantDef, synthesize};
pub use synth::{synthesize_choice_enum, synthesize_node_class};
pub use types::{CallFamily, MappedType, map_type};

/// Generator settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Rust path of the runtime crate the generated code imports (`crate` when generating into
    /// this crate itself).
    pub package: String,
    /// Prefix prepended to every generated type name.
    pub prefix: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: "nglbind".to_owned(),
            prefix: String::new(),
        }
    }
}

/// Summary of one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Number of choice enums written.
    pub enums: usize,
    /// Number of node types written.
    pub classes: usize,
    /// File names written, in output order.
    pub files: Vec<String>,
}

/// Synthesize and render everything without touching the filesystem.
pub fn render(
    specs: &Specs,
    registry: &NodeTypeRegistry,
    opts: &GenerateOptions,
) -> NglResult<(Definitions, Vec<GeneratedFile>)> {
    let defs = synthesize(specs, registry, opts)?;
    let files = emit(&defs, opts);
    Ok((defs, files))
}

/// Regenerate `out_dir` from `specs`.
#[tracing::instrument(skip(specs, registry, opts), fields(out_dir = %out_dir.display()))]
pub fn generate(
    specs: &Specs,
    registry: &NodeTypeRegistry,
    opts: &GenerateOptions,
    out_dir: &Path,
) -> NglResult<GenerateReport> {
    let (defs, files) = render(specs, registry, opts)?;
    write_files(out_dir, &files)?;
    let report = GenerateReport {
        enums: defs.enums.len(),
        classes: defs.classes.len(),
        files: files.into_iter().map(|f| f.name).collect(),
    };
    tracing::info!(
        enums = report.enums,
        classes = report.classes,
        files = report.files.len(),
        "generated node bindings"
    );
    Ok(report)
}
