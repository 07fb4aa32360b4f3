//! Typed bindings and playback for an external scene-graph rendering engine.
//!
//! Two halves share the crate:
//! - [`codegen`] reads the engine's node specification document and writes one strongly-typed
//!   wrapper per node type and one enum per choice group;
//! - [`player`] drives the engine's renderer from a worker thread, mapping wall-clock time to
//!   exact frame indices.
//!
//! The engine itself is reached through the [`native::Engine`] and [`render::RenderContext`]
//! traits; [`memory`] provides headless implementations of both.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codegen;
pub mod config;
pub mod foundation;
pub mod logging;
pub mod memory;
pub mod native;
pub mod node;
pub mod player;
pub mod render;
pub mod scene;
pub mod specs;

pub use codegen::{GenerateOptions, GenerateReport, generate};
pub use foundation::core::{NodeType, Rational};
pub use foundation::error::{NglError, NglResult};
pub use node::{Node, NodeOrValue};
pub use player::{Player, PlayerSetup};
pub use scene::{Scene, SceneParams};
pub use specs::{NodeTypeRegistry, Specs};
