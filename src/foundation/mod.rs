//! Shared primitives: exact rationals, node type tags and the crate error type.

/// Rationals, time conversion and node type tags.
pub mod core;
/// Crate error type.
pub mod error;
