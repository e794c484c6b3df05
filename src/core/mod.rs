//! Plan compilation: registry, retention, type diffs, synthesis, assembly,
//! lowering, templates, storage.

pub mod assembler;
pub mod compiler;
pub mod diff;
pub mod digest;
pub mod error;
pub mod lowering;
pub mod primitives;
pub mod registry;
pub mod retention;
pub mod store;
pub mod synthesizer;
pub mod templates;
pub mod types;
