//! Pipeplan, a dataset preprocessing plan compiler.
//!
//! Compares a user's column selection and typing against the dataset as
//! ingested and emits the minimal pipeline that reconciles them. BLAKE3 plan
//! identity. Fixed-recipe analysis templates.

pub mod cli;
pub mod core;
pub mod dataset;
