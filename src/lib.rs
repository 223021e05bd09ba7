#![forbid(unsafe_code)]
//! Aggregated codegen test-suite generator
//!
//! `suitegen` walks a tree of small test-data snippets, compiles every
//! snippet that contains an entry-point marker through an external compiler
//! front end, persists the compiled artifacts, and emits a single generated
//! Java test class with one method per compiled snippet. A separate
//! on-device harness runs the generated suite; this tool only produces it.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`.
//!   The `cli` and `generator` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug in the generator itself
//!   (logic error), use `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod generator;

pub use generator::SuiteGenerator;
pub use generator::classify::{ConfigVariant, SpecialFiles};
pub use generator::compile::{Artifact, CompiledUnit, CompilerService};
pub use generator::errors::GeneratorError;
pub use generator::paths::PathLayout;
