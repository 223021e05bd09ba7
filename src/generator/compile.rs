//! Compilation driver and the compiler-service boundary
//!
//! The compiler front end is an external collaborator: anything that can
//! turn rewritten source text plus a configuration variant into a set of
//! named binary artifacts. The trait keeps the pipeline testable (the
//! integration tests drive it with a recording fake) and lets the CLI plug
//! in the external-process compiler.

use std::path::{Path, PathBuf};

use super::classify::ConfigVariant;
use super::errors::{GeneratorError, GeneratorResult};

/// One compiled output file, relative to the artifact output directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub relative_path: PathBuf,
    pub bytes: Vec<u8>,
}

/// The artifact set produced by compiling one source unit.
///
/// Produced and consumed within a single pipeline iteration: persisted
/// immediately, then dropped.
#[derive(Debug, Clone, Default)]
pub struct CompiledUnit {
    pub artifacts: Vec<Artifact>,
}

/// Failure surfaced by a compiler service. The driver wraps it with the
/// file path and rewritten text.
pub type CompilerFailure = Box<dyn std::error::Error + Send + Sync>;

/// External compiler front end, bound to one environment per variant.
pub trait CompilerService {
    /// Compile rewritten source text under the environment selected by
    /// `variant`, returning the binary artifacts.
    fn compile(&self, variant: ConfigVariant, source_text: &str) -> Result<CompiledUnit, CompilerFailure>;
}

/// Drives the external compiler for one source unit at a time and turns
/// any failure into a fatal, reproducible error.
pub struct CompilationDriver<'a> {
    service: &'a dyn CompilerService,
}

impl<'a> CompilationDriver<'a> {
    pub fn new(service: &'a dyn CompilerService) -> Self {
        Self { service }
    }

    /// Compile one rewritten unit. A failing file is never skipped: the
    /// error aborts the whole run and carries the offending path plus the
    /// full rewritten text for diagnosability.
    pub fn compile(&self, path: &Path, variant: ConfigVariant, source_text: &str) -> GeneratorResult<CompiledUnit> {
        self.service
            .compile(variant, source_text)
            .map_err(|cause| GeneratorError::compilation(path, source_text, cause))
    }
}
