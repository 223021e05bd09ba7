//! Persisting compiled artifacts
//!
//! Each compiled unit's binaries land under the configured output
//! directory, which is created on demand. The output directory is
//! single-writer; concurrent generator invocations against the same
//! targets are unsupported.

use std::fs;
use std::path::Path;

use super::compile::CompiledUnit;
use super::errors::{GeneratorError, GeneratorResult};

/// Write every artifact of one compiled unit into `output_dir`.
pub fn write_artifacts(unit: &CompiledUnit, output_dir: &Path) -> GeneratorResult<()> {
    fs::create_dir_all(output_dir).map_err(|source| GeneratorError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    for artifact in &unit.artifacts {
        let target = output_dir.join(&artifact.relative_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, &artifact.bytes).map_err(|source| GeneratorError::Write {
            path: target.clone(),
            source,
        })?;
    }

    Ok(())
}
