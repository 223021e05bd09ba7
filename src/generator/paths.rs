//! Directory layout for a generation run
//!
//! All locations the generator touches are resolved up front by the
//! embedding build, not computed on the fly. The layout is plain data so
//! tests can point every directory at a scratch tree.

use std::path::{Path, PathBuf};

/// Resolved directory locations for one run.
#[derive(Debug, Clone)]
pub struct PathLayout {
    /// Root of the test-data snippet tree.
    pub test_data_dir: PathBuf,
    /// Prebuilt runtime archive in the dist output of a prior build step.
    pub runtime_archive: PathBuf,
    /// Module-local library folder the runtime archive is copied into.
    pub libs_dir: PathBuf,
    /// Library folder of the tested module, created if absent.
    pub tested_module_libs_dir: PathBuf,
    /// Source folder the generated test class is written under.
    pub generated_src_dir: PathBuf,
    /// Output directory for compiled artifacts, created on demand.
    pub compiled_output_dir: PathBuf,
}

impl PathLayout {
    /// Conventional layout for a device-test module: libraries and
    /// generated sources live inside the module, the runtime archive comes
    /// from the dist folder of a prior build.
    pub fn for_module(module_dir: &Path, test_data_dir: &Path, dist_dir: &Path) -> Self {
        Self {
            test_data_dir: test_data_dir.to_path_buf(),
            runtime_archive: dist_dir.join("lib").join("runtime.jar"),
            libs_dir: module_dir.join("libs"),
            tested_module_libs_dir: module_dir.join("tested").join("libs"),
            generated_src_dir: module_dir.join("src"),
            compiled_output_dir: module_dir.join("compiled"),
        }
    }
}
