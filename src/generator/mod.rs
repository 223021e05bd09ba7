//! Suite generation pipeline
//!
//! ## Modules
//!
//! - `discover` - pure traversal of the test-data tree
//! - `classify` - special-files sets and environment selection
//! - `package_rewrite` - namespace tokens and package-declaration rewriting
//! - `compile` - compiler-service boundary and driver
//! - `external` - external-process compiler service
//! - `artifacts` - persisting compiled binaries
//! - `emit` - printer and test-method emission
//! - `names` - unique test-method names
//! - `paths` - resolved directory layout
//! - `errors` - the fatal error taxonomy
//!
//! ## Design
//!
//! The whole pipeline is single-threaded and strictly sequential: the
//! compiler environments are stateful and not built for concurrent use,
//! and serializing compilation keeps output paths free of cross-file
//! interference. The only mutable state, the printer and the name
//! registry, is owned by the orchestrator.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]

pub mod artifacts;
pub mod classify;
pub mod compile;
pub mod discover;
pub mod emit;
pub mod errors;
pub mod external;
pub mod names;
pub mod package_rewrite;
pub mod paths;

use std::fs;
use std::path::PathBuf;

use crate::generator::artifacts::write_artifacts;
use crate::generator::classify::SpecialFiles;
use crate::generator::compile::{CompilationDriver, CompilerService};
use crate::generator::discover::{SourceUnit, discover};
use crate::generator::emit::{Printer, emit_test_method};
use crate::generator::errors::{GeneratorError, GeneratorResult};
use crate::generator::names::TestNameAllocator;
use crate::generator::package_rewrite::{PackageRewriter, namespace_token};
use crate::generator::paths::PathLayout;

/// License banner placed at the top of the generated file.
const LICENSE_BANNER: &str = "\
/*
 * Licensed under the Apache License, Version 2.0 (the \"License\");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an \"AS IS\" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */";

/// Names that shape the generated suite. The base test class supplies the
/// `invokeBoxMethod` harness primitive at runtime; the generator only
/// references it.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Literal substring that marks a snippet as a runnable test case.
    pub entry_point_marker: String,
    /// Package of the generated test class.
    pub test_class_package: String,
    /// Name of the generated test class.
    pub test_class_name: String,
    /// Package of the external base test class.
    pub base_class_package: String,
    /// Name of the external base test class.
    pub base_class_name: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            entry_point_marker: "fun box()".to_string(),
            test_class_package: "codegen.device".to_string(),
            test_class_name: "CodegenTestCaseOnDevice".to_string(),
            base_class_package: "codegen.device".to_string(),
            base_class_name: "AbstractCodegenTestCaseOnDevice".to_string(),
        }
    }
}

const GENERATOR_NAME: &str = "suitegen";

/// Orchestrates one full generation run.
///
/// Every invocation performs a full rebuild: the environment is prepared,
/// the whole test-data tree is rediscovered, every eligible snippet is
/// recompiled, and the generated file is written once at the end. There is
/// no incremental or cached mode.
pub struct SuiteGenerator<'a> {
    layout: &'a PathLayout,
    special: &'a SpecialFiles,
    config: SuiteConfig,
    driver: CompilationDriver<'a>,
    rewriter: PackageRewriter,
    names: TestNameAllocator,
}

impl<'a> SuiteGenerator<'a> {
    pub fn new(
        layout: &'a PathLayout,
        special: &'a SpecialFiles,
        compiler: &'a dyn CompilerService,
        config: SuiteConfig,
    ) -> Self {
        Self {
            layout,
            special,
            config,
            driver: CompilationDriver::new(compiler),
            rewriter: PackageRewriter::new(),
            names: TestNameAllocator::new(),
        }
    }

    /// Run the whole pipeline. Returns the path of the generated file.
    pub fn generate(&mut self) -> GeneratorResult<PathBuf> {
        self.prepare_module()?;
        self.generate_and_save()
    }

    /// Copy the runtime archive into the module and make sure the tested
    /// module's library folder exists.
    fn prepare_module(&self) -> GeneratorResult<()> {
        tracing::info!("copying runtime archive into the test module");
        self.copy_runtime_archive()?;

        tracing::info!("checking libs folder in the tested module");
        let tested_libs = &self.layout.tested_module_libs_dir;
        if !tested_libs.exists() {
            fs::create_dir_all(tested_libs).map_err(|source| GeneratorError::CreateDir {
                path: tested_libs.clone(),
                source,
            })?;
        }
        Ok(())
    }

    fn copy_runtime_archive(&self) -> GeneratorResult<()> {
        let archive = &self.layout.runtime_archive;
        if !archive.exists() {
            return Err(GeneratorError::Precondition(format!(
                "runtime archive '{}' does not exist; run the dist build step before generating the suite",
                archive.display()
            )));
        }

        let libs_dir = &self.layout.libs_dir;
        fs::create_dir_all(libs_dir).map_err(|source| GeneratorError::CreateDir {
            path: libs_dir.clone(),
            source,
        })?;

        let file_name = archive.file_name().ok_or_else(|| {
            GeneratorError::Precondition(format!("runtime archive path '{}' has no file name", archive.display()))
        })?;
        let target = libs_dir.join(file_name);
        fs::copy(archive, &target).map_err(|source| GeneratorError::Write { path: target, source })?;
        Ok(())
    }

    /// Discover, compile, emit, and flush the generated file once.
    fn generate_and_save(&mut self) -> GeneratorResult<PathBuf> {
        tracing::info!("generating test methods");

        let mut p = Printer::new();
        p.println(LICENSE_BANNER);
        p.println(&format!("package {};", self.config.test_class_package));
        p.newline();
        p.println(&format!(
            "import {}.{};",
            self.config.base_class_package, self.config.base_class_name
        ));
        p.newline();
        p.println(&format!(
            "/* This class is generated by {}. DO NOT MODIFY MANUALLY */",
            GENERATOR_NAME
        ));
        p.println(&format!(
            "public class {} extends {} {{",
            self.config.test_class_name, self.config.base_class_name
        ));
        p.indent();

        let units = discover(
            &self.layout.test_data_dir,
            self.special,
            &self.config.entry_point_marker,
        )?;
        tracing::info!(count = units.len(), "discovered eligible test files");

        for unit in &units {
            self.process_unit(&mut p, unit)?;
        }

        p.dedent();
        p.println("}");

        let target = self.generated_file_path();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, p.finish()).map_err(|source| GeneratorError::Write {
            path: target.clone(),
            source,
        })?;

        tracing::info!(path = %target.display(), "wrote generated suite");
        Ok(target)
    }

    /// Rewrite, classify, compile, persist and emit one eligible unit.
    fn process_unit(&mut self, p: &mut Printer, unit: &SourceUnit) -> GeneratorResult<()> {
        let token = namespace_token(&unit.path);
        let rewritten = self.rewriter.rewrite(&token, &unit.text);
        let variant = self.special.classify(&unit.file_name);

        let compiled = self.driver.compile(&unit.path, variant, &rewritten)?;
        write_artifacts(&compiled, &self.layout.compiled_output_dir)?;

        let test_name = self.names.allocate(&unit.file_name);
        emit_test_method(p, &test_name, &unit.path.to_string_lossy());
        Ok(())
    }

    fn generated_file_path(&self) -> PathBuf {
        let mut path = self.layout.generated_src_dir.clone();
        for segment in self.config.test_class_package.split('.') {
            path.push(segment);
        }
        path.push(format!("{}.java", self.config.test_class_name));
        path
    }
}
