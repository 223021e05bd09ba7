//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::PathBuf;

use crate::generator::classify::SpecialFiles;
use crate::generator::external::{ExternalCompiler, ExternalCompilerConfig};
use crate::generator::paths::PathLayout;
use crate::generator::{SuiteConfig, SuiteGenerator};

use super::{CliError, CliResult, ExitCode};

/// Resolved arguments for the `generate` command.
#[derive(Debug)]
pub struct GenerateOptions {
    pub test_data: PathBuf,
    pub module: PathBuf,
    pub dist: PathBuf,
    pub special_files: Option<PathBuf>,
    pub compiler: PathBuf,
    pub junit_jar: Option<PathBuf>,
    pub marker: Option<String>,
}

/// Run a full generation: prepare the module, compile every eligible
/// snippet, and write the aggregated suite.
pub fn generate(options: &GenerateOptions) -> CliResult<ExitCode> {
    let special = match &options.special_files {
        Some(path) => SpecialFiles::load(path).map_err(|e| CliError::failure(render_error(&e)))?,
        None => SpecialFiles::default(),
    };

    let layout = PathLayout::for_module(&options.module, &options.test_data, &options.dist);

    let compiler_config = ExternalCompilerConfig {
        executable: options.compiler.clone(),
        mock_sdk_jar: options.dist.join("lib").join("mock-sdk.jar"),
        full_sdk_jar: options.dist.join("lib").join("sdk.jar"),
        annotations_jar: options.dist.join("lib").join("annotations.jar"),
        junit_jar: options
            .junit_jar
            .clone()
            .unwrap_or_else(|| options.dist.join("lib").join("junit.jar")),
        scratch_dir: std::env::temp_dir().join("suitegen"),
    };
    let compiler = ExternalCompiler::new(compiler_config).map_err(|e| CliError::failure(render_error(&e)))?;

    let mut config = SuiteConfig::default();
    if let Some(marker) = &options.marker {
        config.entry_point_marker = marker.clone();
    }

    let mut generator = SuiteGenerator::new(&layout, &special, &compiler, config);
    let generated = generator.generate().map_err(|e| CliError::failure(render_error(&e)))?;

    println!("Generated test suite: {}", generated.display());
    Ok(ExitCode::SUCCESS)
}

/// Render an error with its full source chain, one cause per line.
fn render_error(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(&format!("\ncaused by: {}", cause));
        source = cause.source();
    }
    msg
}
