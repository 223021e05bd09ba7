//! CLI module for the suite generator
//!
//! ## Commands
//!
//! - `generate` - walk the test-data tree, compile eligible snippets, and
//!   write the aggregated test-suite source file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Aggregated codegen test-suite generator
#[derive(Parser, Debug)]
#[command(name = "suitegen")]
#[command(version = VERSION)]
#[command(about = "Generates an on-device test suite from a tree of codegen test snippets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the aggregated test suite and compile its test data
    Generate {
        /// Test-data directory to walk
        #[arg(long = "test-data", value_name = "DIR")]
        test_data: PathBuf,

        /// Device-test module directory (receives libs, sources, artifacts)
        #[arg(long = "module", value_name = "DIR")]
        module: PathBuf,

        /// Dist output of a prior build (runtime archive and SDK jars)
        #[arg(long = "dist", value_name = "DIR")]
        dist: PathBuf,

        /// JSON file with the special-files classification sets
        #[arg(long = "special-files", value_name = "FILE")]
        special_files: Option<PathBuf>,

        /// Compiler executable to invoke
        #[arg(long, value_name = "PATH", default_value = "kotlinc")]
        compiler: PathBuf,

        /// Test-framework jar (default: <dist>/lib/junit.jar)
        #[arg(long = "junit-jar", value_name = "FILE")]
        junit_jar: Option<PathBuf>,

        /// Entry-point marker a snippet must contain to produce a test
        #[arg(long, value_name = "LITERAL")]
        marker: Option<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            test_data,
            module,
            dist,
            special_files,
            compiler,
            junit_jar,
            marker,
        } => commands::generate(&commands::GenerateOptions {
            test_data,
            module,
            dist,
            special_files,
            compiler,
            junit_jar,
            marker,
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "suitegen",
            "generate",
            "--test-data",
            "testdata/codegen",
            "--module",
            "android",
            "--dist",
            "dist",
        ])
        .unwrap();
        let Command::Generate {
            test_data,
            compiler,
            marker,
            ..
        } = cli.command;
        assert_eq!(test_data, PathBuf::from("testdata/codegen"));
        assert_eq!(compiler, PathBuf::from("kotlinc"));
        assert!(marker.is_none());
    }

    #[test]
    fn test_cli_parse_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "suitegen",
            "generate",
            "--test-data",
            "td",
            "--module",
            "m",
            "--dist",
            "d",
            "--special-files",
            "special.json",
            "--compiler",
            "/opt/compiler/bin/kotlinc",
            "--junit-jar",
            "libs/junit-4.9.jar",
            "--marker",
            "fun box()",
        ])
        .unwrap();
        let Command::Generate {
            special_files,
            junit_jar,
            marker,
            ..
        } = cli.command;
        assert_eq!(special_files, Some(PathBuf::from("special.json")));
        assert_eq!(junit_jar, Some(PathBuf::from("libs/junit-4.9.jar")));
        assert_eq!(marker.as_deref(), Some("fun box()"));
    }

    #[test]
    fn test_cli_requires_mandatory_dirs() {
        assert!(Cli::try_parse_from(["suitegen", "generate", "--test-data", "td"]).is_err());
    }
}
