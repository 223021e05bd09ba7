//! External-process compiler service
//!
//! The production compiler front end is a separate executable. Each
//! configuration variant gets its own preconfigured environment (classpath
//! and flags), built once at startup; compiling a unit writes the
//! rewritten text to a scratch file, invokes the executable, and collects
//! everything it produced as binary artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::classify::ConfigVariant;
use super::compile::{Artifact, CompiledUnit, CompilerFailure, CompilerService};
use super::errors::{GeneratorError, GeneratorResult};

/// Classpath and flags for one configuration variant.
#[derive(Debug, Clone)]
pub struct CompilerEnvironment {
    pub classpath: Vec<PathBuf>,
    pub extra_args: Vec<String>,
}

/// Inputs needed to assemble the four environments.
#[derive(Debug, Clone)]
pub struct ExternalCompilerConfig {
    /// Compiler executable to invoke.
    pub executable: PathBuf,
    /// Minimal SDK jar (no standard library).
    pub mock_sdk_jar: PathBuf,
    /// Full SDK jar.
    pub full_sdk_jar: PathBuf,
    /// Annotations jar shared by most environments.
    pub annotations_jar: PathBuf,
    /// Test-framework jar; must exist before any work starts.
    pub junit_jar: PathBuf,
    /// Scratch directory for per-unit source files and compiler output.
    pub scratch_dir: PathBuf,
}

/// Compiler service that shells out to an external executable.
#[derive(Debug)]
pub struct ExternalCompiler {
    executable: PathBuf,
    environments: BTreeMap<ConfigVariant, CompilerEnvironment>,
    scratch_dir: PathBuf,
}

impl ExternalCompiler {
    /// Build the enum-keyed environment table.
    ///
    /// The four environments are expensive and stateful on the compiler
    /// side, so they are constructed exactly once; classification output
    /// indexes straight into this table.
    pub fn new(config: ExternalCompilerConfig) -> GeneratorResult<Self> {
        if !config.junit_jar.exists() {
            return Err(GeneratorError::Precondition(format!(
                "test framework jar '{}' does not exist; fetch dependencies before generating the suite",
                config.junit_jar.display()
            )));
        }

        let mut environments = BTreeMap::new();
        environments.insert(
            ConfigVariant::MockJdk,
            CompilerEnvironment {
                classpath: vec![config.mock_sdk_jar.clone()],
                extra_args: vec!["-no-stdlib".to_string()],
            },
        );
        environments.insert(
            ConfigVariant::MockJdkWithAnnotations,
            CompilerEnvironment {
                classpath: vec![config.mock_sdk_jar.clone(), config.annotations_jar.clone()],
                extra_args: vec!["-no-stdlib".to_string()],
            },
        );
        environments.insert(
            ConfigVariant::FullJdk,
            CompilerEnvironment {
                classpath: vec![config.full_sdk_jar.clone(), config.annotations_jar.clone()],
                extra_args: Vec::new(),
            },
        );
        environments.insert(
            ConfigVariant::FullJdkWithJunit,
            CompilerEnvironment {
                classpath: vec![config.full_sdk_jar, config.annotations_jar, config.junit_jar],
                extra_args: Vec::new(),
            },
        );

        Ok(Self {
            executable: config.executable,
            environments,
            scratch_dir: config.scratch_dir,
        })
    }

    fn unit_scratch_dir(&self) -> PathBuf {
        // Unique enough for a single-writer tool: pid + wall-clock millis.
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.scratch_dir.join(format!("unit_{}_{}", std::process::id(), millis))
    }
}

impl CompilerService for ExternalCompiler {
    fn compile(&self, variant: ConfigVariant, source_text: &str) -> Result<CompiledUnit, CompilerFailure> {
        let env = self
            .environments
            .get(&variant)
            .expect("INVARIANT: an environment is built for every variant");

        // The scratch directory is removed on every exit path, including
        // spawn failures.
        let unit_dir = self.unit_scratch_dir();
        let result = self.compile_in(env, &unit_dir, source_text);
        let _ = fs::remove_dir_all(&unit_dir);
        result
    }
}

impl ExternalCompiler {
    fn compile_in(
        &self,
        env: &CompilerEnvironment,
        unit_dir: &Path,
        source_text: &str,
    ) -> Result<CompiledUnit, CompilerFailure> {
        let out_dir = unit_dir.join("out");
        fs::create_dir_all(&out_dir)?;
        let source_file = unit_dir.join("unit.kt");
        fs::write(&source_file, source_text)?;

        let separator = if cfg!(windows) { ";" } else { ":" };
        let classpath = env
            .classpath
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(separator);

        let mut command = Command::new(&self.executable);
        command
            .arg(&source_file)
            .arg("-d")
            .arg(&out_dir)
            .arg("-classpath")
            .arg(&classpath)
            .args(&env.extra_args);

        let output = command.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(stderr.into());
        }

        let mut artifacts = Vec::new();
        collect_artifacts(&out_dir, &out_dir, &mut artifacts)?;
        Ok(CompiledUnit { artifacts })
    }
}

/// Read every file under `dir` into an artifact, with paths relative to
/// `base`.
fn collect_artifacts(base: &Path, dir: &Path, artifacts: &mut Vec<Artifact>) -> Result<(), CompilerFailure> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?.filter_map(|e| e.ok().map(|e| e.path())).collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_artifacts(base, &path, artifacts)?;
        } else {
            let relative_path = path.strip_prefix(base).unwrap_or(&path).to_path_buf();
            let bytes = fs::read(&path)?;
            artifacts.push(Artifact { relative_path, bytes });
        }
    }
    Ok(())
}
