//! File classification against the special-files sets
//!
//! Some test-data snippets need a different compiler environment than the
//! default one: a mock SDK without the standard library, the test-framework
//! jar on the classpath, or the external annotations set. Which environment
//! a file gets is a pure function of its base file name and four static
//! sets supplied at startup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{GeneratorError, GeneratorResult};

/// One of the preconfigured compiler environments a source unit can be
/// compiled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigVariant {
    /// Mock SDK only, no standard library.
    MockJdk,
    /// Mock SDK plus the external annotations set.
    MockJdkWithAnnotations,
    /// Full SDK with the complete annotations set. The default.
    FullJdk,
    /// Full SDK plus the test-framework jar.
    FullJdkWithJunit,
}

impl ConfigVariant {
    /// All variants, in classification priority order.
    pub const ALL: [ConfigVariant; 4] = [
        ConfigVariant::MockJdk,
        ConfigVariant::FullJdkWithJunit,
        ConfigVariant::MockJdkWithAnnotations,
        ConfigVariant::FullJdk,
    ];
}

/// The four classification sets, keyed by base file name (not path).
///
/// Loaded once at startup and read-only for the run's duration. A file may
/// appear in several sets; classification resolves to the first matching
/// branch in priority order.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SpecialFiles {
    /// Files (and directories) never visited for generation.
    pub excluded: HashSet<String>,
    /// Files compiled against the mock SDK without the standard library.
    pub compiled_without_stdlib: HashSet<String>,
    /// Files that need the test-framework jar on the classpath.
    pub compiled_with_junit: HashSet<String>,
    /// Files compiled with the external annotations set.
    pub compiled_with_external_annotations: HashSet<String>,
}

impl SpecialFiles {
    /// Load the sets from a JSON config file.
    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| GeneratorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| {
            GeneratorError::Precondition(format!("invalid special-files config '{}': {}", path.display(), e))
        })
    }

    /// Whether an entry (file or directory) is skipped entirely.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Pick the compiler environment for a file.
    ///
    /// Resolution order is significant and mirrors an if/else-if chain:
    /// no-stdlib first, then test-framework, then external annotations,
    /// else the default full configuration.
    pub fn classify(&self, file_name: &str) -> ConfigVariant {
        if self.compiled_without_stdlib.contains(file_name) {
            ConfigVariant::MockJdk
        } else if self.compiled_with_junit.contains(file_name) {
            ConfigVariant::FullJdkWithJunit
        } else if self.compiled_with_external_annotations.contains(file_name) {
            ConfigVariant::MockJdkWithAnnotations
        } else {
            ConfigVariant::FullJdk
        }
    }
}
