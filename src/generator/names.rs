//! Test-method name allocation
//!
//! Test methods are named after their source file, but the same base name
//! can appear in several test-data subdirectories. The allocator keeps an
//! append-only registry of every name handed out during the run and
//! disambiguates collisions with a numeric suffix. Given a stable walk
//! order, two runs over an unchanged tree produce identical names.

/// Allocates unique, identifier-safe test names for the whole run.
#[derive(Debug, Default)]
pub struct TestNameAllocator {
    /// Ordered registry of already-allocated names. Append-only.
    allocated: Vec<String>,
}

impl TestNameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a unique name from a file's base name.
    ///
    /// Strips the extension, capitalizes the first letter, then compares
    /// case-sensitively against every previously allocated name. On
    /// collision, `_<n>` is appended with `n` starting at 0 and
    /// incrementing until the candidate is unused. The final name is
    /// recorded before it is returned.
    pub fn allocate(&mut self, file_base_name: &str) -> String {
        let stem = file_base_name
            .rsplit_once('.')
            .map_or(file_base_name, |(stem, _ext)| stem);
        let base = capitalize(stem);

        let mut candidate = base.clone();
        let mut n = 0;
        while self.allocated.iter().any(|name| name == &candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }

        self.allocated.push(candidate.clone());
        candidate
    }

    /// Names allocated so far, in allocation order.
    pub fn allocated(&self) -> &[String] {
        &self.allocated
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
