//! Namespace tokens and package-declaration rewriting
//!
//! Every eligible snippet is compiled into a namespace derived from its
//! file path, so two files with the same base name in different
//! directories can never produce colliding artifacts. The rewriter swaps
//! the snippet's declared package for that token, or prepends a
//! declaration when the snippet has none.

use std::path::Path;

use regex::Regex;

/// Derive a namespace token from a file path.
///
/// Path separators, dashes and dots all become underscores, which makes
/// the token a valid flat package name and unique per path.
pub fn namespace_token(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| match c {
            '\\' | '-' | '.' | '/' => '_',
            other => other,
        })
        .collect()
}

/// Rewrites package declarations in source text.
pub struct PackageRewriter {
    pattern: Regex,
}

impl Default for PackageRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageRewriter {
    pub fn new() -> Self {
        // Anchored at line start so package-shaped text inside string
        // literals on continued lines is left alone. If a file genuinely
        // contains several declaration lines, all of them are replaced;
        // that input is undefined upstream.
        let pattern = Regex::new(r"(?m)^package\s+.*$").expect("INVARIANT: package pattern is a valid regex");
        Self { pattern }
    }

    /// Replace the declared package with `token`, or prepend a declaration
    /// if the text has none. No other line is altered.
    pub fn rewrite(&self, token: &str, text: &str) -> String {
        if self.pattern.is_match(text) {
            self.pattern.replace_all(text, format!("package {}", token)).into_owned()
        } else {
            format!("package {}\n{}", token, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_token_replaces_separators_and_dots() {
        let path = PathBuf::from("compiler/testData/codegen/box/simple-case/Foo.kt");
        assert_eq!(
            namespace_token(&path),
            "compiler_testData_codegen_box_simple_case_Foo_kt"
        );
    }

    #[test]
    fn test_token_is_distinct_for_same_base_name() {
        let a = namespace_token(&PathBuf::from("data/a/Foo.kt"));
        let b = namespace_token(&PathBuf::from("data/b/Foo.kt"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_rewrite_replaces_existing_declaration() {
        let rewriter = PackageRewriter::new();
        let text = "package original.name\n\nfun box() = \"OK\"\n";
        let out = rewriter.rewrite("data_Foo_kt", text);
        assert_eq!(out, "package data_Foo_kt\n\nfun box() = \"OK\"\n");
    }

    #[test]
    fn test_rewrite_prepends_when_absent() {
        let rewriter = PackageRewriter::new();
        let text = "fun box() = \"OK\"\n";
        let out = rewriter.rewrite("data_Foo_kt", text);
        assert_eq!(out, "package data_Foo_kt\nfun box() = \"OK\"\n");
        // Exactly one declaration line was added.
        assert_eq!(out.matches("package ").count(), 1);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let rewriter = PackageRewriter::new();
        for text in ["fun box() = \"OK\"\n", "package a.b\nfun box() = \"OK\"\n"] {
            let once = rewriter.rewrite("tok", text);
            let twice = rewriter.rewrite("tok", &once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_rewrite_leaves_other_lines_verbatim() {
        let rewriter = PackageRewriter::new();
        let text = "package p\nval s = \"not a package decl: package x\"\nfun box() = s\n";
        let out = rewriter.rewrite("tok", text);
        assert!(out.contains("val s = \"not a package decl: package x\""));
        assert!(out.starts_with("package tok\n"));
    }

    #[test]
    fn test_mid_line_package_text_not_touched() {
        // Anchoring means "package" appearing mid-line never matches.
        let rewriter = PackageRewriter::new();
        let text = "val s = \" package fake\"\nfun box() = s\n";
        let out = rewriter.rewrite("tok", text);
        assert!(out.contains("val s = \" package fake\""));
        assert!(out.starts_with("package tok\n"));
    }

    #[test]
    fn test_multiple_declarations_all_replaced() {
        // Documented ambiguity: several genuine declaration lines are all
        // rewritten to the same token.
        let rewriter = PackageRewriter::new();
        let text = "package a\npackage b\n";
        let out = rewriter.rewrite("tok", text);
        assert_eq!(out, "package tok\npackage tok\n");
    }
}
