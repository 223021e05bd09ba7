//! Property-based tests for the pure pieces of the pipeline

use std::path::Path;

use proptest::prelude::*;

use suitegen::generator::classify::{ConfigVariant, SpecialFiles};
use suitegen::generator::names::TestNameAllocator;
use suitegen::generator::package_rewrite::{PackageRewriter, namespace_token};

proptest! {
    /// Allocated test names are pairwise distinct, even when the input
    /// sequence is full of duplicates.
    #[test]
    fn test_allocator_never_repeats_a_name(
        names in prop::collection::vec("[a-zA-Z][a-zA-Z0-9]{0,8}\\.kt", 1..20)
    ) {
        let mut doubled = names.clone();
        doubled.extend(names);

        let mut allocator = TestNameAllocator::new();
        let mut seen = std::collections::HashSet::new();
        for name in &doubled {
            let allocated = allocator.allocate(name);
            prop_assert!(seen.insert(allocated.clone()), "duplicate name {}", allocated);
        }
    }

    /// Every allocated name starts with an uppercase letter, so the
    /// emitted `test<Name>` methods read as camel case.
    #[test]
    fn test_allocator_capitalizes_the_base_name(
        name in "[a-z][a-zA-Z0-9]{0,8}\\.kt"
    ) {
        let mut allocator = TestNameAllocator::new();
        let allocated = allocator.allocate(&name);
        let first = allocated.chars().next();
        prop_assert!(first.is_some_and(|c| c.is_ascii_uppercase()));
    }

    /// Rewriting is idempotent: a second pass over already rewritten text
    /// changes nothing.
    #[test]
    fn test_rewrite_is_idempotent(
        token in "[a-z_][a-z0-9_]{0,16}",
        text in "[a-zA-Z0-9 _\\.\\n]{0,200}"
    ) {
        let rewriter = PackageRewriter::new();
        let once = rewriter.rewrite(&token, &text);
        let twice = rewriter.rewrite(&token, &once);
        prop_assert_eq!(once, twice);
    }

    /// The rewritten text always carries the namespace declaration,
    /// whether the input had one or not.
    #[test]
    fn test_rewrite_always_declares_the_namespace(
        token in "[a-z_][a-z0-9_]{0,16}",
        body in "[a-zA-Z0-9 _\\n]{0,120}",
        declaration in prop::option::of("package [a-z][a-z\\.]{0,20}")
    ) {
        let text = match &declaration {
            Some(line) => format!("{}\n{}", line, body),
            None => body.clone(),
        };

        let rewriter = PackageRewriter::new();
        let rewritten = rewriter.rewrite(&token, &text);
        let expected = format!("package {}", token);
        prop_assert!(rewritten.lines().any(|line| line == expected));
    }

    /// Namespace tokens never contain characters that are meaningful in
    /// paths or package names.
    #[test]
    fn test_namespace_token_has_no_separators(
        segments in prop::collection::vec("[a-zA-Z0-9\\.\\-]{1,10}", 1..6)
    ) {
        let path = segments.iter().fold(std::path::PathBuf::new(), |p, s| p.join(s));
        let token = namespace_token(&path);
        prop_assert!(!token.contains('/'));
        prop_assert!(!token.contains('\\'));
        prop_assert!(!token.contains('.'));
        prop_assert!(!token.contains('-'));
    }

    /// Classification is a pure function of the file name and the sets:
    /// repeated calls always agree, and the no-stdlib set always wins.
    #[test]
    fn test_classification_is_deterministic(
        name in "[a-z][a-z0-9]{0,10}\\.kt",
        in_no_stdlib in any::<bool>(),
        in_junit in any::<bool>(),
        in_annotations in any::<bool>(),
    ) {
        let mut special = SpecialFiles::default();
        if in_no_stdlib {
            special.compiled_without_stdlib.insert(name.clone());
        }
        if in_junit {
            special.compiled_with_junit.insert(name.clone());
        }
        if in_annotations {
            special.compiled_with_external_annotations.insert(name.clone());
        }

        let first = special.classify(&name);
        let second = special.classify(&name);
        prop_assert_eq!(first, second);

        if in_no_stdlib {
            prop_assert_eq!(first, ConfigVariant::MockJdk);
        } else if in_junit {
            prop_assert_eq!(first, ConfigVariant::FullJdkWithJunit);
        } else if in_annotations {
            prop_assert_eq!(first, ConfigVariant::MockJdkWithAnnotations);
        } else {
            prop_assert_eq!(first, ConfigVariant::FullJdk);
        }
    }
}

#[test]
fn test_namespace_token_for_a_known_path() {
    let token = namespace_token(Path::new("testData/codegen/box/simple.kt"));
    assert_eq!(token, "testData_codegen_box_simple_kt");
}
