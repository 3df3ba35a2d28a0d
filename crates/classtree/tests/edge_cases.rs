//! Edge case tests for extraction, forest building and rendering
//!
//! Boundary conditions and tolerant handling of unusual input.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use classtree::prelude::*;

    #[test]
    fn test_empty_string() {
        let analysis = analyze("");
        assert!(analysis.extraction.is_empty());
        assert!(analysis.forest.roots().is_empty());
        assert_eq!(TreeRenderer::new().render(&analysis.forest).unwrap(), "");
        assert_eq!(GraphExporter::new().export(&analysis.forest), GraphExport::default());
    }

    #[test]
    fn test_whitespace_only() {
        let analysis = analyze("   \n\n  \t  \n");
        assert!(analysis.forest.is_empty());
        assert!(!analysis.has_warnings());
    }

    #[test]
    fn test_code_without_classes() {
        let analysis = analyze("int main() {\n    return 0;\n}\nstruct S : Base {};");
        assert!(analysis.forest.is_empty());
    }
}

// =============================================================================
// Malformed Declaration Tests
// =============================================================================

mod malformed {
    use classtree::prelude::*;

    #[test]
    fn test_unterminated_class_head() {
        let analysis = analyze("class A : public B");
        assert!(analysis.extraction.is_empty());
    }

    #[test]
    fn test_keyword_at_end_of_input() {
        assert!(analyze("class").extraction.is_empty());
        assert!(analyze("class ").extraction.is_empty());
    }

    #[test]
    fn test_empty_base_list_parts_are_skipped() {
        let analysis = analyze("class A : {};");
        assert_eq!(analysis.extraction.declarations.len(), 1);
        assert!(analysis.extraction.declarations[0].bases.is_empty());

        let analysis = analyze("class B : X, , Y {};");
        assert_eq!(analysis.extraction.declarations[0].bases, vec!["X", "Y"]);
    }

    #[test]
    fn test_class_keyword_in_comment_is_scanned() {
        // comments are not stripped
        let analysis = analyze("// class Ghost : Base {}\nclass Real {};");
        let names: Vec<_> = analysis
            .extraction
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ghost", "Real"]);
    }

    #[test]
    fn test_unicode_identifiers() {
        let analysis = analyze("class Größe {}; class Maß : Größe {};");
        assert_eq!(analysis.forest.child_names("Größe"), vec!["Maß"]);
    }
}

// =============================================================================
// Graph Shape Tests
// =============================================================================

mod shapes {
    use classtree::prelude::*;

    #[test]
    fn test_self_inheritance_is_cut() {
        let analysis = analyze("class R {}; class A : R, A {};");
        let lines = TreeRenderer::new().render_lines(&analysis.forest);
        assert_eq!(
            lines,
            vec![
                "└── R",
                "    └── A (inherits from: R, A)",
                "        └── A (cycle)",
            ]
        );
    }

    #[test]
    fn test_pure_cycle_renders_nothing() {
        let analysis = analyze("class A : B {}; class B : A {};");
        assert!(analysis.forest.roots().is_empty());
        assert_eq!(TreeRenderer::new().render(&analysis.forest).unwrap(), "");
        assert_eq!(GraphExporter::new().export(&analysis.forest).edges.len(), 2);
    }

    #[test]
    fn test_duplicate_declarations_accumulate_edges() {
        let analysis = analyze("class X : P {}; class X : P {};");
        assert_eq!(analysis.forest.child_names("P"), vec!["X", "X"]);

        let lines = TreeRenderer::new().render_lines(&analysis.forest);
        assert_eq!(
            lines,
            vec!["└── P", "    ├── X (inherits from: P, P)", "    └── X"]
        );
    }

    #[test]
    fn test_multi_parent_subtree_is_repeated() {
        let source = "class A {}; class B {}; class C : A, B {}; class D : C {};";
        let lines = TreeRenderer::new().render_lines(&analyze(source).forest);
        assert_eq!(
            lines,
            vec![
                "├── A",
                "│   └── C (inherits from: A, B)",
                "│       └── D",
                "└── B",
                "    └── C",
                "        └── D",
            ]
        );
    }

    #[test]
    fn test_wide_and_deep_input() {
        let mut source = String::from("class Root {};\n");
        for i in 0..200 {
            source.push_str(&format!("class Leaf{} : public Root {{}};\n", i));
        }
        for i in 1..200 {
            source.push_str(&format!("class Chain{} : public Chain{} {{}};\n", i, i - 1));
        }
        let analysis = analyze(&source);
        assert_eq!(analysis.forest.child_names("Root").len(), 200);
        // Chain0 is referenced but never declared
        assert_eq!(analysis.warnings.len(), 1);

        let lines = TreeRenderer::new().render_lines(&analysis.forest);
        assert_eq!(lines.len(), 401);
    }
}
