//! Property tests for extraction and forest invariants

use classtree::prelude::*;
use proptest::prelude::*;

fn class_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]).prop_map(String::from)
}

fn declarations() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(
        (class_name(), prop::collection::vec(class_name(), 0..3)),
        0..8,
    )
}

fn to_source(decls: &[(String, Vec<String>)]) -> String {
    decls
        .iter()
        .map(|(name, bases)| {
            if bases.is_empty() {
                format!("class {} {{}};", name)
            } else {
                let list: Vec<String> = bases.iter().map(|b| format!("public {}", b)).collect();
                format!("class {} : {} {{}};", name, list.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn extraction_recovers_generated_declarations(decls in declarations()) {
        let extraction = DeclarationExtractor::new().extract(&to_source(&decls));
        prop_assert_eq!(extraction.declarations.len(), decls.len());
        for (found, (name, bases)) in extraction.declarations.iter().zip(&decls) {
            prop_assert_eq!(&found.name, name);
            prop_assert_eq!(&found.bases, bases);
        }
    }

    #[test]
    fn duplicates_are_names_seen_twice(decls in declarations()) {
        let extraction = DeclarationExtractor::new().extract(&to_source(&decls));
        for name in &extraction.declared {
            let count = decls.iter().filter(|(n, _)| n == name).count();
            prop_assert_eq!(extraction.duplicates.contains(name), count > 1);
        }
    }

    #[test]
    fn one_warning_per_dangling_base(decls in declarations()) {
        let analysis = analyze(&to_source(&decls));
        let dangling: Vec<&String> = analysis
            .forest
            .referenced()
            .iter()
            .filter(|name| !analysis.forest.is_defined(name))
            .collect();
        let undefined: Vec<&StructuralWarning> = analysis.validation_warnings().collect();
        prop_assert_eq!(undefined.len(), dangling.len());
        for warning in undefined {
            prop_assert!(!analysis.forest.is_defined(warning.class_name()));
        }
    }

    #[test]
    fn every_base_occurrence_is_an_edge(decls in declarations()) {
        let forest = analyze(&to_source(&decls)).forest;
        let total: usize = decls.iter().map(|(_, bases)| bases.len()).sum();
        prop_assert_eq!(forest.edge_count(), total);
        prop_assert_eq!(GraphExporter::new().export(&forest).edges.len(), total);
    }

    #[test]
    fn rendering_is_deterministic_and_terminates(decls in declarations()) {
        let forest = analyze(&to_source(&decls)).forest;
        let renderer = TreeRenderer::new();
        let first = renderer.render(&forest).unwrap();
        prop_assert_eq!(&first, &renderer.render(&forest).unwrap());
        for root in forest.roots() {
            let name = &forest.node(root).name;
            prop_assert!(first.lines().any(|line| line.ends_with(name.as_str())));
        }
    }

    #[test]
    fn scanner_never_panics(text in "\\PC{0,200}") {
        let _ = analyze(&text);
    }
}
