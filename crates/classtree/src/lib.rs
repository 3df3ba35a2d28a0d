//! Classtree - Reconstruct C++ class hierarchies from source text
//!
//! A library for scanning C++-like source for class declarations, building
//! the inheritance forest they describe, and reporting it as a console tree
//! or a graph export.
//!
//! # Quick Start
//!
//! ```rust
//! use classtree::render_tree;
//!
//! let source = "class Animal {}; class Dog : public Animal {};";
//! let tree = render_tree(source).unwrap();
//! assert_eq!(tree, "└── Animal\n    └── Dog");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use classtree::prelude::*;
//!
//! let source = "class A {}; class B : A {}; class C : A {}; class D : B, C {};";
//!
//! // Extract declarations
//! let extraction = DeclarationExtractor::new().extract(source);
//! assert_eq!(extraction.declarations.len(), 4);
//!
//! // Build the forest
//! let forest = ForestBuilder::new().build(&extraction.declarations);
//! assert_eq!(forest.child_names("A"), vec!["B", "C"]);
//!
//! // Validate and render
//! assert!(Validator::new().validate(&forest, None).is_empty());
//! let tree = TreeRenderer::new().render(&forest).unwrap();
//! assert!(tree.contains("D (inherits from: B, C)"));
//! ```

pub mod core;
pub mod inheritance;
pub mod sources;

pub use core::*;

use serde::Serialize;
use tracing::info;

use crate::inheritance::{
    DeclarationExtractor, Extraction, ForestBuilder, GraphExport, GraphExporter,
    InheritanceForest, StructuralWarning, TreeRenderer, Validator,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, ClassTreeError, Database, GraphFormat, RenderConfig, Renderer,
    };
    pub use crate::inheritance::{
        ClassDeclaration, DeclarationExtractor, Extraction, ForestBuilder, GraphExport,
        GraphExporter, InheritanceForest, StructuralWarning, TreeRenderer, Validator,
    };
    pub use crate::{analyze, Analysis};
}

/// Everything one analysis run produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub extraction: Extraction,
    pub forest: InheritanceForest,
    /// Undefined-base warnings first, then duplicate-class warnings
    pub warnings: Vec<StructuralWarning>,
}

impl Analysis {
    /// Warnings from the validator only, without duplicates
    pub fn validation_warnings(&self) -> impl Iterator<Item = &StructuralWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, StructuralWarning::UndefinedBase(_)))
    }

    /// Names declared more than once
    pub fn duplicates(&self) -> &[String] {
        &self.extraction.duplicates
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Summary suitable for JSON output
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            classes: self.extraction.declared.iter().cloned().collect(),
            roots: self
                .forest
                .roots()
                .into_iter()
                .map(|id| self.forest.node(id).name.clone())
                .collect(),
            duplicates: self.extraction.duplicates.clone(),
            warnings: self.warnings.clone(),
            messages: self.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Serializable summary of an [`Analysis`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub classes: Vec<String>,
    pub roots: Vec<String>,
    pub duplicates: Vec<String>,
    pub warnings: Vec<StructuralWarning>,
    pub messages: Vec<String>,
}

/// Run extraction, forest building and validation over `source`
///
/// Never fails. Text without class declarations gives an empty analysis.
///
/// # Example
/// ```rust
/// use classtree::analyze;
///
/// let analysis = analyze("class A : public B {};");
/// assert_eq!(analysis.forest.child_names("B"), vec!["A"]);
/// assert_eq!(
///     analysis.warnings[0].to_string(),
///     "[Warning] Class 'B' is inherited from but not defined."
/// );
/// ```
pub fn analyze(source: &str) -> Analysis {
    let extraction = DeclarationExtractor::new().extract(source);
    let forest = ForestBuilder::new().build(&extraction.declarations);

    let mut warnings = Validator::new().validate(&forest, Some(&extraction.declared));
    warnings.extend(Validator::duplicate_warnings(&extraction.duplicates));

    info!(
        classes = extraction.declared.len(),
        nodes = forest.node_count(),
        warnings = warnings.len(),
        "Analysis completed"
    );

    Analysis {
        extraction,
        forest,
        warnings,
    }
}

/// Render the inheritance tree of `source` with default settings
///
/// # Example
/// ```rust
/// use classtree::render_tree;
///
/// let tree = render_tree("class B {}; class A : B {};").unwrap();
/// assert_eq!(tree, "└── B\n    └── A");
/// ```
pub fn render_tree(source: &str) -> anyhow::Result<String> {
    render_tree_with_config(source, RenderConfig::default())
}

/// Render the inheritance tree of `source` with a specific configuration
///
/// # Example
/// ```rust
/// use classtree::{render_tree_with_config, CharacterSet, RenderConfig};
///
/// let config = RenderConfig::default().with_charset(CharacterSet::Ascii);
/// let tree = render_tree_with_config("class B {}; class A : B {};", config).unwrap();
/// assert_eq!(tree, "`-- B\n    `-- A");
/// ```
pub fn render_tree_with_config(source: &str, config: RenderConfig) -> anyhow::Result<String> {
    let analysis = analyze(source);
    TreeRenderer::with_config(config).render(&analysis.forest)
}

/// Export the inheritance graph of `source`
///
/// # Example
/// ```rust
/// use classtree::export_graph;
///
/// let graph = export_graph("class A : B {};");
/// assert_eq!(graph.vertices, vec!["A", "B"]);
/// assert_eq!(graph.edges, vec![("B".to_string(), "A".to_string())]);
/// ```
pub fn export_graph(source: &str) -> GraphExport {
    GraphExporter::new().export(&analyze(source).forest)
}
