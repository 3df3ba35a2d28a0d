//! Class inheritance analysis
//!
//! The pipeline runs one way:
//! text -> [`DeclarationExtractor`] -> [`ForestBuilder`] -> [`Validator`],
//! and the built forest feeds both [`TreeRenderer`] and [`GraphExporter`].

mod extractor;
mod forest;
mod graph;
mod renderer;
mod validator;

pub use extractor::{split_base_list, ClassDeclaration, DeclarationExtractor, Extraction};
pub use forest::{ClassNode, ForestBuilder, Inheritance, InheritanceForest, NodeId};
pub use graph::{GraphExport, GraphExporter};
pub use renderer::TreeRenderer;
pub use validator::{StructuralWarning, Validator};
