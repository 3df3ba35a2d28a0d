//! Structural validation for inheritance forests
//!
//! Findings are warnings, never errors: analysis always continues.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, span, warn, Level};

use super::forest::InheritanceForest;

/// A non-fatal structural finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "class", rename_all = "snake_case")]
pub enum StructuralWarning {
    /// A base class that is never declared in the analyzed text
    UndefinedBase(String),
    /// A class declared more than once
    DuplicateClass(String),
}

impl StructuralWarning {
    /// The class the warning is about
    pub fn class_name(&self) -> &str {
        match self {
            StructuralWarning::UndefinedBase(name) | StructuralWarning::DuplicateClass(name) => {
                name
            }
        }
    }
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::UndefinedBase(name) => write!(
                f,
                "[Warning] Class '{}' is inherited from but not defined.",
                name
            ),
            StructuralWarning::DuplicateClass(name) => {
                write!(f, "[Warning] Duplicate class detected: '{}'", name)
            }
        }
    }
}

/// Checks a built forest for dangling base references
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Report every referenced base the forest never defines
    ///
    /// Warnings follow the forest's reference order. `declared` is the
    /// extractor's name set and never hides a warning. A dangling name found
    /// in it means the forest was built from other declarations, which is
    /// logged.
    pub fn validate(
        &self,
        forest: &InheritanceForest,
        declared: Option<&IndexSet<String>>,
    ) -> Vec<StructuralWarning> {
        let validate_span = span!(
            Level::INFO,
            "validate_forest",
            referenced = forest.referenced().len()
        );
        let _enter = validate_span.enter();

        let warnings: Vec<StructuralWarning> = forest
            .dangling_bases()
            .map(|name| {
                if declared.is_some_and(|set| set.contains(name)) {
                    warn!(class = name, "Declared name missing from forest definitions");
                }
                debug!(class = name, "Base class is never defined");
                StructuralWarning::UndefinedBase(name.to_string())
            })
            .collect();

        debug!(warnings = warnings.len(), "Validation completed");
        warnings
    }

    /// Turn the extractor's duplicate list into warnings
    pub fn duplicate_warnings(duplicates: &[String]) -> Vec<StructuralWarning> {
        duplicates
            .iter()
            .map(|name| StructuralWarning::DuplicateClass(name.clone()))
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
