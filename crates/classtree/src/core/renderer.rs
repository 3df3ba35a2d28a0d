//! Core renderer trait for class graph output
//!
//! This trait defines the interface for turning a built database into
//! some output: console text, an edge list, and so on.

use anyhow::Result;

use super::Database;

/// Core trait for renderers
///
/// Renderers only read the database. Rendering the same database twice must
/// produce the same output.
///
/// # Example
/// ```
/// use classtree::core::Renderer;
/// use classtree::inheritance::{InheritanceForest, TreeRenderer};
///
/// let forest = InheritanceForest::new();
/// let renderer = TreeRenderer::new();
/// let output = renderer.render(&forest).unwrap();
/// assert!(output.is_empty());
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the produced output format
    fn format(&self) -> &'static str;
}
