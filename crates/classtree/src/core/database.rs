//! Core database trait for class graph storage
//!
//! This trait defines the read-side interface shared by everything that
//! consumes a built class graph: the validator and both renderers.

/// Core trait for class graph databases
///
/// A database owns every node of one analysis run. Nodes are addressed by
/// their name; edges are yielded in the order they were recorded.
///
/// The associated types let an implementation choose its own node and edge
/// structures.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Get a node by name
    fn get_node(&self, name: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in recording order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// True when the database holds no nodes
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
