//! Inheritance forest
//!
//! Stores one node per class name and the base -> derived edges between
//! them. Nodes live in an insertion-ordered arena keyed by name and refer to
//! each other through [`NodeId`] indices.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, span, trace, Level};

use super::extractor::ClassDeclaration;
use crate::core::Database;

/// Index of a node inside its [`InheritanceForest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One class identity in the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    /// Derived classes, in the order their declarations were seen
    pub children: Vec<NodeId>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

/// A base -> derived edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inheritance {
    pub base: NodeId,
    pub derived: NodeId,
}

/// All classes and inheritance edges of one analysis run
///
/// Usually a tree per root, but a class with several bases sits under each
/// of them, so it is a forest of DAG-shaped components in general.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InheritanceForest {
    nodes: IndexMap<String, ClassNode>,
    edges: Vec<Inheritance>,
    defined: IndexSet<String>,
    referenced: IndexSet<String>,
}

impl InheritanceForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from extracted declarations
    pub fn from_declarations(declarations: &[ClassDeclaration]) -> Self {
        ForestBuilder::new().build(declarations)
    }

    /// Get the node for `name`, creating it if this is its first mention
    pub fn get_or_create_node(&mut self, name: &str) -> NodeId {
        if let Some(index) = self.nodes.get_index_of(name) {
            return NodeId(index);
        }
        let (index, _) = self
            .nodes
            .insert_full(name.to_string(), ClassNode::new(name));
        trace!(name, index, "Created node");
        NodeId(index)
    }

    /// Record `name` as declared and return its node
    pub fn define(&mut self, name: &str) -> NodeId {
        self.defined.insert(name.to_string());
        self.get_or_create_node(name)
    }

    /// Record that `derived` inherits from the class named `base`
    ///
    /// Every call adds an edge, so a base listed twice yields two edges.
    pub fn inherit(&mut self, base: &str, derived: NodeId) -> NodeId {
        self.referenced.insert(base.to_string());
        let base_id = self.get_or_create_node(base);
        self.nodes[base_id.0].children.push(derived);
        self.edges.push(Inheritance {
            base: base_id,
            derived,
        });
        base_id
    }

    /// Get a node by id
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this forest.
    pub fn node(&self, id: NodeId) -> &ClassNode {
        &self.nodes[id.0]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name).map(NodeId)
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Derived classes of `id`, in edge order
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &ClassNode> + '_ {
        self.node(id).children.iter().map(|child| self.node(*child))
    }

    /// Names of the classes deriving from `name`; empty for unknown names
    pub fn child_names(&self, name: &str) -> Vec<&str> {
        match self.node_id(name) {
            Some(id) => self.children_of(id).map(|c| c.name.as_str()).collect(),
            None => Vec::new(),
        }
    }

    pub fn defined(&self) -> &IndexSet<String> {
        &self.defined
    }

    pub fn referenced(&self) -> &IndexSet<String> {
        &self.referenced
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains(name)
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }

    /// Nodes that never appear as anyone's child, in insertion order
    pub fn roots(&self) -> Vec<NodeId> {
        let mut has_parent = vec![false; self.nodes.len()];
        for node in self.nodes.values() {
            for child in &node.children {
                has_parent[child.0] = true;
            }
        }
        self.node_ids().filter(|id| !has_parent[id.0]).collect()
    }

    /// Incoming edges of every node, indexed by node
    ///
    /// Parents are collected by scanning nodes in insertion order and each
    /// node's children in order, so a duplicated edge lists its parent twice.
    pub fn parent_map(&self) -> Vec<Vec<NodeId>> {
        let mut parents = vec![Vec::new(); self.nodes.len()];
        for parent in self.node_ids() {
            for child in &self.node(parent).children {
                parents[child.0].push(parent);
            }
        }
        parents
    }

    /// Parents of a single node, in the same order as [`Self::parent_map`]
    pub fn parents_of(&self, id: NodeId) -> Vec<NodeId> {
        self.node_ids()
            .flat_map(|parent| {
                self.node(parent)
                    .children
                    .iter()
                    .filter(move |child| **child == id)
                    .map(move |_| parent)
            })
            .collect()
    }

    /// Referenced names that were never declared
    pub fn dangling_bases(&self) -> impl Iterator<Item = &str> + '_ {
        self.referenced
            .iter()
            .filter(|name| !self.defined.contains(name.as_str()))
            .map(|name| name.as_str())
    }
}

impl Database for InheritanceForest {
    type Node = ClassNode;
    type Edge = Inheritance;

    fn get_node(&self, name: &str) -> Option<&Self::Node> {
        self.nodes.get(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.nodes.values()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.edges.iter()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Builds an [`InheritanceForest`] from declarations in a single pass
///
/// Node creation is keyed by name, so a base used before its own
/// declaration resolves to the same node once that declaration is reached.
pub struct ForestBuilder;

impl ForestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, declarations: &[ClassDeclaration]) -> InheritanceForest {
        let build_span = span!(Level::INFO, "build_forest", declarations = declarations.len());
        let _enter = build_span.enter();

        let mut forest = InheritanceForest::new();
        for declaration in declarations {
            let derived = forest.define(&declaration.name);
            for base in &declaration.bases {
                forest.inherit(base, derived);
            }
        }

        debug!(
            nodes = forest.node_count(),
            edges = forest.edge_count(),
            defined = forest.defined.len(),
            referenced = forest.referenced.len(),
            "Forest built"
        );
        forest
    }
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
