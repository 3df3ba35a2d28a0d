//! Graph export
//!
//! Flattens a forest into vertices and directed base -> derived edges for an
//! external graph renderer. Parallel edges are kept and nothing is
//! validated.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, span, Level};

use super::forest::InheritanceForest;
use crate::core::{ClassTreeError, Database, GraphFormat, Renderer};

/// Vertices and edges of an inheritance graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    /// Every class name, in forest order
    pub vertices: Vec<String>,
    /// `(base, derived)` pairs, per node in forest order then per child
    pub edges: Vec<(String, String)>,
}

impl GraphExport {
    /// Graphviz DOT source, top to bottom
    pub fn to_dot(&self, title: &str) -> String {
        let mut dot = format!("// {}\ndigraph {{\n\trankdir=\"TB\"\n", title);
        for vertex in &self.vertices {
            dot.push('\t');
            dot.push_str(&quote_id(vertex));
            dot.push('\n');
        }
        for (from, to) in &self.edges {
            dot.push_str(&format!("\t{} -> {}\n", quote_id(from), quote_id(to)));
        }
        dot.push_str("}\n");
        dot
    }

    pub fn to_json(&self) -> Result<String, ClassTreeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ClassTreeError::export_error(e.to_string()))
    }

    /// Serialize in the given format
    pub fn to_format(&self, format: GraphFormat, title: &str) -> Result<String, ClassTreeError> {
        match format {
            GraphFormat::Dot => Ok(self.to_dot(title)),
            GraphFormat::Json => self.to_json(),
        }
    }
}

/// Quote a DOT identifier, escaping quotes and backslashes
fn quote_id(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Exports a forest as a [`GraphExport`]
pub struct GraphExporter;

impl GraphExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, forest: &InheritanceForest) -> GraphExport {
        let export_span = span!(Level::INFO, "export_graph", nodes = forest.node_count());
        let _enter = export_span.enter();

        let vertices: Vec<String> = forest.nodes().map(|node| node.name.clone()).collect();
        let edges: Vec<(String, String)> = forest
            .node_ids()
            .flat_map(|parent| {
                let parent_name = &forest.node(parent).name;
                forest
                    .children_of(parent)
                    .map(move |child| (parent_name.clone(), child.name.clone()))
            })
            .collect();

        debug!(vertices = vertices.len(), edges = edges.len(), "Graph exported");
        GraphExport { vertices, edges }
    }
}

impl Default for GraphExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<InheritanceForest> for GraphExporter {
    type Output = GraphExport;

    fn render(&self, database: &InheritanceForest) -> Result<GraphExport> {
        Ok(self.export(database))
    }

    fn name(&self) -> &'static str {
        "graph"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "edges"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::extractor::ClassDeclaration;

    fn forest(decls: &[(&str, &[&str])]) -> InheritanceForest {
        let decls: Vec<_> = decls
            .iter()
            .map(|(name, bases)| {
                ClassDeclaration::new(*name, bases.iter().map(|b| b.to_string()).collect())
            })
            .collect();
        InheritanceForest::from_declarations(&decls)
    }

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_vertices_and_edges_in_forest_order() {
        let f = forest(&[("D", &["B", "C"]), ("B", &["A"]), ("C", &["A"])]);
        let export = GraphExporter::new().export(&f);
        assert_eq!(export.vertices, vec!["D", "B", "C", "A"]);
        assert_eq!(
            export.edges,
            vec![pair("B", "D"), pair("C", "D"), pair("A", "B"), pair("A", "C")]
        );
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let export = GraphExporter::new().export(&forest(&[("A", &["B", "B"])]));
        assert_eq!(export.edges, vec![pair("B", "A"), pair("B", "A")]);
    }

    #[test]
    fn test_dot_output() {
        let export = GraphExporter::new().export(&forest(&[("A", &["B"])]));
        let dot = export.to_dot("C++ Inheritance Tree");
        assert_eq!(
            dot,
            "// C++ Inheritance Tree\ndigraph {\n\trankdir=\"TB\"\n\t\"A\"\n\t\"B\"\n\t\"B\" -> \"A\"\n}\n"
        );
    }

    #[test]
    fn test_dot_output_for_empty_graph() {
        let dot = GraphExport::default().to_dot("empty");
        assert_eq!(dot, "// empty\ndigraph {\n\trankdir=\"TB\"\n}\n");
    }

    #[test]
    fn test_dot_escapes_quotes() {
        assert_eq!(quote_id("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_id("Map<K"), "\"Map<K\"");
    }

    #[test]
    fn test_json_output() {
        let export = GraphExporter::new().export(&forest(&[("A", &["B"])]));
        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(value["vertices"], serde_json::json!(["A", "B"]));
        assert_eq!(value["edges"], serde_json::json!([["B", "A"]]));
    }

    #[test]
    fn test_export_is_repeatable() {
        let f = forest(&[("A", &["B"]), ("C", &["B"])]);
        let exporter = GraphExporter::new();
        assert_eq!(exporter.export(&f), exporter.export(&f));
    }
}
