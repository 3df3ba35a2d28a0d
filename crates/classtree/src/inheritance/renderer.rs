//! Console tree renderer
//!
//! Prints one depth-first tree per root using box-drawing connectors. A
//! class with several bases is printed under each of them; only its first
//! printed occurrence in the whole output carries the
//! ` (inherits from: ...)` note.

use anyhow::Result;
use tracing::{debug, span, trace, warn, Level};

use super::forest::{InheritanceForest, NodeId};
use crate::core::{Database, RenderConfig, Renderer, TreeChars};

/// Marker printed after a class that already appears on the current path
const CYCLE_MARKER: &str = " (cycle)";

/// Console tree renderer
pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the forest as a list of lines
    pub fn render_lines(&self, forest: &InheritanceForest) -> Vec<String> {
        let render_span = span!(
            Level::INFO,
            "render_tree",
            notes = self.config.show_inheritance_note
        );
        let _enter = render_span.enter();

        let roots = forest.roots();
        let mut state = TraversalState {
            forest,
            chars: TreeChars::for_charset(self.config.charset),
            show_note: self.config.show_inheritance_note,
            parents: forest.parent_map(),
            printed: vec![false; forest.node_count()],
            on_path: vec![false; forest.node_count()],
            lines: Vec::new(),
        };

        for (i, root) in roots.iter().enumerate() {
            state.visit(*root, "", i + 1 == roots.len());
        }

        debug!(roots = roots.len(), lines = state.lines.len(), "Tree rendered");
        state.lines
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<InheritanceForest> for TreeRenderer {
    type Output = String;

    fn render(&self, database: &InheritanceForest) -> Result<String> {
        Ok(self.render_lines(database).join("\n"))
    }

    fn name(&self) -> &'static str {
        "tree"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}

/// Mutable state threaded through one whole rendering pass
///
/// `printed` spans every root so a class is annotated once per output, not
/// once per subtree.
struct TraversalState<'a> {
    forest: &'a InheritanceForest,
    chars: TreeChars,
    show_note: bool,
    parents: Vec<Vec<NodeId>>,
    printed: Vec<bool>,
    on_path: Vec<bool>,
    lines: Vec<String>,
}

impl TraversalState<'_> {
    fn visit(&mut self, id: NodeId, prefix: &str, is_last: bool) {
        let forest = self.forest;
        let node = forest.node(id);
        let connector = if is_last {
            self.chars.last_branch
        } else {
            self.chars.branch
        };

        let mut line = format!("{}{}{}", prefix, connector, node.name);

        if self.show_note && !self.printed[id.index()] {
            let parents = &self.parents[id.index()];
            if parents.len() > 1 {
                let names: Vec<&str> = parents
                    .iter()
                    .map(|p| forest.node(*p).name.as_str())
                    .collect();
                line.push_str(&format!(" (inherits from: {})", names.join(", ")));
            }
        }
        self.printed[id.index()] = true;

        if self.on_path[id.index()] {
            warn!(class = %node.name, "Inheritance cycle, not descending");
            line.push_str(CYCLE_MARKER);
            self.lines.push(line);
            return;
        }

        trace!(class = %node.name, depth = prefix.chars().count() / 4, "Visiting");
        self.lines.push(line);

        let child_prefix = format!(
            "{}{}",
            prefix,
            if is_last {
                self.chars.blank
            } else {
                self.chars.pipe
            }
        );

        self.on_path[id.index()] = true;
        let children = &node.children;
        for (i, child) in children.iter().enumerate() {
            self.visit(*child, &child_prefix, i + 1 == children.len());
        }
        self.on_path[id.index()] = false;
    }
}
