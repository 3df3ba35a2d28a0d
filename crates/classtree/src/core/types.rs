//! Core type definitions shared by the renderers
//!
//! Character sets for the console tree, the render configuration, and the
//! graph serialization formats.

use std::fmt;
use std::str::FromStr;

use super::ClassTreeError;

/// Character set for the console tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII connectors: `|-- `, `` `-- ``
    Ascii,
    /// Unicode box-drawing connectors: `├── `, `└── `
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// The four line fragments a tree printer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeChars {
    /// Connector before a sibling that has more siblings after it
    pub branch: &'static str,
    /// Connector before the last sibling
    pub last_branch: &'static str,
    /// Indentation under a sibling that has more siblings after it
    pub pipe: &'static str,
    /// Indentation under the last sibling
    pub blank: &'static str,
}

impl TreeChars {
    pub fn for_charset(charset: CharacterSet) -> Self {
        match charset {
            CharacterSet::Unicode => Self {
                branch: "├── ",
                last_branch: "└── ",
                pipe: "│   ",
                blank: "    ",
            },
            CharacterSet::Ascii => Self {
                branch: "|-- ",
                last_branch: "`-- ",
                pipe: "|   ",
                blank: "    ",
            },
        }
    }
}

/// Configuration for the console tree renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Append ` (inherits from: ...)` to the first print of multi-parent classes
    pub show_inheritance_note: bool,
    pub charset: CharacterSet,
}

impl RenderConfig {
    pub fn new(show_inheritance_note: bool, charset: CharacterSet) -> Self {
        Self {
            show_inheritance_note,
            charset,
        }
    }

    pub fn with_inheritance_note(mut self, show: bool) -> Self {
        self.show_inheritance_note = show;
        self
    }

    pub fn with_charset(mut self, charset: CharacterSet) -> Self {
        self.charset = charset;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_inheritance_note: true,
            charset: CharacterSet::default(),
        }
    }
}

/// Serialization format for graph exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum GraphFormat {
    /// Graphviz DOT source
    #[default]
    Dot,
    /// JSON `{ "vertices": [...], "edges": [[from, to], ...] }`
    Json,
}

impl GraphFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["dot", "json"]
    }
}

impl FromStr for GraphFormat {
    type Err = ClassTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(GraphFormat::Dot),
            "json" => Ok(GraphFormat::Json),
            _ => Err(ClassTreeError::invalid_option(format!(
                "Unknown graph format: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormat::Dot => write!(f, "dot"),
            GraphFormat::Json => write!(f, "json"),
        }
    }
}
