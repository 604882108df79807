//! Graph loading
//!
//! [`GraphStore`] parses a graph description file into the immutable
//! [`Graph`] model. Two serializations are understood:
//! - GraphML (`.graphml`, `.xml`)
//! - node-link JSON (`.json`), the layout written by [`crate::export`]
//!
//! Loading cost is proportional to file size. Callers that analyze the same
//! file repeatedly should go through [`crate::cache::GraphCache`].

pub mod graphml;
pub mod node_link;

use crate::graph::{Graph, GraphError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while loading a graph file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Graph file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot detect the graph format of {0}")]
    UnsupportedFormat(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Structural problem found by a format parser
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct FormatError(String);

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        FormatError(message.into())
    }
}

impl From<GraphError> for FormatError {
    fn from(err: GraphError) -> Self {
        FormatError(err.to_string())
    }
}

/// Output of a format parser
#[derive(Debug)]
pub struct Parsed {
    pub graph: Graph,
    /// Repeated `(source, target)` pairs dropped while building
    pub duplicate_edges: usize,
}

/// Supported graph serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    GraphMl,
    NodeLinkJson,
}

impl GraphFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "graphml" | "xml" => Some(GraphFormat::GraphMl),
            "json" => Some(GraphFormat::NodeLinkJson),
            _ => None,
        }
    }

    /// Guess the format from the first non-whitespace character
    pub fn sniff(text: &str) -> Option<Self> {
        match text.trim_start().chars().next()? {
            '<' => Some(GraphFormat::GraphMl),
            '{' => Some(GraphFormat::NodeLinkJson),
            _ => None,
        }
    }

    fn parse(self, text: &str) -> Result<Parsed, FormatError> {
        match self {
            GraphFormat::GraphMl => graphml::parse(text),
            GraphFormat::NodeLinkJson => node_link::parse(text),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormat::GraphMl => write!(f, "GraphML"),
            GraphFormat::NodeLinkJson => write!(f, "node-link JSON"),
        }
    }
}

/// Loads and holds the immutable base graph
///
/// No mutation API is exposed; the graph can be borrowed or shared as an
/// `Arc` with any number of concurrent analyses.
#[derive(Debug, Clone)]
pub struct GraphStore {
    graph: Arc<Graph>,
}

impl GraphStore {
    /// Load a graph file, detecting its format
    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::FileNotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        let label = path.display().to_string();
        let format = GraphFormat::from_path(path)
            .or_else(|| GraphFormat::sniff(&text))
            .ok_or_else(|| LoadError::UnsupportedFormat(label.clone()))?;

        Self::parse_labeled(&text, format, &label)
    }

    /// Parse an in-memory graph description
    pub fn from_text(text: &str, format: GraphFormat) -> LoadResult<Self> {
        Self::parse_labeled(text, format, "<memory>")
    }

    fn parse_labeled(text: &str, format: GraphFormat, label: &str) -> LoadResult<Self> {
        debug!("Parsing {} as {}", label, format);

        let parsed = format.parse(text).map_err(|err| LoadError::Parse {
            path: label.to_string(),
            message: err.to_string(),
        })?;

        if parsed.duplicate_edges > 0 {
            warn!(
                "Dropped {} parallel edges while loading {}",
                parsed.duplicate_edges, label
            );
        }
        info!(
            "Loaded {} with {} nodes and {} edges",
            label,
            parsed.graph.node_count(),
            parsed.graph.edge_count()
        );

        Ok(Self {
            graph: Arc::new(parsed.graph),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Shared handle to the base graph
    pub fn shared(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub fn into_shared(self) -> Arc<Graph> {
        self.graph
    }
}
