//! Crate-wide error type

use crate::config::ConfigError;
use crate::graph::GraphError;
use crate::loader::LoadError;
use crate::selection::SelectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphLensError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphLensError>;
