//! Error handling for the PAE application
//!
//! The engine reports [`GraphError`]; everything around it (graph files,
//! output) is folded into [`PaeError`].

use crate::graph::GraphError;
use thiserror::Error;

/// Main error type for PAE operations
#[derive(Error, Debug)]
pub enum PaeError {
    /// Errors raised while wiring or linking a graph
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Errors related to graph file loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PaeError>,
    },
}

impl PaeError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PaeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for PaeError {
    fn from(err: serde_json::Error) -> Self {
        PaeError::Serialization(err.to_string())
    }
}

/// Result type alias for PAE operations
pub type Result<T> = std::result::Result<T, PaeError>;
