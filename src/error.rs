//! Error handling for the collective disambiguation engine
//!
//! Error taxonomy:
//! - [`LookupError::NotFound`] is expected per mention and recovered by the
//!   gatherer as an empty candidate list.
//! - [`LookupError::Unavailable`] and [`GraphError`] are infrastructure
//!   failures; they surface as [`DisambiguationError::SearchInfrastructure`]
//!   and abort the request.
//! - An empty relevance subgraph is not an error at all.
//! - Bad input and bad configuration are rejected before any lookup.

use thiserror::Error;

/// Main error type returned by the disambiguation API
#[derive(Error, Debug)]
pub enum DisambiguationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Misconfiguration: {0}")]
    Misconfiguration(String),

    #[error("Search infrastructure error: {0}")]
    SearchInfrastructure(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DisambiguationError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Errors reported by a candidate lookup service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No candidates known for surface form '{surface_form}'")]
    NotFound { surface_form: String },

    #[error("Candidate lookup unavailable: {message}")]
    Unavailable { message: String },
}

impl From<LookupError> for DisambiguationError {
    fn from(error: LookupError) -> Self {
        DisambiguationError::SearchInfrastructure(error.to_string())
    }
}

/// Errors reported by a knowledge graph store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Knowledge graph unavailable: {message}")]
    Unavailable { message: String },

    #[error("Vertex not found for '{uri}'")]
    VertexNotFound { uri: String },
}

impl From<GraphError> for DisambiguationError {
    fn from(error: GraphError) -> Self {
        DisambiguationError::SearchInfrastructure(error.to_string())
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown filter stage '{0}' (expected min_support, best_k_support or best_k_prior)")]
    UnknownStage(String),

    #[error("Unknown URI decoding '{0}' (expected percent, selective or none)")]
    UnknownDecoding(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, DisambiguationError>;
