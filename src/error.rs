//! Error types for searches and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::cell::CellId;

/// Reasons a search request is rejected before any cell is explored. Running out of frontier
/// or being cancelled are ordinary [PathResult](crate::PathResult) values, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The request is incomplete, e.g. no start or end cell has been placed.
    #[error("Invalid search request: {0}")]
    InvalidRequest(&'static str),

    /// A start or end cell lies outside the grid.
    #[error("Cell {0} is outside the grid")]
    OutOfBounds(CellId),

    /// A start or end cell is a barrier.
    #[error("Cell {0} is blocked")]
    Blocked(CellId),

    /// Blocked cells changed since adjacency was last recomputed.
    #[error("Adjacency is stale, call recompute_adjacency before searching")]
    StaleAdjacency,
}

/// Result type for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading the configuration file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [Config](crate::Config).
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but cannot describe a grid.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
