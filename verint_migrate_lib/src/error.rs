//! Error types for the extraction layer.

use std::fmt;

/// Errors that abort an extraction pass.
///
/// Per-node and per-employee enrichment failures never surface here; they
/// are recovered and recorded in [`crate::attempt::Diagnostics`].
#[derive(Debug)]
pub enum MigrateError {
    /// A fatal API failure (signing configuration, or a top-level listing call).
    Api(verint_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// A node sits deeper than the fixed number of level columns.
    HierarchyTooDeep { id: String, depth: usize },
    /// Required configuration is missing or malformed.
    Config(String),
    /// Writing a diagnostic dump or report failed.
    Io(std::io::Error),
}

impl fmt::Display for MigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::HierarchyTooDeep { id, depth } => write!(
                f,
                "Hierarchy too deep: node {} is at level {} but only {} level columns exist",
                id,
                depth + 1,
                crate::hierarchy::LEVEL_COLUMNS
            ),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for MigrateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<verint_api::Error> for MigrateError {
    fn from(e: verint_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for MigrateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<std::io::Error> for MigrateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
