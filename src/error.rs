//! Error types for podlock
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Specifier grammar errors
///
/// Raised when a single dependency line does not match the
/// `name` / `name (payload)` grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No package name could be extracted from the line
    #[error("Specifier '{line}' has no package name")]
    MissingName { line: String },

    /// The parenthesized version payload is empty
    #[error("Specifier '{line}' has an empty version payload")]
    EmptyVersion { line: String },
}

/// Lockfile parsing and graph construction errors
#[derive(Error, Debug)]
pub enum LockfileError {
    /// Malformed YAML source; the message carries the deserializer's
    /// line/column description verbatim
    #[error("Failed to parse lockfile: {message}")]
    Parse { message: String },

    /// IO error while reading a lockfile
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// A specifier line did not match the grammar
    #[error(transparent)]
    Specifier(#[from] FormatError),

    /// A manifest-declared dependency is missing from the PODS section.
    /// Unlike a missing transitive, this indicates a corrupt or
    /// hand-edited lockfile.
    #[error("Dependency '{name}' is declared in DEPENDENCIES but missing from PODS")]
    UnresolvedDependency { name: String },

    /// Graph construction failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl From<serde_yaml::Error> for LockfileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Dependency graph construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node with this ID was already added
    #[error("Node '{node_id}' already exists in the graph")]
    DuplicateNode { node_id: String },

    /// An edge endpoint refers to a node that was never added
    #[error("Node '{node_id}' does not exist in the graph")]
    UnknownNode { node_id: String },
}
