//! Podlock - CocoaPods lockfile dependency graph parser
//!
//! This library converts a `Podfile.lock` document into an in-memory
//! dependency graph annotated with provenance metadata (checksums, spec
//! repositories, external sources, checkout options), for consumers such as
//! vulnerability scanners and license auditors.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`core`] - Specifier grammar, lockfile model, label extraction and
//!   graph construction
//! - [`graph`] - Dependency graph structure, equality and serialization
//! - [`error`] - Error types and handling
//!
//! # Example
//!
//! ```
//! use podlock::LockfileParser;
//!
//! let contents = "\
//! PODS:
//!   - Expecta (1.0.6)
//!
//! DEPENDENCIES:
//!   - Expecta
//! ";
//! let parser = LockfileParser::from_str(contents, None)?;
//! let graph = parser.to_dep_graph()?;
//! assert_eq!(graph.direct_deps(), vec!["Expecta"]);
//! # Ok::<(), podlock::LockfileError>(())
//! ```

pub mod core;
pub mod error;
pub mod graph;

#[cfg(test)]
pub mod test_utils;

pub use crate::core::lockfile::{CheckoutOptions, ExternalSourceInfo, Lockfile, PodEntry};
pub use crate::core::parser::LockfileParser;
pub use crate::core::specifier::{parse_specifier, root_spec_name, PkgInfo};
pub use crate::error::{FormatError, GraphError, LockfileError};
pub use crate::graph::{DepGraph, DepGraphBuilder, NodeLabels, PkgManager, ROOT_NODE_ID};
