//! Lockfile parser and graph construction
//!
//! [`LockfileParser`] owns a parsed lockfile plus an optional root package
//! identity and turns them into a [`DepGraph`] in two decoupled passes:
//! every pod becomes a node first, then edges are connected against the
//! complete node set. The split makes forward references (a pod depending on
//! one declared later in PODS) resolve regardless of declaration order.

use std::path::Path;

use crate::core::labels::node_labels_for;
use crate::core::lockfile::{Lockfile, PodEntry};
use crate::core::specifier::{parse_specifier, PkgInfo};
use crate::error::LockfileError;
use crate::graph::{DepGraph, DepGraphBuilder, PkgManager, ROOT_NODE_ID};

/// Fixed package-manager identifier recorded on every graph
const PKG_MANAGER_NAME: &str = "cocoapods";

/// Placeholder version paired with a directory-derived root package name
const ROOT_PLACEHOLDER_VERSION: &str = "0.0.0";

/// Parser for a single `Podfile.lock` document
#[derive(Debug, Clone)]
pub struct LockfileParser {
    lockfile: Lockfile,
    root_pkg: Option<PkgInfo>,
}

impl LockfileParser {
    /// Parse lockfile contents, with an optional root package identity
    /// override for the graph's root node.
    pub fn from_str(contents: &str, root_pkg: Option<PkgInfo>) -> Result<Self, LockfileError> {
        let lockfile = Lockfile::from_yaml(contents)?;
        Ok(Self { lockfile, root_pkg })
    }

    /// Read and parse a lockfile, blocking.
    ///
    /// The root package is named after the lockfile's containing directory,
    /// with a placeholder version.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LockfileError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| LockfileError::Io {
            path: path.to_path_buf(),
            error: err.to_string(),
        })?;
        let root_pkg = path
            .canonicalize()
            .ok()
            .and_then(|resolved| root_pkg_for_path(&resolved));
        Self::from_str(&contents, root_pkg)
    }

    /// Read and parse a lockfile without blocking.
    ///
    /// Feeds the same bytes through the same parse path as [`Self::from_file`];
    /// both forms produce structurally equal graphs for identical input.
    pub async fn from_file_async(path: impl AsRef<Path>) -> Result<Self, LockfileError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| LockfileError::Io {
                path: path.to_path_buf(),
                error: err.to_string(),
            })?;
        let root_pkg = tokio::fs::canonicalize(path)
            .await
            .ok()
            .and_then(|resolved| root_pkg_for_path(&resolved));
        Self::from_str(&contents, root_pkg)
    }

    /// The Podfile checksum recorded in the lockfile, when present.
    ///
    /// Not tracked by earlier CocoaPods releases.
    pub fn podfile_checksum(&self) -> Option<&str> {
        self.lockfile.podfile_checksum.as_deref()
    }

    /// The parsed lockfile document
    pub fn lockfile(&self) -> &Lockfile {
        &self.lockfile
    }

    /// Build the dependency graph for this lockfile.
    ///
    /// CocoaPods guarantees exactly one version per qualified pod name, so
    /// the qualified name doubles as the node ID.
    pub fn to_dep_graph(&self) -> Result<DepGraph, LockfileError> {
        let mut builder = DepGraphBuilder::new(self.pkg_manager(), self.root_pkg.clone());

        // Pass 1: one node per pod entry. Dependency lists are parsed now
        // but connected later, once the node set is complete.
        let mut all_deps: Vec<(String, Vec<PkgInfo>)> =
            Vec::with_capacity(self.lockfile.pods.len());
        for entry in &self.lockfile.pods {
            let pkg = parse_specifier(entry.specifier())?;
            let deps = match entry {
                PodEntry::Simple(_) => Vec::new(),
                PodEntry::WithDependencies { dependencies, .. } => dependencies
                    .iter()
                    .map(|line| parse_specifier(line))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            let labels = node_labels_for(&self.lockfile, &pkg.name);
            let node_id = pkg.name.clone();
            builder.add_pkg_node(pkg, &node_id, labels)?;
            all_deps.push((node_id, deps));
        }
        tracing::debug!("Added {} pod nodes", all_deps.len());

        // Pass 2: Podfile-declared dependencies hang off the root node.
        // These must resolve within PODS; a miss means the lockfile is
        // corrupt or hand-edited.
        for line in &self.lockfile.dependencies {
            let pkg = parse_specifier(line)?;
            if !builder.has_node(&pkg.name) {
                return Err(LockfileError::UnresolvedDependency { name: pkg.name });
            }
            builder.connect_dep(ROOT_NODE_ID, &pkg.name)?;
        }

        // Pass 3: transitive edges. A dependency without a node is a
        // platform-specific transitive that is not part of this resolution
        // (e.g. an iOS-only pod in a macOS-only integration) and produces
        // no edge.
        for (node_id, deps) in &all_deps {
            for dep in deps {
                if !builder.has_node(&dep.name) {
                    tracing::debug!("Skipping absent transitive '{}' of '{node_id}'", dep.name);
                    continue;
                }
                builder.connect_dep(node_id, &dep.name)?;
            }
        }

        Ok(builder.build())
    }

    fn pkg_manager(&self) -> PkgManager {
        PkgManager {
            name: PKG_MANAGER_NAME.to_string(),
            version: self.lockfile.cocoapods_version().to_string(),
            repositories: self.lockfile.repositories(),
        }
    }
}

/// Derive the root package identity from a resolved lockfile path: the
/// containing directory's name, paired with a placeholder version.
fn root_pkg_for_path(resolved: &Path) -> Option<PkgInfo> {
    let name = resolved.parent()?.file_name()?.to_str()?;
    Some(PkgInfo {
        name: name.to_string(),
        version: Some(ROOT_PLACEHOLDER_VERSION.to_string()),
    })
}
