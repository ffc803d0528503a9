//! Dependency graph structure
//!
//! A thin wrapper around [`petgraph::stable_graph::StableDiGraph`] that keys
//! nodes by package ID, attaches provenance labels, and adds the semantics a
//! scan result needs: a synthetic root node, a package-manager descriptor,
//! order-independent structural equality, and a portable serialized form.
//!
//! Graphs are produced through [`DepGraphBuilder`] and immutable afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::specifier::PkgInfo;
use crate::error::GraphError;

/// Node ID of the synthetic root node
pub const ROOT_NODE_ID: &str = "root-node";

/// Name given to the root package when the caller supplies none
const DEFAULT_ROOT_NAME: &str = "_root";

/// Placeholder version for the default root package
const DEFAULT_ROOT_VERSION: &str = "0.0.0";

/// Per-node provenance labels (insert-only, resolved values exclusively)
pub type NodeLabels = BTreeMap<String, String>;

/// Descriptor of the package manager that produced the resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkgManager {
    /// Package manager identifier, e.g. `cocoapods`
    pub name: String,

    /// Version of the tool that wrote the document
    pub version: String,

    /// Aliases of the spec repositories in use
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
}

/// Payload carried by every graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Package name and version
    pub pkg: PkgInfo,

    /// Provenance labels; empty for the root node
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: NodeLabels,
}

/// Builder producing an immutable [`DepGraph`]
///
/// The root node is created up front; package nodes must all be added before
/// edges referring to them.
#[derive(Debug)]
pub struct DepGraphBuilder {
    pkg_manager: PkgManager,
    graph: StableDiGraph<NodeData, ()>,
    index: HashMap<String, NodeIndex>,
}

impl DepGraphBuilder {
    /// Create a builder with the given package-manager descriptor and an
    /// optional root package identity.
    pub fn new(pkg_manager: PkgManager, root_pkg: Option<PkgInfo>) -> Self {
        let root_pkg = root_pkg.unwrap_or_else(|| PkgInfo {
            name: DEFAULT_ROOT_NAME.to_string(),
            version: Some(DEFAULT_ROOT_VERSION.to_string()),
        });
        let mut graph = StableDiGraph::new();
        let mut index = HashMap::new();
        let root_index = graph.add_node(NodeData {
            pkg: root_pkg,
            labels: NodeLabels::new(),
        });
        index.insert(ROOT_NODE_ID.to_string(), root_index);
        Self {
            pkg_manager,
            graph,
            index,
        }
    }

    /// Node ID of the synthetic root node
    pub fn root_node_id(&self) -> &'static str {
        ROOT_NODE_ID
    }

    /// Whether a node with this ID has been added
    pub fn has_node(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    /// Add a package node under the given node ID.
    pub fn add_pkg_node(
        &mut self,
        pkg: PkgInfo,
        node_id: &str,
        labels: NodeLabels,
    ) -> Result<(), GraphError> {
        if self.index.contains_key(node_id) {
            return Err(GraphError::DuplicateNode {
                node_id: node_id.to_string(),
            });
        }
        let index = self.graph.add_node(NodeData { pkg, labels });
        self.index.insert(node_id.to_string(), index);
        Ok(())
    }

    /// Connect a dependency edge between two existing nodes.
    ///
    /// Connecting the same pair twice is a no-op.
    pub fn connect_dep(&mut self, from_id: &str, to_id: &str) -> Result<(), GraphError> {
        let from = self.node_index(from_id)?;
        let to = self.node_index(to_id)?;
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
        Ok(())
    }

    /// Finish building and hand out the immutable graph.
    pub fn build(self) -> DepGraph {
        DepGraph {
            pkg_manager: self.pkg_manager,
            graph: self.graph,
            index: self.index,
        }
    }

    fn node_index(&self, node_id: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(node_id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode {
                node_id: node_id.to_string(),
            })
    }
}

/// An immutable dependency graph with provenance labels
#[derive(Debug, Clone)]
pub struct DepGraph {
    pkg_manager: PkgManager,
    graph: StableDiGraph<NodeData, ()>,
    index: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// The package-manager descriptor recorded at build time
    pub fn pkg_manager(&self) -> &PkgManager {
        &self.pkg_manager
    }

    /// Identity of the root package
    pub fn root_pkg(&self) -> &PkgInfo {
        &self
            .node(ROOT_NODE_ID)
            .expect("a dep graph always has a root node")
            .pkg
    }

    /// Number of nodes, including the synthetic root
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Node payload for a node ID
    pub fn node(&self, node_id: &str) -> Option<&NodeData> {
        self.index.get(node_id).map(|index| &self.graph[*index])
    }

    /// IDs of all package nodes (the root excluded), sorted
    pub fn pkg_node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .index
            .keys()
            .map(String::as_str)
            .filter(|id| *id != ROOT_NODE_ID)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Node IDs a node depends on, sorted; `None` for an unknown node
    pub fn deps_of(&self, node_id: &str) -> Option<Vec<&str>> {
        let index = *self.index.get(node_id)?;
        let reverse = self.reverse_index();
        let mut deps: Vec<&str> = self
            .graph
            .neighbors(index)
            .filter_map(|neighbor| reverse.get(&neighbor).copied())
            .collect();
        deps.sort_unstable();
        Some(deps)
    }

    /// Node IDs connected directly to the root
    pub fn direct_deps(&self) -> Vec<&str> {
        self.deps_of(ROOT_NODE_ID).unwrap_or_default()
    }

    /// Structural equality, independent of insertion order.
    ///
    /// Compares the package-manager descriptor, the package node set (IDs,
    /// package infos, labels) and the edge set. The root package identity is
    /// only compared when `compare_root` is set.
    pub fn equals(&self, other: &Self, compare_root: bool) -> bool {
        if self.pkg_manager != other.pkg_manager {
            return false;
        }
        if compare_root && self.root_pkg() != other.root_pkg() {
            return false;
        }
        self.pkg_node_map() == other.pkg_node_map() && self.edge_set() == other.edge_set()
    }

    fn reverse_index(&self) -> HashMap<NodeIndex, &str> {
        self.index
            .iter()
            .map(|(id, index)| (*index, id.as_str()))
            .collect()
    }

    fn pkg_node_map(&self) -> BTreeMap<&str, &NodeData> {
        self.index
            .iter()
            .filter(|(id, _)| id.as_str() != ROOT_NODE_ID)
            .map(|(id, index)| (id.as_str(), &self.graph[*index]))
            .collect()
    }

    fn edge_set(&self) -> BTreeSet<(&str, &str)> {
        let reverse = self.reverse_index();
        self.graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .filter_map(|(from, to)| {
                Some((*reverse.get(&from)?, *reverse.get(&to)?))
            })
            .collect()
    }

    fn to_graph_data(&self) -> GraphData {
        let mut nodes = Vec::with_capacity(self.node_count());
        let mut push_record = |node_id: &str| {
            if let Some(data) = self.node(node_id) {
                nodes.push(NodeRecord {
                    node_id: node_id.to_string(),
                    pkg: data.pkg.clone(),
                    labels: data.labels.clone(),
                    deps: self
                        .deps_of(node_id)
                        .unwrap_or_default()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                });
            }
        };
        push_record(ROOT_NODE_ID);
        for node_id in self.pkg_node_ids() {
            push_record(node_id);
        }
        GraphData {
            pkg_manager: self.pkg_manager.clone(),
            root_node_id: ROOT_NODE_ID.to_string(),
            nodes,
        }
    }
}

impl PartialEq for DepGraph {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, true)
    }
}

/// Portable tree representation of a [`DepGraph`]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphData {
    pkg_manager: PkgManager,
    root_node_id: String,
    nodes: Vec<NodeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    node_id: String,
    pkg: PkgInfo,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    labels: NodeLabels,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    deps: Vec<String>,
}

impl TryFrom<GraphData> for DepGraph {
    type Error = GraphError;

    fn try_from(data: GraphData) -> Result<Self, GraphError> {
        let root_pkg = data
            .nodes
            .iter()
            .find(|record| record.node_id == data.root_node_id)
            .map(|record| record.pkg.clone())
            .ok_or_else(|| GraphError::UnknownNode {
                node_id: data.root_node_id.clone(),
            })?;
        let mut builder = DepGraphBuilder::new(data.pkg_manager.clone(), Some(root_pkg));
        for record in &data.nodes {
            if record.node_id == data.root_node_id {
                continue;
            }
            builder.add_pkg_node(record.pkg.clone(), &record.node_id, record.labels.clone())?;
        }
        for record in &data.nodes {
            let from_id = if record.node_id == data.root_node_id {
                ROOT_NODE_ID
            } else {
                record.node_id.as_str()
            };
            for dep in &record.deps {
                builder.connect_dep(from_id, dep)?;
            }
        }
        Ok(builder.build())
    }
}

impl Serialize for DepGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_graph_data().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DepGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = GraphData::deserialize(deserializer)?;
        Self::try_from(data).map_err(serde::de::Error::custom)
    }
}
