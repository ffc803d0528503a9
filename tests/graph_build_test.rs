//! Integration tests for dependency graph construction
//!
//! Covers the two-pass build: node identity by qualified name, root edges
//! for Podfile-declared dependencies, transitive edges, and the policy
//! split between benign missing transitives and unresolved declared
//! dependencies.

mod common;

use common::{FULL_LOCKFILE, LEGACY_LOCKFILE};
use podlock::{LockfileError, LockfileParser, ROOT_NODE_ID};

#[test]
fn builds_two_node_graph_with_root_and_transitive_edges() {
    let contents = "\
PODS:
  - A (1.0):
      - B (1.0)
  - B (1.0)

DEPENDENCIES:
  - A (1.0)
";
    let graph = LockfileParser::from_str(contents, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();

    assert_eq!(graph.pkg_node_ids(), vec!["A", "B"]);
    assert_eq!(graph.direct_deps(), vec!["A"]);
    assert_eq!(graph.deps_of("A").unwrap(), vec!["B"]);
    assert!(graph.deps_of("B").unwrap().is_empty());
}

#[test]
fn forward_references_resolve_independent_of_declaration_order() {
    // A depends on Z, declared after it in PODS.
    let contents = "\
PODS:
  - A (1.0):
      - Z (2.0)
  - Z (2.0)

DEPENDENCIES:
  - A (1.0)
";
    let graph = LockfileParser::from_str(contents, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();
    assert_eq!(graph.deps_of("A").unwrap(), vec!["Z"]);
}

#[test]
fn missing_transitive_is_skipped_silently() {
    // B only appears inside A's dependency list, as happens for
    // platform-specific transitives outside the current build target.
    let contents = "\
PODS:
  - A (1.0):
      - B (1.0)

DEPENDENCIES:
  - A (1.0)
";
    let graph = LockfileParser::from_str(contents, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();
    assert_eq!(graph.pkg_node_ids(), vec!["A"]);
    assert!(graph.deps_of("A").unwrap().is_empty());
    assert_eq!(graph.deps_of("B"), None);
}

#[test]
fn missing_declared_dependency_is_an_integrity_fault() {
    let contents = "\
PODS:
  - A (1.0)

DEPENDENCIES:
  - A (1.0)
  - B (1.0)
";
    let err = LockfileParser::from_str(contents, None)
        .unwrap()
        .to_dep_graph()
        .unwrap_err();
    match err {
        LockfileError::UnresolvedDependency { name } => assert_eq!(name, "B"),
        other => panic!("expected integrity fault, got: {other}"),
    }
}

#[test]
fn subspec_nodes_are_distinct_but_share_root_provenance() {
    let graph = LockfileParser::from_str(FULL_LOCKFILE, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();

    let root_pod = graph.node("Adjust").unwrap();
    let subspec = graph.node("Adjust/Core").unwrap();
    assert_eq!(root_pod.pkg.name, "Adjust");
    assert_eq!(subspec.pkg.name, "Adjust/Core");
    assert_eq!(root_pod.labels, subspec.labels);
    assert_eq!(
        root_pod.labels.get("checksum").map(String::as_str),
        Some("4a4d7d0ed46fa80d52c8eddbb5e83f28b4bd2ab2")
    );
    assert_eq!(graph.deps_of("Adjust").unwrap(), vec!["Adjust/Core"]);
}

#[test]
fn pkg_manager_descriptor_reflects_lockfile_metadata() {
    let graph = LockfileParser::from_str(FULL_LOCKFILE, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();
    let manager = graph.pkg_manager();
    assert_eq!(manager.name, "cocoapods");
    assert_eq!(manager.version, "1.7.3");
    assert_eq!(manager.repositories, vec!["trunk".to_string()]);
}

#[test]
fn external_source_pod_carries_source_and_checkout_labels() {
    let graph = LockfileParser::from_str(FULL_LOCKFILE, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();
    let labels = &graph.node("Pulley").unwrap().labels;
    assert_eq!(
        labels.get("externalSourceGit").map(String::as_str),
        Some("https://github.com/52inc/Pulley.git")
    );
    assert_eq!(
        labels.get("externalSourceBranch").map(String::as_str),
        Some("master")
    );
    assert_eq!(
        labels.get("checkoutOptionsCommit").map(String::as_str),
        Some("d01b8b3fd6c4923cdec4b2d7ff2ecf4e8d8b1b75")
    );
    assert!(!labels.contains_key("repository"));
}

#[test]
fn legacy_lockfile_without_optional_sections_builds() {
    let parser = LockfileParser::from_str(LEGACY_LOCKFILE, None).unwrap();
    let graph = parser.to_dep_graph().unwrap();

    assert_eq!(parser.podfile_checksum(), None);
    assert_eq!(graph.pkg_manager().version, "unknown");
    assert!(graph.pkg_manager().repositories.is_empty());
    assert!(graph.node("Expecta").unwrap().labels.is_empty());
    assert_eq!(graph.direct_deps(), vec!["Expecta"]);
}

#[test]
fn podfile_checksum_accessor() {
    let parser = LockfileParser::from_str(FULL_LOCKFILE, None).unwrap();
    assert_eq!(
        parser.podfile_checksum(),
        Some("73a1a4dba3d9e09bba5e1b3eb24a9eb372b25e34")
    );
}

#[test]
fn root_node_has_no_incoming_edges() {
    let graph = LockfileParser::from_str(FULL_LOCKFILE, None)
        .unwrap()
        .to_dep_graph()
        .unwrap();
    for node_id in graph.pkg_node_ids() {
        let deps = graph.deps_of(node_id).unwrap();
        assert!(!deps.contains(&ROOT_NODE_ID));
    }
}
