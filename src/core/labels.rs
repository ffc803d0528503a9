//! Node label extraction
//!
//! Gathers per-pod provenance from the lockfile (checksum, spec repository,
//! external source, checkout options) into the label map attached to each
//! graph node. Labels are always looked up by the root pod name, so every
//! subspec node of a root pod carries identical provenance.
//!
//! The map is built insert-only from resolved values: an unresolved field is
//! simply never inserted, which keeps serialized label records free of null
//! placeholders.

use crate::core::lockfile::{ExternalSourceInfo, Lockfile};
use crate::core::specifier::root_spec_name;
use crate::graph::NodeLabels;

/// Assemble the label map for one pod, keyed by its qualified name.
pub fn node_labels_for(lockfile: &Lockfile, qualified_name: &str) -> NodeLabels {
    let root_name = root_spec_name(qualified_name);
    let mut labels = NodeLabels::new();

    insert_resolved(&mut labels, "checksum", lockfile.checksum_for(root_name));
    insert_resolved(
        &mut labels,
        "repository",
        lockfile.repository_for(root_name),
    );
    if let Some(source) = lockfile.external_source_for(root_name) {
        insert_descriptor(&mut labels, "externalSource", source);
    }
    if let Some(options) = lockfile.checkout_options_for(root_name) {
        insert_descriptor(&mut labels, "checkoutOptions", options);
    }

    labels
}

fn insert_resolved(labels: &mut NodeLabels, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        labels.insert(key.to_string(), value.to_string());
    }
}

fn insert_descriptor(labels: &mut NodeLabels, prefix: &str, info: &ExternalSourceInfo) {
    insert_resolved(labels, &format!("{prefix}Podspec"), info.podspec.as_deref());
    insert_resolved(labels, &format!("{prefix}Path"), info.path.as_deref());
    insert_resolved(labels, &format!("{prefix}Git"), info.git.as_deref());
    insert_resolved(labels, &format!("{prefix}Tag"), info.tag.as_deref());
    insert_resolved(labels, &format!("{prefix}Commit"), info.commit.as_deref());
    insert_resolved(labels, &format!("{prefix}Branch"), info.branch.as_deref());
}
