//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid pod name (no spaces, parens or slashes)
    pub fn pod_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_+-]{0,30}"
    }

    /// Generate a subspec-qualified pod name with 1 to 4 path segments
    pub fn subspec_name() -> impl Strategy<Value = String> {
        proptest::collection::vec(pod_name(), 1..=4).prop_map(|segments| segments.join("/"))
    }

    /// Generate a version payload: concrete, constrained or wildcarded
    pub fn pod_version() -> impl Strategy<Value = String> {
        let concrete = (0u32..100, 0u32..100, 0u32..100)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"));
        prop_oneof![
            concrete.clone(),
            concrete.clone().prop_map(|v| format!("~> {v}")),
            concrete.prop_map(|v| format!("= {v}")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_pod_name_shape(name in pod_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains(' '));
            prop_assert!(!name.contains('('));
        }

        #[test]
        fn test_subspec_name_segments(name in subspec_name()) {
            prop_assert!(name.split('/').count() <= 4);
            prop_assert!(name.split('/').all(|segment| !segment.is_empty()));
        }

        #[test]
        fn test_pod_version_never_empty(version in pod_version()) {
            prop_assert!(!version.is_empty());
        }
    }
}
