//! Lockfile document model
//!
//! The structured form of a `Podfile.lock`, deserialized from YAML with the
//! section names CocoaPods writes (`PODS`, `SPEC REPOS`, ...). Optional
//! sections are absent in lockfiles written by older CocoaPods releases;
//! every lookup method treats an absent section exactly like an empty one.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed `Podfile.lock` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lockfile {
    /// Every resolved pod, with its own dependency list when it has one
    #[serde(rename = "PODS")]
    pub pods: Vec<PodEntry>,

    /// Specifier lines declared directly in the Podfile
    #[serde(rename = "DEPENDENCIES")]
    pub dependencies: Vec<String>,

    /// Spec repository alias -> root pod names hosted there
    #[serde(
        rename = "SPEC REPOS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub spec_repos: Option<BTreeMap<String, Vec<String>>>,

    /// Root pod name -> declared external source
    #[serde(
        rename = "EXTERNAL SOURCES",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_sources: Option<BTreeMap<String, ExternalSourceInfo>>,

    /// Root pod name -> revision actually checked out
    #[serde(
        rename = "CHECKOUT OPTIONS",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub checkout_options: Option<BTreeMap<String, CheckoutOptions>>,

    /// Root pod name -> podspec checksum
    #[serde(
        rename = "SPEC CHECKSUMS",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub spec_checksums: BTreeMap<String, String>,

    /// Checksum of the Podfile this resolution was produced from
    #[serde(
        rename = "PODFILE CHECKSUM",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub podfile_checksum: Option<String>,

    /// Version of the CocoaPods release that wrote the lockfile
    #[serde(rename = "COCOAPODS", default, skip_serializing_if = "Option::is_none")]
    pub cocoapods: Option<String>,
}

/// One entry of the PODS section
///
/// A pod either appears as a bare specifier string or as a single-key
/// mapping from its specifier to the specifiers it depends on:
///
/// ```yaml
/// PODS:
///   - Expecta (1.0.5)
///   - React/Core (0.59.2):
///       - yoga (= 0.59.2.React)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodEntry {
    /// A pod with no dependencies of its own
    Simple(String),
    /// A pod with a nested dependency list
    WithDependencies {
        specifier: String,
        dependencies: Vec<String>,
    },
}

impl PodEntry {
    /// The pod's own specifier line
    pub fn specifier(&self) -> &str {
        match self {
            Self::Simple(specifier) | Self::WithDependencies { specifier, .. } => specifier,
        }
    }

    /// The pod's dependency specifier lines (empty for the simple shape)
    pub fn dependencies(&self) -> &[String] {
        match self {
            Self::Simple(_) => &[],
            Self::WithDependencies { dependencies, .. } => dependencies,
        }
    }
}

impl Serialize for PodEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Simple(specifier) => serializer.serialize_str(specifier),
            Self::WithDependencies {
                specifier,
                dependencies,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(specifier, dependencies)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PodEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PodEntryVisitor;

        impl<'de> Visitor<'de> for PodEntryVisitor {
            type Value = PodEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a specifier string or a single-key mapping to a dependency list")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<PodEntry, E> {
                Ok(PodEntry::Simple(value.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PodEntry, A::Error> {
                let (specifier, dependencies) = map
                    .next_entry::<String, Vec<String>>()?
                    .ok_or_else(|| de::Error::custom("pod entry mapping is empty"))?;
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom(
                        "pod entry mapping must have exactly one key",
                    ));
                }
                Ok(PodEntry::WithDependencies {
                    specifier,
                    dependencies,
                })
            }
        }

        deserializer.deserialize_any(PodEntryVisitor)
    }
}

/// External source or checkout descriptor for a pod
///
/// CocoaPods writes these keys as Ruby symbols (`:git`), while some older
/// documents carry the plain-word spelling; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSourceInfo {
    #[serde(
        rename = ":podspec",
        alias = "podspec",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub podspec: Option<String>,

    #[serde(
        rename = ":path",
        alias = "path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,

    #[serde(
        rename = ":git",
        alias = "git",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub git: Option<String>,

    #[serde(
        rename = ":tag",
        alias = "tag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,

    #[serde(
        rename = ":commit",
        alias = "commit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub commit: Option<String>,

    #[serde(
        rename = ":branch",
        alias = "branch",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub branch: Option<String>,
}

/// Checkout options share the external-source descriptor shape
pub type CheckoutOptions = ExternalSourceInfo;

impl Lockfile {
    /// Parse from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// The podspec checksum recorded for a root pod name
    pub fn checksum_for(&self, root_name: &str) -> Option<&str> {
        self.spec_checksums.get(root_name).map(String::as_str)
    }

    /// The spec repository alias hosting a root pod name
    pub fn repository_for(&self, root_name: &str) -> Option<&str> {
        let spec_repos = self.spec_repos.as_ref()?;
        spec_repos
            .iter()
            .find(|(_, pods)| pods.iter().any(|pod| pod == root_name))
            .map(|(alias, _)| alias.as_str())
    }

    /// The declared external source for a root pod name
    pub fn external_source_for(&self, root_name: &str) -> Option<&ExternalSourceInfo> {
        self.external_sources.as_ref()?.get(root_name)
    }

    /// The recorded checkout options for a root pod name
    pub fn checkout_options_for(&self, root_name: &str) -> Option<&CheckoutOptions> {
        self.checkout_options.as_ref()?.get(root_name)
    }

    /// All spec repository aliases, in deterministic order
    pub fn repositories(&self) -> Vec<String> {
        match &self.spec_repos {
            Some(spec_repos) => spec_repos.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// The CocoaPods version that produced the lockfile
    pub fn cocoapods_version(&self) -> &str {
        self.cocoapods.as_deref().unwrap_or("unknown")
    }
}
