//! Specifier string grammar
//!
//! A specifier is a single line from the lockfile naming a package plus an
//! optional parenthesized payload, e.g. `Adjust (4.17.1)`. The payload is
//! captured verbatim: it may be a concrete version, a constraint expression
//! like `~> 2.0`, or a full external-source clause. Subspec names keep their
//! `/` separators (`React/Core` is one name).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// A package name with its optional version payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PkgInfo {
    /// Fully qualified package name, including any subspec path
    pub name: String,

    /// Version payload, verbatim from the specifier line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

// Static regex patterns using OnceLock
static SPECIFIER_RE: OnceLock<Regex> = OnceLock::new();
static EMPTY_PAYLOAD_RE: OnceLock<Regex> = OnceLock::new();

fn specifier_re() -> &'static Regex {
    SPECIFIER_RE.get_or_init(|| Regex::new(r"^([^\s(]+)(?: \((.+)\))?$").unwrap())
}

fn empty_payload_re() -> &'static Regex {
    EMPTY_PAYLOAD_RE.get_or_init(|| Regex::new(r"^[^\s(]+ \(\)$").unwrap())
}

/// Parse a specifier line into a [`PkgInfo`].
///
/// Accepted forms:
///
/// - `Adjust` (no version)
/// - `Adjust (4.17.1)`
/// - `ReactiveObjC (~> 2.0)`
/// - ``Pulley (from `https://...`, branch `master`)``
///
/// # Errors
///
/// Returns a [`FormatError`] when the name portion is empty, the payload is
/// empty, or the line has no extractable name at all.
pub fn parse_specifier(raw: &str) -> Result<PkgInfo, FormatError> {
    if let Some(caps) = specifier_re().captures(raw) {
        return Ok(PkgInfo {
            name: caps[1].to_string(),
            version: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
    if empty_payload_re().is_match(raw) {
        Err(FormatError::EmptyVersion {
            line: raw.to_string(),
        })
    } else {
        Err(FormatError::MissingName {
            line: raw.to_string(),
        })
    }
}

/// Return the root name of a possibly subspec-qualified package name.
///
/// `Adjust/Core/Subfeature` and `Adjust` both yield `Adjust`.
pub fn root_spec_name(name: &str) -> &str {
    match name.split_once('/') {
        Some((root, _)) => root,
        None => name,
    }
}
