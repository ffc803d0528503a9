//! Core transformation logic
//!
//! Pure conversion from lockfile text to dependency graph. The only I/O in
//! this module tree is the pair of file constructors on
//! [`parser::LockfileParser`]; everything else operates on already-parsed
//! data.
//!
//! # Submodules
//!
//! - [`specifier`] - Specifier string grammar
//! - [`lockfile`] - Lockfile document model
//! - [`labels`] - Per-node provenance label extraction
//! - [`parser`] - Parser surface and two-pass graph construction

pub mod labels;
pub mod lockfile;
pub mod parser;
pub mod specifier;
