//! Error types for the scansion engine.
//!
//! Mirrors the donor crate's `error` module: small, specific variants rather
//! than a single catch-all, since almost nothing in the core is actually
//! fallible (see §7 of the design: the engine always returns a, possibly
//! empty, result list).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScansionError {
    #[error("word lookup failed: {0}")]
    WordLookup(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("compound split for '{word}' produced {candidates} candidates, exceeding the cap")]
    CompoundSplitOverflow { word: String, candidates: usize },
}
