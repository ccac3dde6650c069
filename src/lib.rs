//! Scansion engine for Urdu poetry: assigns prosodic weight codes to
//! words, applies the Al-prefix/izafat/atf/grafting rewrite rules, and
//! matches lines against a meter catalogue in exact, fuzzy or free-verse
//! mode.

pub mod araab;
pub mod assigner;
pub mod code_assignment;
pub mod config;
pub mod error;
pub mod length_scanners;
pub mod matcher;
pub mod meters;
pub mod models;
pub mod prosodic_rules;
pub mod resolver;
pub mod scansion;
pub mod text;
pub mod tree;
pub mod word_analysis;
pub mod word_lookup;

pub use config::ScansionConfig;
pub use error::ScansionError;
pub use meters::{sample_catalogue, MeterCatalogue, MeterEntry};
pub use models::{Line, LineScansionResult, LineScansionResultFuzzy, Word};
pub use scansion::Scansion;
pub use word_lookup::{NullWordLookup, WordLookup};

#[cfg(feature = "sqlite")]
pub use word_lookup::SqliteWordLookup;
