//! Engine configuration.
//!
//! See EXTERNAL INTERFACES: four recognised options. `fuzzy` and
//! `free_verse` are mutually exclusive; the original dispatcher picked one
//! silently, this crate rejects the combination at construction time.

use serde::{Deserialize, Serialize};

use crate::error::ScansionError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScansionConfig {
    pub fuzzy: bool,
    pub free_verse: bool,
    pub error_param: i32,
    pub meter: Option<Vec<i32>>,
    pub max_compound_candidates: usize,
}

impl Default for ScansionConfig {
    fn default() -> Self {
        ScansionConfig {
            fuzzy: false,
            free_verse: false,
            error_param: 8,
            meter: None,
            max_compound_candidates: 64,
        }
    }
}

impl ScansionConfig {
    pub fn validate(&self) -> Result<(), ScansionError> {
        if self.fuzzy && self.free_verse {
            return Err(ScansionError::Configuration(
                "fuzzy and free_verse are mutually exclusive".into(),
            ));
        }
        Ok(())
    }

    /// `-1` is the sentinel enabling special-meter (§4.6) integration.
    pub fn wants_special_meters(&self) -> bool {
        match &self.meter {
            None => true,
            Some(meters) => meters.iter().any(|&m| m == -1),
        }
    }
}
