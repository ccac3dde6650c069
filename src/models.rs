//! Data model: words, lines, candidate-tree payloads and result records.
//!
//! See DATA MODEL: `Word` caches several fields derived from its text by the
//! orthographic helpers of §4.1. This crate computes those in [`Word::new`]
//! and [`Word::set_word`] rather than on every field read, so the cache can
//! never diverge from the stored text (§9's "cyclic dependency" note).

use crate::araab::remove_araab;
use crate::text::{clean_line, clean_word, handle_noon_followed_by_stop};
use crate::word_analysis::{contains_noon_non_final, is_muarrab, is_vowel_plus_h};

/// Which strategy of §4.3's cascade produced a word's code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignmentMethod {
    Database,
    Heuristic,
    CompoundSplit,
    AlreadyAssigned,
}

#[derive(Clone, Debug, Default)]
pub struct Word {
    word: String,

    pub code: Vec<String>,
    pub taqti: Vec<String>,
    pub muarrab: Vec<String>,
    pub id: Vec<i64>,
    pub is_varied: Vec<bool>,
    pub error: bool,
    pub modified: bool,
    pub language: Vec<String>,
    /// Extra branches added by the grafting rule (§4.4.4); exposed to the
    /// candidate tree as additional edges but never replacing `code`.
    pub graft_codes: Vec<String>,
    pub breakup: Vec<String>,

    pub assignment_method: Option<AssignmentMethod>,
    pub heuristic_scanner_used: Option<&'static str>,
    pub heuristic_taqti_used: bool,
    pub compound_split_position: Option<usize>,
    pub db_lookup_successful: bool,
    pub fallback_used: bool,

    word_no_araab: String,
    length: usize,
    has_araab: bool,
    araab_mask: String,
    contains_internal_noon: bool,
    ends_with_vowel_plus_h: bool,
    starts_with_madd: bool,
    has_aspirate_char: bool,
}

impl Word {
    pub fn new(word: impl Into<String>) -> Self {
        let mut w = Word::default();
        w.set_word(word.into());
        w
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn set_word(&mut self, word: String) {
        self.word = word;
        self.refresh_profile();
    }

    fn refresh_profile(&mut self) {
        let stripped = remove_araab(&self.word);
        self.has_araab = !self.word.is_empty() && is_muarrab(&self.word);
        self.araab_mask = if self.word.is_empty() {
            String::new()
        } else {
            crate::araab::locate_araab(&self.word)
        };
        self.contains_internal_noon = !stripped.is_empty() && contains_noon_non_final(&stripped);
        self.ends_with_vowel_plus_h = stripped
            .chars()
            .last()
            .map(is_vowel_plus_h)
            .unwrap_or(false);
        self.starts_with_madd = stripped.starts_with('\u{0622}');
        self.has_aspirate_char = self.word.contains('\u{06BE}');
        self.length = stripped.chars().count();
        self.word_no_araab = stripped;
    }

    pub fn word_no_araab(&self) -> &str {
        &self.word_no_araab
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn has_araab(&self) -> bool {
        self.has_araab
    }

    pub fn araab_mask(&self) -> &str {
        &self.araab_mask
    }

    pub fn contains_internal_noon(&self) -> bool {
        self.contains_internal_noon
    }

    pub fn ends_with_vowel_plus_h(&self) -> bool {
        self.ends_with_vowel_plus_h
    }

    pub fn starts_with_madd(&self) -> bool {
        self.starts_with_madd
    }

    pub fn has_aspirate_char(&self) -> bool {
        self.has_aspirate_char
    }

    /// The assigner (§4.3) is a no-op on a word that already has a
    /// non-empty code list.
    pub fn already_assigned(&self) -> bool {
        !self.code.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Feet {
    pub foot: String,
    pub code: String,
    pub words: String,
}

#[derive(Clone, Debug, Default)]
pub struct CodeLocation {
    pub code: String,
    pub word_ref: i32,
    pub code_ref: i32,
    pub word: String,
    pub fuzzy: i32,
}

/// Payload carried during candidate-tree traversal (§4.5): the ordered
/// edges taken so far and the surviving set of meter indices.
#[derive(Clone, Debug, Default)]
pub struct ScanPath {
    pub location: Vec<CodeLocation>,
    pub meters: Vec<i32>,
}

#[derive(Clone, Debug, Default)]
pub struct LineScansionResult {
    pub original_line: String,
    pub words: Vec<Word>,
    pub feet_list: Vec<Feet>,
    pub word_taqti: Vec<String>,
    pub word_muarrab: Vec<String>,
    pub feet: String,
    pub meter_name: String,
    pub id: i64,
    pub identifier: i64,
    pub num_lines: usize,
    pub is_dominant: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LineScansionResultFuzzy {
    pub original_line: String,
    pub words: Vec<Word>,
    pub error: Vec<bool>,
    pub word_taqti: Vec<String>,
    pub original_taqti: Vec<String>,
    pub feet: String,
    pub meter_name: String,
    pub meter_syllables: Vec<String>,
    pub code_syllables: Vec<String>,
    pub score: i64,
    pub id: i64,
    pub identifier: i64,
    pub hidden: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Line {
    pub original_line: String,
    pub words_list: Vec<Word>,
}

impl Line {
    /// Lexical pipeline (component J): clean, split, noon+stop splitting,
    /// per-word cleanup. Words are created once here and never re-sliced.
    pub fn new(line: &str) -> Self {
        let cleaned_line = clean_line(line);

        let words_raw: Vec<String> = cleaned_line
            .split(|c| c == ',' || c == ' ')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        let words_raw = handle_noon_followed_by_stop(words_raw);

        let mut words_list = Vec::new();
        for word_text in words_raw {
            let word_text = word_text.trim();
            if word_text.is_empty() {
                continue;
            }
            let cleaned_word = clean_word(word_text);
            let word = Word::new(cleaned_word);
            if word.length() > 0 {
                words_list.push(word);
            }
        }

        Line {
            original_line: cleaned_line,
            words_list,
        }
    }
}
