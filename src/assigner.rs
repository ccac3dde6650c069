//! Word-code assigner (component C): orchestrates the three-strategy
//! cascade of §4.3 — database lookup, heuristic scanning, compound split —
//! plus the post-DB 3-char variation rule.

use log::{debug, warn};

use crate::araab::remove_araab;
use crate::code_assignment::compute_scansion;
use crate::config::ScansionConfig;
use crate::length_scanners::length_two_scan;
use crate::models::{AssignmentMethod, Word};
use crate::word_lookup::WordLookup;

pub struct WordScansionAssigner<'a> {
    lookup: Option<&'a dyn WordLookup>,
    max_compound_candidates: usize,
}

impl<'a> WordScansionAssigner<'a> {
    pub fn new(lookup: Option<&'a dyn WordLookup>, config: &ScansionConfig) -> Self {
        WordScansionAssigner {
            lookup,
            max_compound_candidates: config.max_compound_candidates,
        }
    }

    /// Assign a scansion code to `word`, no-op if it already carries one
    /// (§4.3 "result idempotence").
    pub fn assign_code_to_word(&self, word: &mut Word) {
        if word.already_assigned() {
            word.assignment_method = Some(AssignmentMethod::AlreadyAssigned);
            return;
        }

        if let Some(lookup) = self.lookup {
            match lookup.find_word(word) {
                Ok(()) if !word.code.is_empty() => {
                    word.assignment_method = Some(AssignmentMethod::Database);
                    word.db_lookup_successful = true;
                    self.apply_three_char_variation_rule(word);
                    return;
                }
                Ok(()) => {}
                Err(e) => {
                    warn!("word lookup failed for '{}': {}; falling back to heuristics", word.word(), e);
                }
            }
        }

        let heuristic_code = compute_scansion(word);
        if !heuristic_code.is_empty() {
            word.code.push(heuristic_code);
            word.assignment_method = Some(AssignmentMethod::Heuristic);
            word.heuristic_taqti_used = !word.taqti.is_empty();
            self.apply_three_char_variation_rule(word);
            return;
        }

        if word.length() > 4 {
            self.split_compound_word(word);
        } else {
            word.fallback_used = true;
        }
    }

    /// Post-DB rule: a 3-char stripped form ending in alif gets an extra
    /// alternative code appended (never replacing an existing one).
    fn apply_three_char_variation_rule(&self, word: &mut Word) {
        if word.length() != 3 {
            return;
        }
        let stripped = word.word_no_araab();
        if stripped.chars().last() != Some('\u{0627}') {
            return;
        }
        let extra = if word.starts_with_madd() { "==" } else { "-=" };
        if !word.code.iter().any(|c| c == extra) {
            word.code.push(extra.to_string());
        }
    }

    /// Strategy 3 (§4.3): try every split position, accept the first split
    /// where at least one side resolves via the DB (or a <=2-char L2
    /// fallback), and cross the candidate codes/muarrab forms.
    fn split_compound_word(&self, word: &mut Word) {
        let stripped: Vec<char> = word.word_no_araab().chars().collect();
        let n = stripped.len();

        for i in 1..=(n.saturating_sub(2)) {
            let left: String = stripped[..i].iter().collect();
            let right: String = stripped[i..].iter().collect();

            let mut left_word = Word::new(left.clone());
            let mut right_word = Word::new(right.clone());

            if let Some(lookup) = self.lookup {
                let _ = lookup.find_word(&mut left_word);
                let _ = lookup.find_word(&mut right_word);
            }

            let left_in_db = !left_word.code.is_empty();
            let right_in_db = !right_word.code.is_empty();

            let right_short = right.chars().count() <= 2;
            let left_short = left.chars().count() <= 2;

            let accept = (left_in_db && (right_in_db || right_short))
                || (right_in_db && (left_in_db || left_short));

            if !accept {
                continue;
            }

            if !right_in_db && right_short {
                right_word.code = vec![length_two_scan(&right)];
                right_word.id = vec![-1];
            }
            if !left_in_db && left_short {
                left_word.code = vec![length_two_scan(&left)];
                left_word.id = vec![-1];
            }

            let left_codes = if left_word.code.is_empty() {
                vec![compute_scansion(&left_word)]
            } else {
                left_word.code.clone()
            };
            let right_codes = if right_word.code.is_empty() {
                vec![compute_scansion(&right_word)]
            } else {
                right_word.code.clone()
            };

            let total = left_codes.len() * right_codes.len();
            if total > self.max_compound_candidates {
                warn!(
                    "compound split of '{}' would yield {} candidates, exceeding cap {}",
                    word.word(),
                    total,
                    self.max_compound_candidates
                );
                continue;
            }

            for lc in &left_codes {
                for rc in &right_codes {
                    word.code.push(format!("{}{}", lc, rc));
                }
            }
            for lm in left_word.muarrab.iter().chain(std::iter::once(&left)) {
                for rm in right_word.muarrab.iter().chain(std::iter::once(&right)) {
                    word.muarrab.push(format!("{}{}", lm, rm));
                }
            }

            word.modified = true;
            word.compound_split_position = Some(i);
            word.assignment_method = Some(AssignmentMethod::CompoundSplit);
            debug!("split '{}' at {} into '{}' + '{}'", word.word(), i, left, right);
            return;
        }

        // Degenerate split (§7): no valid split found.
        word.modified = true;
        word.assignment_method = Some(AssignmentMethod::CompoundSplit);
    }
}
