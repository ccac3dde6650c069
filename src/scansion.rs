//! Top-level orchestrator, folding the donor `core.py`'s convenience-method
//! surface into a single entry point (§11 supplemental feature).

use log::debug;

use crate::assigner::WordScansionAssigner;
use crate::config::ScansionConfig;
use crate::error::ScansionError;
use crate::matcher::MeterMatcher;
use crate::meters::MeterCatalogue;
use crate::models::{Line, LineScansionResult, LineScansionResultFuzzy};
use crate::prosodic_rules::apply_all as apply_prosodic_rules;
use crate::resolver::{resolve_dominant_meter, resolve_dominant_meter_fuzzy};
use crate::word_lookup::WordLookup;

pub struct Scansion<'a> {
    config: ScansionConfig,
    catalogue: &'a MeterCatalogue,
    lookup: Option<&'a dyn WordLookup>,
}

impl<'a> Scansion<'a> {
    pub fn new(
        config: ScansionConfig,
        catalogue: &'a MeterCatalogue,
        lookup: Option<&'a dyn WordLookup>,
    ) -> Result<Self, ScansionError> {
        config.validate()?;
        Ok(Scansion {
            config,
            catalogue,
            lookup,
        })
    }

    /// Parse a raw line, assign codes to every word, then apply the four
    /// prosodic rewrite passes in their mandated order.
    pub fn add_line(&self, raw_line: &str) -> Line {
        let mut line = Line::new(raw_line);
        let assigner = WordScansionAssigner::new(self.lookup, &self.config);
        for word in line.words_list.iter_mut() {
            assigner.assign_code_to_word(word);
        }
        apply_prosodic_rules(&mut line);
        line
    }

    fn candidate_indices(&self) -> Vec<usize> {
        match &self.config.meter {
            None => self.catalogue.all_non_special_indices(),
            Some(meters) => meters
                .iter()
                .filter(|&&m| m != -1)
                .filter_map(|&m| if m >= 0 { Some(m as usize) } else { None })
                .collect(),
        }
    }

    /// Scan a whole couplet/stanza in exact mode: assign codes, match every
    /// line against the catalogue, then resolve the dominant meter across
    /// all lines. Free-verse lines never touch the catalogue (§4.5.3); use
    /// [`Scansion::scan_lines_fuzzy`] when `config.fuzzy` is set.
    pub fn scan_lines(&self, raw_lines: &[&str]) -> Vec<LineScansionResult> {
        let lines: Vec<Line> = raw_lines.iter().map(|l| self.add_line(l)).collect();

        if self.config.free_verse {
            debug!("free-verse mode: skipping catalogue matching");
            return Vec::new();
        }

        let matcher = MeterMatcher::new(self.catalogue);
        let candidates = self.candidate_indices();

        let per_line_paths: Vec<_> = lines
            .iter()
            .map(|line| matcher.match_meters(line, &candidates, self.config.wants_special_meters()))
            .collect();

        let mut results = Vec::new();
        for (line, paths) in lines.iter().zip(per_line_paths.iter()) {
            let mut line_results = matcher.match_line_to_meters(line, paths);
            for r in line_results.iter_mut() {
                r.num_lines = lines.len();
            }
            results.extend(line_results);
        }

        for &i in &resolve_dominant_meter(&results, self.catalogue) {
            results[i].is_dominant = true;
        }
        results
    }

    pub fn scan_lines_fuzzy(&self, raw_lines: &[&str]) -> Vec<Vec<LineScansionResultFuzzy>> {
        let lines: Vec<Line> = raw_lines.iter().map(|l| self.add_line(l)).collect();
        let matcher = MeterMatcher::new(self.catalogue);
        let candidates = self.candidate_indices();
        matcher.scan_lines_fuzzy(&lines, &candidates)
    }

    pub fn resolve_dominant_meter_fuzzy(&self, raw_lines: &[&str]) -> Option<usize> {
        let lines: Vec<Line> = raw_lines.iter().map(|l| self.add_line(l)).collect();
        let candidates = self.candidate_indices();
        resolve_dominant_meter_fuzzy(&lines, self.catalogue, &candidates)
    }
}
