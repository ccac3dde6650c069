//! Meter matcher (component H): turns candidate-tree output into result
//! records, and drives the fuzzy and free-verse line scans (§4.5, §4.7).

use crate::meters::{afail, afail_list, MeterCatalogue};
use crate::models::{Feet, Line, LineScansionResult, LineScansionResultFuzzy, ScanPath};
use crate::tree::{free_verse_tile, fuzzy_score, match_special_meters, traverse_exact};

/// Special-meter feet template (§4.7): "16-syllable codes decompose into
/// four four-syllable feet using a fixed name" — tile the path's matched
/// code into 4-syllable chunks, each named after the meter itself (the
/// donor's per-family foot names did not survive distillation).
fn special_meter_feet(meter_idx: i32, catalogue: &MeterCatalogue, full_code: &str) -> (String, Vec<Feet>) {
    let name = catalogue.get(meter_idx as usize).map(|m| m.name).unwrap_or("");
    let chars: Vec<char> = full_code.chars().collect();
    let mut feet_list = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let end = (i + 4).min(chars.len());
        feet_list.push(Feet {
            foot: name.to_string(),
            code: chars[i..end].iter().collect(),
            words: String::new(),
        });
        i = end;
    }
    let feet = feet_list.iter().map(|f| f.foot.as_str()).collect::<Vec<_>>().join(" ");
    (feet, feet_list)
}

pub struct MeterMatcher<'a> {
    catalogue: &'a MeterCatalogue,
}

impl<'a> MeterMatcher<'a> {
    pub fn new(catalogue: &'a MeterCatalogue) -> Self {
        MeterMatcher { catalogue }
    }

    /// Run the exact-mode candidate tree and fold in special-meter
    /// classification when the caller has asked for it (§4.6).
    pub fn match_meters(&self, line: &Line, candidate_indices: &[usize], include_special: bool) -> Vec<ScanPath> {
        let mut paths = traverse_exact(line, self.catalogue, candidate_indices);

        if include_special {
            let special = match_special_meters(line, self.catalogue);
            if !special.is_empty() {
                let location = line
                    .words_list
                    .iter()
                    .enumerate()
                    .filter_map(|(i, w)| {
                        w.code.first().map(|c| crate::models::CodeLocation {
                            code: c.clone(),
                            word_ref: i as i32,
                            code_ref: 0,
                            word: w.word().to_string(),
                            fuzzy: 0,
                        })
                    })
                    .collect();
                paths.push(ScanPath {
                    location,
                    meters: special.into_iter().map(|i| i as i32).collect(),
                });
            }
        }

        paths
    }

    /// Map a line's surviving candidate paths onto result records, one per
    /// (path, meter) combination (§4.7). For regular/varied/rubai meters the
    /// feet are the meter's own canonical decomposition (`afail`/`afail_list`
    /// of its catalogue pattern); for special meters, which have no weight
    /// pattern, feet are generated by feeding the path's own matched code
    /// into the Hindi/Zamzama templates.
    pub fn match_line_to_meters(&self, line: &Line, paths: &[ScanPath]) -> Vec<LineScansionResult> {
        let mut out = Vec::new();
        for path in paths {
            let words: Vec<crate::models::Word> = path
                .location
                .iter()
                .filter_map(|loc| {
                    if loc.word_ref >= 0 {
                        line.words_list.get(loc.word_ref as usize).cloned()
                    } else {
                        None
                    }
                })
                .collect();
            let word_taqti: Vec<String> = path.location.iter().map(|loc| loc.code.clone()).collect();
            let word_muarrab: Vec<String> = path
                .location
                .iter()
                .filter_map(|loc| {
                    if loc.word_ref >= 0 {
                        line.words_list.get(loc.word_ref as usize).map(|w| w.word().to_string())
                    } else {
                        None
                    }
                })
                .collect();
            let full_code: String = word_taqti.concat();

            for &meter_idx in &path.meters {
                let (name, pattern, id) = self
                    .catalogue
                    .get(meter_idx as usize)
                    .map(|m| (m.name.to_string(), m.pattern, m.id))
                    .unwrap_or_default_meter();

                let (feet, feet_list) = if pattern.is_empty() {
                    special_meter_feet(meter_idx, self.catalogue, &full_code)
                } else {
                    (
                        afail(pattern),
                        afail_list(pattern)
                            .into_iter()
                            .map(|(foot, code)| Feet { foot, code, words: String::new() })
                            .collect(),
                    )
                };

                out.push(LineScansionResult {
                    original_line: line.original_line.clone(),
                    words: words.clone(),
                    feet_list,
                    word_taqti: word_taqti.clone(),
                    word_muarrab: word_muarrab.clone(),
                    feet,
                    meter_name: name,
                    id,
                    identifier: meter_idx as i64,
                    num_lines: 1,
                    is_dominant: false,
                });
            }
        }
        out
    }

    /// Fuzzy scan of a single line against every candidate meter (§4.5's
    /// fuzzy traversal): every meter gets a record, scored rather than
    /// filtered out.
    pub fn scan_line_fuzzy(&self, line: &Line, candidate_indices: &[usize]) -> Vec<LineScansionResultFuzzy> {
        let mut out = Vec::new();
        for &idx in candidate_indices {
            let meter = match self.catalogue.get(idx) {
                Some(m) if !m.pattern.is_empty() => m,
                _ => continue,
            };
            let score = fuzzy_score(line, meter).unwrap_or(usize::MAX);
            let code: String = line
                .words_list
                .iter()
                .filter_map(|w| w.code.first())
                .cloned()
                .collect();

            out.push(LineScansionResultFuzzy {
                original_line: line.original_line.clone(),
                words: line.words_list.clone(),
                error: vec![score != 0],
                word_taqti: line.words_list.iter().flat_map(|w| w.taqti.clone()).collect(),
                original_taqti: line.words_list.iter().flat_map(|w| w.taqti.clone()).collect(),
                feet: afail(meter.pattern),
                meter_name: meter.name.to_string(),
                meter_syllables: afail_list(meter.pattern).into_iter().map(|(_, c)| c).collect(),
                code_syllables: vec![code],
                score: score as i64,
                id: meter.id,
                identifier: idx as i64,
                hidden: false,
            });
        }
        out
    }

    pub fn scan_lines_fuzzy(&self, lines: &[Line], candidate_indices: &[usize]) -> Vec<Vec<LineScansionResultFuzzy>> {
        lines.iter().map(|l| self.scan_line_fuzzy(l, candidate_indices)).collect()
    }

    /// Free-verse mode (§4.5): no catalogue lookup at all, just a greedy
    /// foot tiling of whatever code the words carry.
    pub fn match_line_free_verse(&self, line: &Line, known_feet: &[&str]) -> Vec<String> {
        let code: String = line
            .words_list
            .iter()
            .filter_map(|w| w.code.first())
            .cloned()
            .collect();
        free_verse_tile(&code, known_feet)
    }
}

trait UnwrapOrDefaultMeter {
    fn unwrap_or_default_meter(self) -> (String, &'static str, i64);
}

impl UnwrapOrDefaultMeter for Option<(String, &'static str, i32)> {
    fn unwrap_or_default_meter(self) -> (String, &'static str, i64) {
        match self {
            Some((name, pattern, id)) => (name, pattern, id as i64),
            None => (String::new(), "", 0),
        }
    }
}
