//! Dominant-meter resolver (component I, §4.8).
//!
//! Reconstructed directly from the documented algorithm description: the
//! donor's own resolver module was not present in the retrieval pack, so
//! there is no donor file to port line-by-line here. The exact-mode and
//! fuzzy-mode laws below follow that description's wording exactly; see
//! DESIGN.md for the provenance note.

use std::collections::HashMap;

use crate::meters::{afail_list, MeterCatalogue};
use crate::models::LineScansionResult;
use crate::tree::{fuzzy_score, weight_matches};

/// Longest strictly-ordered common prefix of feet between a candidate code
/// string and a meter's foot decomposition. Counts whole feet only: a foot
/// either matches in full or the scan stops there.
pub fn ordered_match_count(code: &str, meter_pattern: &str) -> usize {
    let feet = afail_list(meter_pattern);
    let code_chars: Vec<char> = code.chars().collect();
    let mut pos = 0;
    let mut count = 0;
    for (_, foot_code) in &feet {
        // caesura markers are cosmetic and carry no weight of their own.
        let foot_chars: Vec<char> = foot_code.chars().filter(|&c| c != '+').collect();
        if foot_chars.is_empty() || pos + foot_chars.len() > code_chars.len() {
            break;
        }
        let matches = (0..foot_chars.len()).all(|i| weight_matches(code_chars[pos + i], foot_chars[i]));
        if !matches {
            break;
        }
        pos += foot_chars.len();
        count += 1;
    }
    count
}

/// Meters that share a printable name are the same meter for resolution
/// purposes, regardless of which catalogue section (regular/rubai/special)
/// a particular candidate row came from.
fn group_key(catalogue: &MeterCatalogue, idx: usize) -> Option<String> {
    catalogue.get(idx).map(|m| m.name.to_string())
}

/// Exact-mode resolution (§4.8): operates on the actual result records
/// `match_line_to_meters` produced (one per surviving ScanPath × meter), not
/// on a recomputed line code — a result's own `word_taqti` is the code of
/// whichever candidate tree path survived exact matching for its meter.
/// Group by meter name; score each group by summing `ordered_match_count`
/// of every member result's matched code against its own meter's canonical
/// feet (special-meter rows, which have no weight pattern, score their full
/// already-matched foot count instead); highest total wins, ties broken by
/// taking the last group after a stable ascending sort by score. Returns
/// the indices into `results` belonging to the winning group.
pub fn resolve_dominant_meter(results: &[LineScansionResult], catalogue: &MeterCatalogue) -> Vec<usize> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, r) in results.iter().enumerate() {
        if !groups.contains_key(r.meter_name.as_str()) {
            order.push(r.meter_name.as_str());
        }
        groups.entry(r.meter_name.as_str()).or_default().push(i);
    }
    if order.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&str, i64)> = order
        .iter()
        .map(|&name| {
            let total: i64 = groups[name]
                .iter()
                .map(|&i| {
                    let r = &results[i];
                    let code: String = r.word_taqti.concat();
                    match catalogue.get(r.identifier as usize) {
                        Some(meter) if !meter.pattern.is_empty() => ordered_match_count(&code, meter.pattern) as i64,
                        _ => r.feet_list.len() as i64,
                    }
                })
                .sum();
            (name, total)
        })
        .collect();

    scored.sort_by_key(|&(_, score)| score);
    let max_score = match scored.iter().map(|&(_, s)| s).max() {
        Some(s) => s,
        None => return Vec::new(),
    };
    let winner = scored.into_iter().filter(|&(_, s)| s == max_score).last().map(|(name, _)| name);

    match winner {
        Some(name) => groups.remove(name).unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Fuzzy-mode resolution: per meter group, aggregate across lines as
/// `exp(mean(ln(max(score, 1)))) - zero_count`; the lowest aggregate wins.
pub fn resolve_dominant_meter_fuzzy(
    lines: &[crate::models::Line],
    catalogue: &MeterCatalogue,
    candidate_indices: &[usize],
) -> Option<usize> {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for &idx in candidate_indices {
        if let Some(key) = group_key(catalogue, idx) {
            groups.entry(key).or_default().push(idx);
        }
    }

    let mut best: Option<(usize, f64)> = None;
    for (_, idxs) in groups {
        let representative = idxs[0];
        let meter = catalogue.get(representative)?;
        if meter.pattern.is_empty() {
            continue;
        }

        let mut zero_count = 0i64;
        let mut ln_sum = 0f64;
        for line in lines {
            let score = fuzzy_score(line, meter).unwrap_or(0);
            if score == 0 {
                zero_count += 1;
            }
            ln_sum += (score.max(1) as f64).ln();
        }
        let mean = ln_sum / lines.len().max(1) as f64;
        let aggregate = mean.exp() - zero_count as f64;

        match best {
            None => best = Some((representative, aggregate)),
            Some((_, best_agg)) if aggregate < best_agg => best = Some((representative, aggregate)),
            _ => {}
        }
    }

    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_match_count_stops_at_first_mismatch() {
        // فعلن foot = "=--"; two feet back to back should match in full,
        // a third mismatched one should stop the count there.
        let count = ordered_match_count("=--=--x--", "=--/=--/=--");
        assert_eq!(count, 2);
    }

    #[test]
    fn resolve_dominant_meter_picks_highest_scoring_name_group() {
        use crate::meters::sample_catalogue;
        use crate::models::Feet;

        let catalogue = sample_catalogue();
        let meter0 = catalogue.get(0).unwrap();
        let meter1 = catalogue.get(1).unwrap();

        let strong = LineScansionResult {
            word_taqti: vec!["=-==".into(), "=-=-=".into(), "=--".into()],
            meter_name: meter0.name.to_string(),
            identifier: 0,
            ..Default::default()
        };
        let weak = LineScansionResult {
            word_taqti: vec!["x".into()],
            meter_name: meter1.name.to_string(),
            identifier: 1,
            feet_list: vec![Feet::default()],
            ..Default::default()
        };

        let results = vec![weak, strong];
        let winners = resolve_dominant_meter(&results, &catalogue);
        assert_eq!(winners, vec![1]);
        assert_eq!(results[winners[0]].meter_name, meter0.name);
    }
}
