//! End-to-end scenarios covering single-character input, vowel-ending
//! words, the aspirated-yeh shortcut, the Al-prefix/atf rewrite rules,
//! exact and fuzzy meter matching, special-meter detection, and empty
//! lines.

use aruuz::code_assignment::compute_scansion;
use aruuz::length_scanners::length_one_scan;
use aruuz::matcher::MeterMatcher;
use aruuz::meters::sample_catalogue;
use aruuz::models::{Line, Word};
use aruuz::prosodic_rules::{apply_al_prefix_rule, apply_atf_rule};
use aruuz::resolver::resolve_dominant_meter;
use aruuz::tree::{levenshtein, match_special_meters, traverse_exact};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn scenario_a_single_character_input() {
    init();
    let code = length_one_scan("\u{0622}");
    assert_eq!(code, "=");

    let line = Line::new("\u{0622}");
    assert_eq!(line.words_list.len(), 1);
}

#[test]
fn scenario_b_two_char_vowel_ending() {
    init();
    let word = Word::new("\u{06A9}\u{0627}"); // کا
    let code = compute_scansion(&word);
    assert_eq!(code, "x");
}

#[test]
fn scenario_c_aspirated_yeh_shortcut() {
    init();
    // اندھیرے
    let word = Word::new("\u{0627}\u{0646}\u{062F}\u{06BE}\u{06CC}\u{0631}\u{06D2}");
    let code = compute_scansion(&word);
    assert_eq!(code, "-==");
}

#[test]
fn scenario_d_al_prefix_rule() {
    init();
    let mut first = Word::new("\u{06A9}\u{062A}\u{0627}\u{0628}\u{064E}"); // کتابَ (zabar-ended)
    first.code = vec!["==".to_string()];
    first.muarrab = vec!["\u{06A9}\u{062A}\u{0627}\u{0628}".to_string()];

    let mut second = Word::new("\u{0627}\u{0644}\u{06A9}\u{062A}\u{0627}\u{0628}"); // الکتاب
    second.code = vec!["xx=".to_string()];
    second.muarrab = vec!["\u{0627}\u{0644}\u{06A9}\u{062A}\u{0627}\u{0628}".to_string()];

    let mut line = Line {
        original_line: String::new(),
        words_list: vec![first, second],
    };

    apply_al_prefix_rule(&mut line);

    assert_eq!(line.words_list[0].code[0], "=-=");
    assert!(line.words_list[0].muarrab[0].ends_with('\u{0644}'));
    assert_eq!(line.words_list[1].code[0], "x=");
}

#[test]
fn scenario_e_atf_clearing() {
    init();
    let mut prev = Word::new("\u{06A9}\u{062A}\u{0627}\u{0628}"); // کتاب
    prev.code = vec!["x=".to_string()];

    let mut conjunction = Word::new("\u{0648}"); // و
    conjunction.code = vec!["x".to_string()];

    let mut line = Line {
        original_line: String::new(),
        words_list: vec![prev, conjunction],
    };

    apply_atf_rule(&mut line);

    assert_eq!(line.words_list[1].code[0], "");
    assert_eq!(line.words_list[0].code[0], "x-x");
}

#[test]
fn scenario_f_exact_match() {
    init();
    let catalogue = sample_catalogue();
    // Flattened pattern of meter 0 is "=-==" + "=-=-=" + "=--" (caesura
    // dropped under variant 1): build a line whose words carry exactly
    // those three chunks as codes.
    let mut w1 = Word::new("\u{062F}\u{0645}");
    w1.code = vec!["=-==".to_string()];
    let mut w2 = Word::new("\u{0627}\u{0646}\u{062F}\u{06BE}\u{06CC}\u{0631}\u{06D2}");
    w2.code = vec!["=-=-=".to_string()];
    let mut w3 = Word::new("\u{0645}\u{06CC}\u{06BA}");
    w3.code = vec!["=--".to_string()];

    let line = Line {
        original_line: "test".to_string(),
        words_list: vec![w1, w2, w3],
    };

    let paths = traverse_exact(&line, &catalogue, &catalogue.all_non_special_indices());
    assert!(paths.iter().any(|p| p.meters.contains(&0)));
}

#[test]
fn scenario_g_couplet_disambiguation() {
    init();
    let catalogue = sample_catalogue();
    let matcher = MeterMatcher::new(&catalogue);
    let candidates = catalogue.all_non_special_indices();

    let mut w1 = Word::new("\u{062F}\u{0645}");
    w1.code = vec!["=-==".to_string()];
    let mut w2 = Word::new("\u{0627}\u{0646}\u{062F}\u{06BE}\u{06CC}\u{0631}\u{06D2}");
    w2.code = vec!["=-=-=".to_string()];
    let mut w3 = Word::new("\u{0645}\u{06CC}\u{06BA}");
    w3.code = vec!["=--".to_string()];
    let line_a = Line {
        original_line: "line a".to_string(),
        words_list: vec![w1, w2, w3],
    };

    let mut w4 = Word::new("\u{0627}");
    w4.code = vec!["=-==".to_string()];
    let mut w5 = Word::new("\u{0628}");
    w5.code = vec!["=-=-=".to_string()];
    let mut w6 = Word::new("\u{067E}");
    w6.code = vec!["=--".to_string()];
    let line_b = Line {
        original_line: "line b".to_string(),
        words_list: vec![w4, w5, w6],
    };

    // Build the actual per-line result records (the feet/codes of whichever
    // candidate tree path survived exact matching), the same way
    // `Scansion::scan_lines` does, rather than recomputing an ad hoc code.
    let mut results = Vec::new();
    for line in [&line_a, &line_b] {
        let paths = matcher.match_meters(line, &candidates, false);
        results.extend(matcher.match_line_to_meters(line, &paths));
    }

    let winners = resolve_dominant_meter(&results, &catalogue);
    assert!(!winners.is_empty());
    let meter0_name = catalogue.get(0).unwrap().name;
    for &i in &winners {
        assert_eq!(results[i].meter_name, meter0_name);
    }
}

#[test]
fn scenario_h_special_meter_detection() {
    init();
    let catalogue = sample_catalogue();
    let mut word = Word::new("\u{0627}");
    word.code = vec!["=".repeat(16)];
    let line = Line {
        original_line: String::new(),
        words_list: vec![word],
    };
    let matches = match_special_meters(&line, &catalogue);
    assert!(matches.contains(&(catalogue.special_base() + 8)));
}

#[test]
fn scenario_i_fuzzy_slight_deviation() {
    init();
    let code: Vec<char> = "-=-=".chars().collect();
    let pattern: Vec<char> = "=-=-".chars().collect();
    let score = levenshtein(&code, &pattern);
    assert!(score > 0);
    assert!(score <= 8);
}

#[test]
fn scenario_j_empty_punctuation_only_line() {
    init();
    let line = Line::new("\u{061F} \u{060C} ...");
    assert!(line.words_list.is_empty());
}
