//! Heuristic code-assignment dispatcher: taqti-based segment dispatch when a
//! taqti breakdown is available, length-based direct dispatch otherwise.

use crate::araab::remove_araab;
use crate::length_scanners::{
    length_five_scan, length_four_scan, length_one_scan, length_three_scan, length_two_scan,
};
use crate::models::Word;
use crate::word_analysis::is_vowel_plus_h;

fn strip_inert(word: &str) -> String {
    word.chars()
        .filter(|&c| c != '\u{06BE}' && c != '\u{06BA}')
        .collect()
}

fn scan_by_length(substring: &str) -> String {
    let stripped_len = remove_araab(&strip_inert(substring)).chars().count();
    match stripped_len {
        1 => length_one_scan(substring),
        2 => {
            let stripped: Vec<char> = remove_araab(substring).chars().collect();
            if stripped.first() == Some(&'\u{0622}') {
                "=-".to_string()
            } else if stripped.iter().any(|&c| matches!(c, '\u{06D2}' | '\u{0648}' | '\u{06CC}')) {
                "=".to_string()
            } else {
                "x".to_string()
            }
        }
        3 => length_three_scan(substring),
        4 => length_four_scan(substring),
        n if n >= 5 => length_five_scan(substring),
        _ => String::new(),
    }
}

/// Compute the scansion code for a word using heuristics (§4.3 strategy 2).
pub fn compute_scansion(word: &Word) -> String {
    let word1 = remove_araab(word.word())
        .replace('\u{06BE}', "")
        .replace('\u{06BA}', "");

    let mut code = String::new();

    if word1.chars().count() == 1 {
        return length_one_scan(word.word());
    } else if word1.chars().count() == 2 {
        return length_two_scan(word.word());
    }

    if let Some(last_taqti) = word.taqti.last() {
        let residue = last_taqti
            .trim()
            .replace('\u{06BE}', "")
            .replace('\u{06BA}', "");

        let sub_strings: Vec<String> = residue
            .split(|c| c == '+' || c == ' ')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();

        for sub_string in &sub_strings {
            code.push_str(&scan_by_length(sub_string));
        }

        if let Some(last) = code.chars().last() {
            if last == '=' || last == 'x' {
                if let Some(w1_last) = word1.chars().last() {
                    if is_vowel_plus_h(w1_last) {
                        let is_arabic = word.language.iter().any(|l| l == "\u{0639}\u{0631}\u{0628}\u{06CC}")
                            && !word.modified;
                        let is_persian = word.language.iter().any(|l| l == "\u{0641}\u{0627}\u{0631}\u{0633}\u{06CC}")
                            && w1_last == '\u{0627}'
                            && !word.modified;

                        let replacement = if !word.language.is_empty() && (is_arabic || is_persian) {
                            '='
                        } else {
                            'x'
                        };
                        code.pop();
                        code.push(replacement);
                    }
                }
            }
        }
    } else {
        let n = word1.chars().count();
        code = match n {
            3 => length_three_scan(word.word()),
            4 => length_four_scan(word.word()),
            n if n >= 5 => length_five_scan(word.word()),
            _ => "-".to_string(),
        };
    }

    code
}
