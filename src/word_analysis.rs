//! Orthographic helpers (component A).
//!
//! Pure functions for word classification. No state, no dependencies beyond
//! [`crate::araab`].

use crate::araab::{is_diacritic, ARABIC_DIACRITICS, IZAFAT, ZER};

const VOWEL_PLUS_H: &[char] = &[
    '\u{0627}', // ا alif
    '\u{06CC}', // ی yeh
    '\u{06D2}', // ے yeh barree
    '\u{0648}', // و waw
    '\u{06C1}', // ہ heh
    '\u{0624}', // ؤ waw with hamza
];

pub fn is_vowel_plus_h(c: char) -> bool {
    VOWEL_PLUS_H.contains(&c)
}

pub fn is_muarrab(word: &str) -> bool {
    word.chars().any(is_diacritic)
}

/// Last character is zer, izafat mark, or U+06C2 (heh goal with hamza above).
pub fn is_izafat(word: &str) -> bool {
    match word.chars().last() {
        Some(c) => c == ZER || c == IZAFAT || c == '\u{06C2}',
        None => false,
    }
}

/// First two base characters both outside `{ا, ی, ے, ہ}`.
pub fn is_consonant_pair(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 {
        return false;
    }
    let is_vowel = |c: char| matches!(c, '\u{0627}' | '\u{06CC}' | '\u{06D2}' | '\u{06C1}');
    !is_vowel(chars[0]) && !is_vowel(chars[1])
}

/// Some base character before the last is noon (`ن`).
pub fn contains_noon_non_final(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 1 {
        return false;
    }
    chars[..chars.len() - 1].iter().any(|&c| c == '\u{0646}')
}

/// Expand shadd into `char + jazm + char + zabar`, trimming a preceding
/// character already consumed by a diacritic.
pub fn remove_shadd(word: &str) -> String {
    if !is_muarrab(word) {
        return word.to_string();
    }
    let chars: Vec<char> = word.chars().collect();
    let mut out: Vec<char> = Vec::new();
    for i in 0..chars.len() {
        if chars[i] == ARABIC_DIACRITICS[0] {
            if i >= 2 {
                if !is_diacritic(chars[i - 2]) {
                    if !is_diacritic(chars[i - 1]) {
                        out.pop();
                        out.push(chars[i - 1]);
                        out.push(ARABIC_DIACRITICS[2]);
                        out.push(chars[i - 1]);
                        out.push(ARABIC_DIACRITICS[8]);
                    } else {
                        out.pop();
                        out.pop();
                        out.push(chars[i - 2]);
                        out.push(ARABIC_DIACRITICS[2]);
                        out.push(chars[i - 2]);
                        out.push(ARABIC_DIACRITICS[8]);
                    }
                } else {
                    out.push(ARABIC_DIACRITICS[2]);
                    out.push(chars[i - 1]);
                    out.push(ARABIC_DIACRITICS[8]);
                }
            } else if i >= 1 {
                out.push(ARABIC_DIACRITICS[2]);
                out.push(chars[i - 1]);
                out.push(ARABIC_DIACRITICS[8]);
            }
        } else {
            out.push(chars[i]);
        }
    }
    out.into_iter().collect()
}
