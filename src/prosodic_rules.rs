//! Prosodic rules (component D): four ordered, line-level rewrite passes.
//!
//! Order is load-bearing (§5: "reordering changes observed output and is a
//! defect"): Al-prefix, then izafat, then atf, then grafting. Each mutates
//! candidate codes of the [`Word`]s already on the line in place.

use crate::models::Line;
use crate::word_analysis::{is_consonant_pair, is_izafat, is_vowel_plus_h};

const ALIF: char = '\u{0627}';
const ALIF_MADD: char = '\u{0622}';
const WAW: char = '\u{0648}';
const YEH: char = '\u{06CC}';
const ZABAR: char = '\u{064E}';
const PAISH: char = '\u{064F}';

fn last_stripped_char(word: &crate::models::Word) -> Option<char> {
    word.word_no_araab().chars().last()
}

/// §4.4.1: `ا ل`-prefixed words elide the preceding word's vowel ending.
pub fn apply_al_prefix_rule(line: &mut Line) {
    for i in 0..line.words_list.len().saturating_sub(1) {
        let next_starts_with_al = {
            let next_stripped = line.words_list[i + 1].word_no_araab();
            let mut chars = next_stripped.chars();
            matches!((chars.next(), chars.next()), (Some(ALIF), Some('\u{0644}')))
        };
        if !next_starts_with_al {
            continue;
        }
        let prev_ends_zabar_or_paish = {
            let prev = &line.words_list[i];
            prev.araab_mask()
                .chars()
                .last()
                .map(|c| c == ZABAR || c == PAISH)
                .unwrap_or(false)
        };
        if !prev_ends_zabar_or_paish {
            continue;
        }

        let last = last_stripped_char(&line.words_list[i]);
        let prev_len = line.words_list[i].length();
        let prev_consonant_pair = is_consonant_pair(line.words_list[i].word_no_araab());

        for code in line.words_list[i].code.iter_mut() {
            if code.is_empty() {
                continue;
            }
            let mut chars: Vec<char> = code.chars().collect();
            let last_sym = *chars.last().unwrap();
            if last.map(is_vowel_plus_h).unwrap_or(false) {
                let new_last = if last_sym == '=' || last_sym == 'x' { '=' } else { '=' };
                *chars.last_mut().unwrap() = new_last;
            } else if prev_len == 2 && prev_consonant_pair {
                chars.push('=');
            } else if last_sym == '=' || last_sym == 'x' {
                *chars.last_mut().unwrap() = '-';
                chars.push('=');
            } else {
                *chars.last_mut().unwrap() = '=';
            }
            *code = chars.into_iter().collect();
        }
        for m in line.words_list[i].muarrab.iter_mut() {
            m.push('\u{0644}');
        }

        for code in line.words_list[i + 1].code.iter_mut() {
            if !code.is_empty() {
                code.remove(0);
            }
        }
        for m in line.words_list[i + 1].muarrab.iter_mut() {
            let drop: String = m.chars().take(2).collect();
            *m = m.chars().skip(drop.chars().count()).collect();
        }
    }
}

/// §4.4.2: izafat marker rewrites the word's own final syllable.
pub fn apply_izafat_rule(line: &mut Line) {
    for word in line.words_list.iter_mut() {
        if !is_izafat(word.word()) {
            continue;
        }
        let last = last_stripped_char(word);
        let has_db_ids = !word.id.is_empty();

        if has_db_ids && word.length() == 2 {
            for code in word.code.iter_mut() {
                *code = "xx".to_string();
            }
            continue;
        }

        // Words without a database id always take the generic `-x`/`x`
        // rewrite below, regardless of their last letter: the alif/waw/yeh
        // sub-cases only apply to words the database actually identified.
        let mut new_codes = Vec::new();
        for code in word.code.iter_mut() {
            if code.is_empty() {
                continue;
            }
            let last_sym = code.chars().last().unwrap();
            if has_db_ids && (last_sym == '=' || last_sym == 'x') {
                match last {
                    Some(ALIF) | Some(WAW) => {
                        let mut chars: Vec<char> = code.chars().collect();
                        *chars.last_mut().unwrap() = '=';
                        chars.push('x');
                        *code = chars.into_iter().collect();
                    }
                    Some(YEH) => {
                        let mut extra = code.clone();
                        extra.push('x');
                        new_codes.push(extra);
                        let mut chars: Vec<char> = code.chars().collect();
                        *chars.last_mut().unwrap() = '-';
                        chars.push('x');
                        *code = chars.into_iter().collect();
                    }
                    _ => {
                        let mut chars: Vec<char> = code.chars().collect();
                        *chars.last_mut().unwrap() = '-';
                        chars.push('x');
                        *code = chars.into_iter().collect();
                    }
                }
            } else if last_sym == '=' || last_sym == 'x' {
                let mut chars: Vec<char> = code.chars().collect();
                *chars.last_mut().unwrap() = '-';
                chars.push('x');
                *code = chars.into_iter().collect();
            } else if last_sym == '-' {
                let mut chars: Vec<char> = code.chars().collect();
                *chars.last_mut().unwrap() = 'x';
                *code = chars.into_iter().collect();
            }
        }
        word.code.extend(new_codes);
    }
}

/// §4.4.3: the atf conjunction `و` clears its own codes (not removes —
/// §9's "clear vs remove") and rewrites the preceding word's final syllable.
pub fn apply_atf_rule(line: &mut Line) {
    for i in 1..line.words_list.len() {
        if line.words_list[i].word_no_araab() != "\u{0648}" {
            continue;
        }
        let last = last_stripped_char(&line.words_list[i - 1]);
        let prev_len = line.words_list[i - 1].length();
        let prev_consonant_pair = is_consonant_pair(line.words_list[i - 1].word_no_araab());

        match last {
            Some(ALIF) | Some(YEH) => {
                // do nothing
            }
            _ => {
                if matches!(last, Some('\u{06D2}') | Some(WAW))
                    || last.map(is_vowel_plus_h).unwrap_or(false)
                {
                    for code in line.words_list[i - 1].code.iter_mut() {
                        if code.is_empty() {
                            continue;
                        }
                        let mut chars: Vec<char> = code.chars().collect();
                        let last_sym = *chars.last().unwrap();
                        if last_sym == '=' || last_sym == 'x' {
                            *chars.last_mut().unwrap() = '-';
                            chars.push('x');
                        } else {
                            *chars.last_mut().unwrap() = 'x';
                        }
                        *code = chars.into_iter().collect();
                    }
                } else if prev_len == 2 && prev_consonant_pair {
                    for code in line.words_list[i - 1].code.iter_mut() {
                        *code = "xx".to_string();
                    }
                } else {
                    for code in line.words_list[i - 1].code.iter_mut() {
                        if code.is_empty() {
                            continue;
                        }
                        let mut chars: Vec<char> = code.chars().collect();
                        let last_sym = *chars.last().unwrap();
                        if last_sym == '=' || last_sym == 'x' {
                            *chars.last_mut().unwrap() = '-';
                            chars.push('x');
                        } else {
                            *chars.last_mut().unwrap() = 'x';
                        }
                        *code = chars.into_iter().collect();
                    }
                }
                for code in line.words_list[i].code.iter_mut() {
                    code.clear();
                }
            }
        }
    }
}

/// §4.4.4: append elided-reading graft codes for vowel-initial next words.
pub fn apply_grafting_rule(line: &mut Line) {
    for i in 1..line.words_list.len() {
        let next_starts_alif = matches!(
            line.words_list[i].word_no_araab().chars().next(),
            Some(ALIF) | Some(ALIF_MADD)
        );
        if !next_starts_alif {
            continue;
        }
        let prev_ends_vowel_h = last_stripped_char(&line.words_list[i - 1])
            .map(is_vowel_plus_h)
            .unwrap_or(false);
        if prev_ends_vowel_h {
            continue;
        }

        let mut grafts = Vec::new();
        for code in &line.words_list[i - 1].code {
            if code.is_empty() {
                continue;
            }
            let last_sym = code.chars().last().unwrap();
            if last_sym == '=' {
                let mut g: String = code.chars().take(code.chars().count() - 1).collect();
                g.push('-');
                grafts.push(g);
            } else if last_sym == '-' {
                let g: String = code.chars().take(code.chars().count() - 1).collect();
                grafts.push(g);
            }
        }
        line.words_list[i - 1].graft_codes.extend(grafts);
    }
}

/// Apply all four passes in the mandated order.
pub fn apply_all(line: &mut Line) {
    apply_al_prefix_rule(line);
    apply_izafat_rule(line);
    apply_atf_rule(line);
    apply_grafting_rule(line);
}
