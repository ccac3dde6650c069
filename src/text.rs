//! Preprocessing collaborator (component J): line and word level cleanup.
//!
//! `spec.md` specifies this only as an external `preprocess(line) -> words`
//! function; the behaviour here follows the donor implementation's actual
//! cleanup rules so that the scenarios in §8 reproduce exactly.

const STRIP_CHARS: &[char] = &[
    ',', '"', '*', '\'', '-', '\u{06D4}', '\u{060C}', '?', '!', '\u{0614}', '\u{061F}', '\u{2018}',
    '(', ')', '\u{061B}', ';', '\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}', '.', '\u{0612}',
    '\u{060E}', '=', '\u{0611}', '\u{0613}', '\u{FDFD}', '\u{FDFA}', ':', '\u{2019}',
];

/// Remove punctuation and zero-width noise characters from a line.
pub fn clean_line(line: &str) -> String {
    line.chars().filter(|c| !STRIP_CHARS.contains(c)).collect()
}

/// Apply character-level replacements to a single word:
/// - trailing `ئ` becomes `یٔ`
/// - `ا` + madd (U+0653) becomes `آ`
/// - U+06C2 becomes `ہ` + izafat (U+0654)
pub fn clean_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let mut cleaned = if word.ends_with('\u{0626}') {
        let mut s = word[..word.len() - '\u{0626}'.len_utf8()].to_string();
        s.push_str("\u{06CC}\u{0654}");
        s
    } else {
        word.to_string()
    };

    cleaned = cleaned.replace("\u{0627}\u{0653}", "\u{0622}");
    cleaned = cleaned.replace('\u{06C2}', "\u{06C1}\u{0654}");
    cleaned
}

const STOP_CONSONANTS: &[char] = &[
    '\u{06A9}', // ک
    '\u{06AF}', // گ
    '\u{062A}', // ت
    '\u{062F}', // د
    '\u{067E}', // پ
    '\u{0628}', // ب
    '\u{0686}', // چ
    '\u{062C}', // ج
];

/// Split words containing noon (`ن`/`ں`) immediately followed by a stop
/// consonant into two pieces, e.g. `جھانکتے` -> `جھانک`, `تے`.
pub fn handle_noon_followed_by_stop(words: Vec<String>) -> Vec<String> {
    let mut result = Vec::with_capacity(words.len());
    for word in words {
        if word.is_empty() {
            result.push(word);
            continue;
        }
        let chars: Vec<char> = word.chars().collect();
        let mut split_at = None;
        for i in 0..chars.len().saturating_sub(1) {
            if (chars[i] == '\u{0646}' || chars[i] == '\u{06BA}')
                && STOP_CONSONANTS.contains(&chars[i + 1])
            {
                split_at = Some(i + 2);
                break;
            }
        }
        match split_at {
            Some(pos) => {
                let first: String = chars[..pos].iter().collect();
                let second: String = chars[pos..].iter().collect();
                result.push(first);
                if !second.is_empty() {
                    result.push(second);
                }
            }
            None => result.push(word),
        }
    }
    result
}
