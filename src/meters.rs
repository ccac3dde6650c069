//! Meter catalogue (component E, external constant).
//!
//! `spec.md` treats the catalogue's content as data owned outside the core:
//! "The static meter catalogue (names, patterns, feet decomposition).
//! Specified as constant tables the core consumes" (§1's out-of-scope
//! list). This module defines the *shape* of that data (ordering is part of
//! the ABI per §9) and ships a small representative catalogue big enough to
//! exercise every code path and the §8 scenarios; production deployments
//! supply the full 128/0/12/11-entry tables through the same structures —
//! see DESIGN.md for why the bundled data is representative rather than
//! exhaustive.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[derive(Clone, Debug)]
pub struct MeterEntry {
    pub id: i32,
    pub name: &'static str,
    /// `-`/`=`/`+`/`/` pattern string; empty for special meters (§4.6).
    pub pattern: &'static str,
    /// Usage-priority bit for regular meters (promotes common meters first).
    pub usage: bool,
}

pub struct MeterCatalogue {
    pub regular: Vec<MeterEntry>,
    pub varied: Vec<MeterEntry>,
    pub rubai: Vec<MeterEntry>,
    pub special: Vec<MeterEntry>,
}

impl MeterCatalogue {
    pub fn num_regular(&self) -> usize {
        self.regular.len()
    }
    pub fn num_varied(&self) -> usize {
        self.varied.len()
    }
    pub fn num_rubai(&self) -> usize {
        self.rubai.len()
    }
    pub fn num_special(&self) -> usize {
        self.special.len()
    }

    /// Special-meter base index, per §4.6.
    pub fn special_base(&self) -> usize {
        self.num_regular() + self.num_varied() + self.num_rubai()
    }

    /// Look up a non-special meter by its global catalogue index.
    pub fn get(&self, idx: usize) -> Option<&MeterEntry> {
        let regular_end = self.num_regular();
        let varied_end = regular_end + self.num_varied();
        let rubai_end = varied_end + self.num_rubai();
        if idx < regular_end {
            self.regular.get(idx)
        } else if idx < varied_end {
            self.varied.get(idx - regular_end)
        } else if idx < rubai_end {
            self.rubai.get(idx - varied_end)
        } else {
            self.special.get(idx - rubai_end)
        }
    }

    pub fn all_non_special_indices(&self) -> Vec<usize> {
        (0..self.num_regular() + self.num_varied() + self.num_rubai()).collect()
    }

    /// First catalogue index whose meter carries the given printable name.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.num_regular() + self.num_varied() + self.num_rubai() {
            if self.get(i).map(|m| m.name) == Some(name) {
                return Some(i);
            }
        }
        None
    }
}

lazy_static! {
    static ref FOOT_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("=-==", "\u{0641}\u{0627}\u{0639}\u{0644}\u{0627}\u{062A}\u{0646}"); // فاعلاتن
        m.insert("=-=-=", "\u{0645}\u{0641}\u{0627}\u{0639}\u{0644}\u{0646}"); // مفاعلن
        m.insert("=--", "\u{0641}\u{0639}\u{0644}\u{0646}"); // فعلن
        m.insert("=-==-", "\u{0645}\u{0633}\u{062A}\u{0641}\u{0639}\u{0644}\u{0646}"); // مستفعلن
        m.insert("--==", "\u{0641}\u{0639}\u{0648}\u{0644}\u{0646}"); // فعولن
        m
    };
}

/// Feet decomposition as a printable string (feet joined with a space).
pub fn afail(pattern: &str) -> String {
    afail_list(pattern)
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered list of (foot-name, foot-code) pairs, split on `/`.
pub fn afail_list(pattern: &str) -> Vec<(String, String)> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|chunk| {
            let name = FOOT_NAMES
                .get(chunk)
                .map(|s| s.to_string())
                .unwrap_or_else(|| chunk.to_string());
            (name, chunk.to_string())
        })
        .collect()
}

/// A small, internally consistent sample catalogue covering a regular
/// meter, a rubai meter and the Hindi/Zamzama special families. See
/// DESIGN.md for provenance.
pub fn sample_catalogue() -> MeterCatalogue {
    let regular = vec![
        MeterEntry {
            id: 0,
            name: "\u{062E}\u{0641}\u{06CC}\u{0641} \u{0645}\u{0633}\u{062F}\u{0633} \u{0645}\u{062E}\u{0628}\u{0648}\u{0646} \u{0645}\u{062D}\u{0630}\u{0648}\u{0641}",
            pattern: "=-==/=-=-=/=--+",
            usage: true,
        },
        MeterEntry {
            id: 1,
            name: "\u{0628}\u{062D}\u{0631} \u{0645}\u{062A}\u{0642}\u{0627}\u{0631}\u{0628}",
            pattern: "=-==-/=-==-/=-==-/=-==-",
            usage: true,
        },
        MeterEntry {
            id: 2,
            name: "\u{0628}\u{062D}\u{0631} \u{0647}\u{0632}\u{062C}",
            pattern: "--==/--==/--==/--==",
            usage: false,
        },
    ];

    let rubai = vec![MeterEntry {
        id: -2,
        name: "\u{0628}\u{062D}\u{0631} \u{0631}\u{0628}\u{0627}\u{0639}\u{06CC}",
        pattern: "=-==-/=-==-/=--/=-=",
        usage: false,
    }];

    let special_names = [
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 1",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 2",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 3",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 4",
        "\u{0627}\u{0635}\u{0644}ی \u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631}",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 5",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 6",
        "\u{06C1}\u{0646}\u{062F}\u{06CC} \u{0645}ی\u{0679}\u{0631} 7",
        "\u{0632}\u{0645}\u{0632}\u{0645}ہ 32",
        "\u{0632}\u{0645}\u{0632}\u{0645}ہ 24",
        "\u{0632}\u{0645}\u{0632}\u{0645}ہ 16",
    ];
    let special = special_names
        .iter()
        .enumerate()
        .map(|(i, &name)| MeterEntry {
            id: -3 - i as i32,
            name,
            pattern: "",
            usage: false,
        })
        .collect();

    MeterCatalogue {
        regular,
        varied: Vec::new(),
        rubai,
        special,
    }
}
