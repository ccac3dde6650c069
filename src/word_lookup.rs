//! Database word lookup (strategy 1 of §4.3's cascade).
//!
//! The lookup oracle is external per CONCURRENCY & RESOURCE MODEL: "the core
//! opens transient read-only connections per lookup and must tolerate
//! transient failures by catching them, returning the word untouched, and
//! falling back to heuristics." [`WordLookup`] is the seam; a SQLite-backed
//! implementation is provided behind the `sqlite` feature, matching the
//! schema of EXTERNAL INTERFACES.

use crate::araab::remove_araab;
use crate::code_assignment::compute_scansion;
use crate::error::ScansionError;
use crate::models::Word;

/// Read-only lookup oracle. The sole suspension point in an async port
/// (§5): implementations targeting async runtimes should make this the
/// single `await` point.
pub trait WordLookup {
    fn find_word(&self, word: &mut Word) -> Result<(), ScansionError>;
}

/// A lookup oracle that never finds anything; useful for heuristic-only
/// configurations and tests.
pub struct NullWordLookup;

impl WordLookup for NullWordLookup {
    fn find_word(&self, _word: &mut Word) -> Result<(), ScansionError> {
        Ok(())
    }
}

#[cfg(feature = "sqlite")]
pub mod sqlite_lookup {
    use super::*;
    use rusqlite::{Connection, OpenFlags};

    pub struct SqliteWordLookup {
        db_path: String,
    }

    impl SqliteWordLookup {
        pub fn new(db_path: impl Into<String>) -> Self {
            SqliteWordLookup {
                db_path: db_path.into(),
            }
        }

        fn connect(&self) -> rusqlite::Result<Connection> {
            Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        }
    }

    impl WordLookup for SqliteWordLookup {
        /// Mirrors the reference `findWord()`: exceptions, then mastertable
        /// (base + 12 " N"-suffixed variants, cascading into variations when
        /// `isVaried`), then plurals, then variations.
        fn find_word(&self, word: &mut Word) -> Result<(), ScansionError> {
            let search_word = remove_araab(word.word());
            let conn = self
                .connect()
                .map_err(|e| ScansionError::WordLookup(e.to_string()))?;

            let mut stmt = conn
                .prepare("SELECT id, Taqti, Taqti2, Taqti3 FROM exceptions WHERE word LIKE ?1")
                .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
            let mut rows = stmt
                .query([&search_word])
                .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
            let mut found_exception = false;
            while let Some(row) = rows.next().map_err(|e| ScansionError::WordLookup(e.to_string()))? {
                found_exception = true;
                let id: i64 = row.get(0).unwrap_or(0);
                word.id.push(id * -1);
                for col in 1..=3 {
                    let taqti: Option<String> = row.get(col).unwrap_or(None);
                    if let Some(t) = taqti {
                        let t = t.replace(' ', "");
                        if !t.is_empty() {
                            word.code.push(t);
                        }
                    }
                }
            }
            drop(rows);
            drop(stmt);
            if found_exception {
                return Ok(());
            }

            let placeholders: Vec<String> = (1..=12).map(|i| format!("{} {}", search_word, i)).collect();
            let mut query = "SELECT ID, Word, Muarrab, Taqti, Language, isVaried FROM mastertable WHERE word LIKE ?1".to_string();
            for i in 0..12 {
                query.push_str(&format!(" OR word LIKE ?{}", i + 2));
            }
            let mut stmt = conn
                .prepare(&query)
                .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
            let mut params: Vec<&dyn rusqlite::ToSql> = vec![&search_word];
            for p in &placeholders {
                params.push(p);
            }
            let mut rows = stmt
                .query(params.as_slice())
                .map_err(|e| ScansionError::WordLookup(e.to_string()))?;

            let mut found_master = false;
            while let Some(row) = rows.next().map_err(|e| ScansionError::WordLookup(e.to_string()))? {
                found_master = true;
                let id: i64 = row.get(0).unwrap_or(0);
                let muarrab: String = row.get::<_, Option<String>>(2).unwrap_or(None).unwrap_or_default();
                let taqti: String = row.get::<_, Option<String>>(3).unwrap_or(None).unwrap_or_default();
                let language: String = row.get::<_, Option<String>>(4).unwrap_or(None).unwrap_or_default();
                let is_varied: bool = row.get::<_, Option<bool>>(5).unwrap_or(None).unwrap_or(false);

                word.id.push(id);
                word.muarrab.push(muarrab.trim().to_string());
                word.taqti.push(taqti.trim().to_string());
                word.language.push(language);
                word.is_varied.push(is_varied);
                let code = compute_scansion(word);
                word.code.push(code);
            }
            drop(rows);
            drop(stmt);

            if found_master {
                if word.is_varied.first().copied().unwrap_or(false) {
                    let mut stmt = conn
                        .prepare("SELECT ID, Muarrab, Taqti FROM variations WHERE id = ?1")
                        .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
                    let mut vrows = stmt
                        .query([word.id[0]])
                        .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
                    while let Some(row) = vrows.next().map_err(|e| ScansionError::WordLookup(e.to_string()))? {
                        let id: i64 = row.get(0).unwrap_or(0);
                        let muarrab: String = row.get::<_, Option<String>>(1).unwrap_or(None).unwrap_or_default();
                        let taqti: String = row.get::<_, Option<String>>(2).unwrap_or(None).unwrap_or_default();
                        word.id.push(id);
                        word.muarrab.push(muarrab.trim().to_string());
                        word.taqti.push(taqti.trim().to_string());
                        let code = compute_scansion(word);
                        word.code.push(code);
                    }
                }
                return Ok(());
            }

            for (table, id_col) in [("plurals", "ID"), ("variations", "ID")] {
                let q = format!(
                    "SELECT {id_col}, Muarrab, Taqti FROM {table} WHERE Word LIKE ?1",
                    id_col = id_col,
                    table = table
                );
                let mut stmt = conn
                    .prepare(&q)
                    .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
                let mut rows = stmt
                    .query([&search_word])
                    .map_err(|e| ScansionError::WordLookup(e.to_string()))?;
                let mut found = false;
                while let Some(row) = rows.next().map_err(|e| ScansionError::WordLookup(e.to_string()))? {
                    found = true;
                    let id: i64 = row.get(0).unwrap_or(0);
                    let muarrab: String = row.get::<_, Option<String>>(1).unwrap_or(None).unwrap_or_default();
                    let taqti: String = row.get::<_, Option<String>>(2).unwrap_or(None).unwrap_or_default();
                    word.id.push(id);
                    word.muarrab.push(muarrab.trim().to_string());
                    word.taqti.push(taqti.trim().to_string());
                    let code = compute_scansion(word);
                    word.code.push(code);
                }
                if found {
                    return Ok(());
                }
            }

            Ok(())
        }
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite_lookup::SqliteWordLookup;
