//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::{DateTime, Utc};
use lomo_core::types::{Lesson, NewWord, Settings, Word};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for word operations.
pub trait WordRepository {
    fn get_word(&self, id: i64) -> Result<Option<Word>>;
    fn get_all_words(&self) -> Result<Vec<Word>>;
    /// Insert a word, or append its glosses to the existing entry with the
    /// same Spanish text. Returns the word's id.
    fn upsert_word(&self, word: &NewWord) -> Result<i64>;
    fn count_words(&self) -> Result<usize>;

    /// Upsert a batch of words, returning their ids in input order.
    fn import_words(&self, words: &[NewWord]) -> Result<Vec<i64>> {
        words.iter().map(|word| self.upsert_word(word)).collect()
    }
}

/// Repository for lesson operations.
pub trait LessonRepository {
    /// Load a lesson with its words in stored order.
    fn get_lesson_by_id(&self, id: i64) -> Result<Lesson>;
    /// All lessons, without their words.
    fn get_all_lessons(&self) -> Result<Vec<Lesson>>;
    fn insert_lesson(&self, word_ids: &[i64]) -> Result<i64>;
}

/// Result of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub session_id: Uuid,
    /// `None` for review sessions.
    pub lesson_id: Option<i64>,
    pub correct_ids: Vec<i64>,
    pub num_correct: usize,
    pub total: usize,
    pub created_at: DateTime<Utc>,
}

/// Repository for session history.
pub trait HistoryRepository {
    /// Store a session result. Saving the same session again replaces the
    /// earlier row.
    fn save_history(&self, record: &HistoryRecord) -> Result<()>;
    fn get_history_for_lesson(&self, lesson_id: i64) -> Result<Vec<HistoryRecord>>;
    /// Highest number of correct words recorded for a lesson.
    fn best_progress(&self, lesson_id: i64) -> Result<Option<usize>>;
}

/// Repository for settings operations.
pub trait SettingsRepository {
    fn get_settings(&self) -> Result<Settings>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// Everything the trainer reads and writes.
pub trait Repository: WordRepository + LessonRepository + HistoryRepository + SettingsRepository {}

impl<T> Repository for T where
    T: WordRepository + LessonRepository + HistoryRepository + SettingsRepository
{
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_SETTINGS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn row_to_word(row: &rusqlite::Row) -> rusqlite::Result<Word> {
        let translations: String = row.get(3)?;
        Ok(Word {
            id: row.get(0)?,
            spanish: row.get(1)?,
            english_primary: row.get(2)?,
            english_translations: decode_translations(&translations),
            word_type: row.get(4)?,
        })
    }

    fn find_word_by_spanish(&self, spanish: &str) -> Result<Option<Word>> {
        self.conn
            .query_row(
                "SELECT id, spanish, english_primary, english_translations, word_type FROM words WHERE spanish = ?1",
                params![spanish],
                Self::row_to_word,
            )
            .optional()
            .map_err(Into::into)
    }
}

/// Translations are stored as a JSON array. Older rows hold a
/// comma-separated list; anything else reads as no translations.
fn decode_translations(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(text) {
        Ok(list) => list,
        Err(_) if !text.trim_start().starts_with('[') => lomo_core::parser::split_glosses(text),
        Err(e) => {
            warn!(error = %e, "unreadable translations, treating as empty");
            Vec::new()
        }
    }
}

fn decode_ids(text: &str) -> Result<Vec<i64>> {
    serde_json::from_str(text).map_err(|e| DbError::InvalidData(format!("word id list: {e}")))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("timestamp {text:?}: {e}")))
}

impl WordRepository for SqliteRepository {
    fn get_word(&self, id: i64) -> Result<Option<Word>> {
        self.conn
            .query_row(
                "SELECT id, spanish, english_primary, english_translations, word_type FROM words WHERE id = ?1",
                params![id],
                Self::row_to_word,
            )
            .optional()
            .map_err(Into::into)
    }

    fn get_all_words(&self) -> Result<Vec<Word>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, spanish, english_primary, english_translations, word_type FROM words ORDER BY id",
        )?;

        let words = stmt
            .query_map([], Self::row_to_word)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(words)
    }

    fn upsert_word(&self, word: &NewWord) -> Result<i64> {
        match self.find_word_by_spanish(&word.spanish)? {
            Some(existing) => {
                let mut translations = existing.english_translations;
                let before = translations.len();
                for gloss in &word.english_translations {
                    if !translations.contains(gloss) {
                        translations.push(gloss.clone());
                    }
                }
                let fill_type = existing.word_type.is_none() && word.word_type.is_some();
                if translations.len() != before || fill_type {
                    self.conn.execute(
                        "UPDATE words SET english_translations = ?1, word_type = COALESCE(word_type, ?2) WHERE id = ?3",
                        params![serde_json::to_string(&translations)?, word.word_type, existing.id],
                    )?;
                    debug!(spanish = %word.spanish, added = translations.len() - before, "appended glosses");
                }
                Ok(existing.id)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO words (spanish, english_primary, english_translations, word_type) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        word.spanish,
                        word.english_primary,
                        serde_json::to_string(&word.english_translations)?,
                        word.word_type
                    ],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    fn count_words(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Runs the whole batch in one transaction.
    fn import_words(&self, words: &[NewWord]) -> Result<Vec<i64>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = words
            .iter()
            .map(|word| self.upsert_word(word))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }
}

impl LessonRepository for SqliteRepository {
    fn get_lesson_by_id(&self, id: i64) -> Result<Lesson> {
        let word_ids: String = self
            .conn
            .query_row(
                "SELECT word_ids FROM lessons WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(DbError::LessonNotFound(id))?;
        let word_ids = decode_ids(&word_ids)?;

        let mut words = Vec::with_capacity(word_ids.len());
        for word_id in &word_ids {
            match self.get_word(*word_id)? {
                Some(word) => words.push(word),
                None => warn!(lesson = id, word = word_id, "lesson references missing word"),
            }
        }

        Ok(Lesson {
            id,
            word_ids,
            words,
        })
    }

    fn get_all_lessons(&self) -> Result<Vec<Lesson>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, word_ids FROM lessons ORDER BY id")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, word_ids)| {
                Ok(Lesson {
                    id,
                    word_ids: decode_ids(&word_ids)?,
                    words: Vec::new(),
                })
            })
            .collect()
    }

    fn insert_lesson(&self, word_ids: &[i64]) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO lessons (word_ids, created_at) VALUES (?1, ?2)",
            params![serde_json::to_string(word_ids)?, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl HistoryRepository for SqliteRepository {
    fn save_history(&self, record: &HistoryRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO history (session_id, lesson_id, correct_ids, num_correct, total, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.session_id.to_string(),
                record.lesson_id,
                serde_json::to_string(&record.correct_ids)?,
                record.num_correct as i64,
                record.total as i64,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn get_history_for_lesson(&self, lesson_id: i64) -> Result<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT session_id, lesson_id, correct_ids, num_correct, total, created_at
             FROM history WHERE lesson_id = ?1 ORDER BY created_at",
        )?;

        let rows = stmt
            .query_map(params![lesson_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<i64>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(session_id, lesson_id, correct_ids, num_correct, total, created_at)| {
                Ok(HistoryRecord {
                    session_id: Uuid::parse_str(&session_id)
                        .map_err(|e| DbError::InvalidData(format!("session id: {e}")))?,
                    lesson_id,
                    correct_ids: decode_ids(&correct_ids)?,
                    num_correct: num_correct as usize,
                    total: total as usize,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    fn best_progress(&self, lesson_id: i64) -> Result<Option<usize>> {
        let best: Option<i64> = self.conn.query_row(
            "SELECT MAX(num_correct) FROM history WHERE lesson_id = ?1",
            params![lesson_id],
            |row| row.get(0),
        )?;
        Ok(best.map(|n| n as usize))
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<Settings> {
        self.conn
            .query_row(
                "SELECT lesson_size, shuffle_lessons FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(Settings {
                        lesson_size: row.get::<_, i64>(0)?.max(1) as usize,
                        shuffle_lessons: row.get(1)?,
                    })
                },
            )
            .map_err(Into::into)
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.conn.execute(
            "UPDATE settings SET lesson_size = ?1, shuffle_lessons = ?2 WHERE id = 1",
            params![settings.lesson_size as i64, settings.shuffle_lessons],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_word(spanish: &str, english: &[&str]) -> NewWord {
        NewWord {
            spanish: spanish.to_string(),
            english_primary: english.join(", "),
            english_translations: english.iter().map(|s| s.to_string()).collect(),
            word_type: None,
            line_number: 1,
        }
    }

    fn repo() -> SqliteRepository {
        SqliteRepository::open_in_memory().unwrap()
    }

    #[test]
    fn upsert_inserts_new_word() {
        let repo = repo();
        let id = repo.upsert_word(&new_word("casa", &["house", "home"])).unwrap();
        let word = repo.get_word(id).unwrap().unwrap();
        assert_eq!(word.spanish, "casa");
        assert_eq!(word.english_primary, "house, home");
        assert_eq!(word.english_translations, vec!["house", "home"]);
        assert_eq!(repo.count_words().unwrap(), 1);
    }

    #[test]
    fn upsert_appends_new_glosses() {
        let repo = repo();
        let first = repo.upsert_word(&new_word("casa", &["house"])).unwrap();
        let second = repo.upsert_word(&new_word("casa", &["home", "house"])).unwrap();
        assert_eq!(first, second);

        let word = repo.get_word(first).unwrap().unwrap();
        assert_eq!(word.english_translations, vec!["house", "home"]);
        assert_eq!(word.english_primary, "house");
        assert_eq!(repo.count_words().unwrap(), 1);
    }

    #[test]
    fn upsert_keeps_first_word_type() {
        let repo = repo();
        let untyped = repo.upsert_word(&new_word("correr", &["to run"])).unwrap();
        let typed = NewWord {
            word_type: Some("v".to_string()),
            ..new_word("correr", &["to run"])
        };
        repo.upsert_word(&typed).unwrap();
        assert_eq!(repo.get_word(untyped).unwrap().unwrap().word_type.as_deref(), Some("v"));

        let other = NewWord {
            word_type: Some("n".to_string()),
            ..new_word("correr", &["to jog"])
        };
        repo.upsert_word(&other).unwrap();
        let word = repo.get_word(untyped).unwrap().unwrap();
        assert_eq!(word.word_type.as_deref(), Some("v"));
        assert_eq!(word.english_translations, vec!["to run", "to jog"]);
    }

    #[test]
    fn import_words_returns_ids_in_order() {
        let repo = repo();
        let ids = repo
            .import_words(&[new_word("uno", &["one"]), new_word("dos", &["two"]), new_word("uno", &["1"])])
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], ids[2]);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn lesson_words_keep_stored_order() {
        let repo = repo();
        let a = repo.upsert_word(&new_word("a", &["x"])).unwrap();
        let b = repo.upsert_word(&new_word("b", &["y"])).unwrap();
        let lesson_id = repo.insert_lesson(&[b, a]).unwrap();

        let lesson = repo.get_lesson_by_id(lesson_id).unwrap();
        let spanish: Vec<&str> = lesson.words.iter().map(|w| w.spanish.as_str()).collect();
        assert_eq!(spanish, vec!["b", "a"]);
        assert_eq!(lesson.word_ids, vec![b, a]);
    }

    #[test]
    fn lesson_skips_missing_words() {
        let repo = repo();
        let a = repo.upsert_word(&new_word("a", &["x"])).unwrap();
        let lesson_id = repo.insert_lesson(&[a, 999]).unwrap();
        let lesson = repo.get_lesson_by_id(lesson_id).unwrap();
        assert_eq!(lesson.words.len(), 1);
    }

    #[test]
    fn missing_lesson_is_error() {
        assert!(matches!(repo().get_lesson_by_id(42), Err(DbError::LessonNotFound(42))));
    }

    #[test]
    fn all_lessons_have_no_words_loaded() {
        let repo = repo();
        let a = repo.upsert_word(&new_word("a", &["x"])).unwrap();
        repo.insert_lesson(&[a]).unwrap();
        repo.insert_lesson(&[a]).unwrap();
        let lessons = repo.get_all_lessons().unwrap();
        assert_eq!(lessons.len(), 2);
        assert!(lessons.iter().all(|l| l.words.is_empty() && l.word_ids == vec![a]));
    }

    #[test]
    fn history_save_is_idempotent() {
        let repo = repo();
        let a = repo.upsert_word(&new_word("a", &["x"])).unwrap();
        let lesson_id = repo.insert_lesson(&[a]).unwrap();
        let record = HistoryRecord {
            session_id: Uuid::new_v4(),
            lesson_id: Some(lesson_id),
            correct_ids: vec![a],
            num_correct: 1,
            total: 1,
            created_at: Utc::now(),
        };

        repo.save_history(&record).unwrap();
        repo.save_history(&record).unwrap();

        let history = repo.get_history_for_lesson(lesson_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].correct_ids, vec![a]);
        assert_eq!(history[0].session_id, record.session_id);
        assert_eq!(repo.best_progress(lesson_id).unwrap(), Some(1));
    }

    #[test]
    fn unreadable_history_timestamp_is_invalid_data() {
        let repo = repo();
        repo.conn
            .execute(
                "INSERT INTO history (session_id, lesson_id, correct_ids, num_correct, total, created_at)
                 VALUES (?1, 1, '[]', 0, 3, 'yesterday')",
                params![Uuid::new_v4().to_string()],
            )
            .unwrap();

        let err = repo.get_history_for_lesson(1).unwrap_err();
        assert!(matches!(err, DbError::InvalidData(ref msg) if msg.contains("yesterday")));
    }

    #[test]
    fn best_progress_takes_maximum() {
        let repo = repo();
        assert_eq!(repo.best_progress(1).unwrap(), None);
        for n in [2, 5, 3] {
            repo.save_history(&HistoryRecord {
                session_id: Uuid::new_v4(),
                lesson_id: Some(1),
                correct_ids: vec![],
                num_correct: n,
                total: 5,
                created_at: Utc::now(),
            })
            .unwrap();
        }
        assert_eq!(repo.best_progress(1).unwrap(), Some(5));
    }

    #[test]
    fn settings_round_trip() {
        let repo = repo();
        assert_eq!(repo.get_settings().unwrap(), Settings::default());
        let settings = Settings {
            lesson_size: 12,
            shuffle_lessons: true,
        };
        repo.save_settings(&settings).unwrap();
        assert_eq!(repo.get_settings().unwrap(), settings);
    }

    #[test]
    fn legacy_comma_separated_translations() {
        assert_eq!(decode_translations("to go, to leave"), vec!["to go", "to leave"]);
        assert_eq!(decode_translations("[\"a\"]"), vec!["a"]);
        assert!(decode_translations("[broken").is_empty());
        assert!(decode_translations("").is_empty());
    }

    #[test]
    fn reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.db");
        {
            let repo = SqliteRepository::open(&path).unwrap();
            repo.upsert_word(&new_word("a", &["x"])).unwrap();
        }
        let repo = SqliteRepository::open(&path).unwrap();
        assert_eq!(repo.count_words().unwrap(), 1);
    }
}
