//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema for the local word database.
pub const SCHEMA: &str = r#"
-- Dictionary entries
CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    spanish TEXT NOT NULL UNIQUE,
    english_primary TEXT NOT NULL DEFAULT '',
    english_translations TEXT NOT NULL DEFAULT '[]',
    word_type TEXT
);

-- Lessons reference words by id, in display order
CREATE TABLE IF NOT EXISTS lessons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word_ids TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- One row per finished session
CREATE TABLE IF NOT EXISTS history (
    session_id TEXT PRIMARY KEY,
    lesson_id INTEGER REFERENCES lessons(id),
    correct_ids TEXT NOT NULL,
    num_correct INTEGER NOT NULL,
    total INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

-- User settings
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    lesson_size INTEGER NOT NULL DEFAULT 30,
    shuffle_lessons INTEGER NOT NULL DEFAULT 0
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_history_lesson ON history(lesson_id);
"#;

/// Initialize settings if not exists.
pub const INIT_SETTINGS: &str = r#"
INSERT OR IGNORE INTO settings (id) VALUES (1);
"#;
