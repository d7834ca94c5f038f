//! Shared helpers for terminal integration tests.
#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lomo::commands::import::import_content;
use lomo::db::SqliteRepository;
use lomo::state::AppState;
use lomo::tui::App;
use lomo_core::types::SettingsOverride;
use lomo_core::DictionaryFormat;

/// Sample dictionary with a header and `rows` entries.
pub fn sample_tsv(rows: &[(&str, &str)]) -> String {
    let mut content = String::from("Number\tSpanish\tin English\n");
    for (i, (spanish, english)) in rows.iter().enumerate() {
        content.push_str(&format!("{}\t{}\t{}\n", i + 1, spanish, english));
    }
    content
}

/// App over an in-memory database loaded with `rows`, one lesson per
/// `lesson_size` words.
pub fn app_with_words(rows: &[(&str, &str)], lesson_size: usize) -> App<SqliteRepository> {
    let state = AppState::new(
        SqliteRepository::open_in_memory().expect("in-memory database"),
        SettingsOverride {
            lesson_size: Some(lesson_size),
            shuffle_lessons: None,
        },
    );
    import_content(&sample_tsv(rows), DictionaryFormat::Tsv, &state).expect("import sample words");
    App::new(state)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App<SqliteRepository>, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}
