//! Dictionary import.

use crate::db::{LessonRepository, SettingsRepository, WordRepository};
use crate::state::AppState;
use lomo_core::{partition, DictionaryFormat};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use super::CommandError;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportResult {
    /// Distinct words the file resolved to.
    pub words: usize,
    pub lessons: Vec<i64>,
    /// Skipped rows: TSV line numbers or XML entry positions.
    pub skipped: Vec<usize>,
}

/// Import a dictionary file. `.xml` files are read as the XML dictionary,
/// anything else as a TSV word list.
pub fn import_dictionary<R>(path: &Path, state: &AppState<R>) -> Result<ImportResult, CommandError>
where
    R: WordRepository + LessonRepository + SettingsRepository,
{
    let content = fs::read_to_string(path)?;
    import_content(&content, DictionaryFormat::from_path(path), state)
}

/// Import dictionary content that is already in memory.
///
/// Words are upserted by Spanish text, so re-importing adds glosses instead
/// of duplicating entries. A TSV word list is then grouped into lessons in
/// file order, each word once. The XML dictionary only fills the vocabulary
/// (used by review sessions) and creates no lessons.
pub fn import_content<R>(
    content: &str,
    format: DictionaryFormat,
    state: &AppState<R>,
) -> Result<ImportResult, CommandError>
where
    R: WordRepository + LessonRepository + SettingsRepository,
{
    let parsed = format.parse(content)?;

    let ids = state.repository.import_words(&parsed.words)?;
    let mut seen = HashSet::new();
    let ids: Vec<i64> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
    info!(?format, words = ids.len(), skipped = parsed.skipped.len(), "imported words");

    let lessons = match format {
        DictionaryFormat::Xml => Vec::new(),
        DictionaryFormat::Tsv => {
            let settings = state.settings()?;
            let mut lessons = Vec::new();
            for chunk in partition(&ids, settings.lesson_size) {
                let lesson_id = state.repository.insert_lesson(&chunk)?;
                info!(lesson = lesson_id, words = chunk.len(), "created lesson");
                lessons.push(lesson_id);
            }
            lessons
        }
    };

    Ok(ImportResult {
        words: ids.len(),
        lessons,
        skipped: parsed.skipped,
    })
}
