//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};

/// A dictionary entry as stored by the persistence layer.
///
/// Text fields are never modified by quiz activity; per-session
/// correctness lives in [`crate::session::LessonSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub spanish: String,
    /// Canonical gloss, may be empty.
    pub english_primary: String,
    /// Alternate glosses, may carry annotations such as `"hi (informal)"`.
    pub english_translations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
}

impl Word {
    /// All glosses a learner may answer with: the primary one first, then the
    /// alternates. An empty primary gloss is left out.
    pub fn glosses(&self) -> Vec<String> {
        let mut glosses = Vec::with_capacity(self.english_translations.len() + 1);
        if !self.english_primary.is_empty() {
            glosses.push(self.english_primary.clone());
        }
        glosses.extend(self.english_translations.iter().cloned());
        glosses
    }
}

/// Word parsed from a dictionary file, before it has an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub spanish: String,
    pub english_primary: String,
    pub english_translations: Vec<String>,
    pub word_type: Option<String>,
    /// Line in a TSV file, or entry position in an XML dictionary.
    pub line_number: usize,
}

/// A persisted lesson with its words in stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub word_ids: Vec<i64>,
    /// Populated on load by ID; empty when listing lessons.
    #[serde(default)]
    pub words: Vec<Word>,
}

/// What a session was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "lesson_id")]
pub enum SessionSource {
    Lesson(i64),
    /// The whole vocabulary, always shuffled.
    Review,
}

impl SessionSource {
    pub fn lesson_id(self) -> Option<i64> {
        match self {
            Self::Lesson(id) => Some(id),
            Self::Review => None,
        }
    }
}

/// Options applied when a session is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Shuffle the working copy of a normal lesson. Review sessions ignore
    /// this and always shuffle.
    pub shuffle: bool,
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Words per lesson when partitioning an import.
    pub lesson_size: usize,
    pub shuffle_lessons: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lesson_size: 30,
            shuffle_lessons: false,
        }
    }
}

/// Per-process overrides (command line flags) for stored settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_lessons: Option<bool>,
}

impl Settings {
    /// Merge stored settings with optional overrides.
    pub fn merge(stored: &Settings, overrides: Option<&SettingsOverride>) -> Self {
        match overrides {
            Some(o) => Self {
                lesson_size: o.lesson_size.unwrap_or(stored.lesson_size),
                shuffle_lessons: o.shuffle_lessons.unwrap_or(stored.shuffle_lessons),
            },
            None => stored.clone(),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            shuffle: self.shuffle_lessons,
        }
    }
}

/// Plain-data snapshot of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Zero-based cursor.
    pub position: usize,
    pub total: usize,
    pub num_correct: usize,
    pub spanish: String,
    pub correct: bool,
    pub revealed: bool,
    /// Set only once the word is answered or revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(primary: &str, alternates: &[&str]) -> Word {
        Word {
            id: 1,
            spanish: "hola".to_string(),
            english_primary: primary.to_string(),
            english_translations: alternates.iter().map(|s| s.to_string()).collect(),
            word_type: None,
        }
    }

    #[test]
    fn glosses_put_primary_first() {
        let w = word("hello", &["hi (informal)"]);
        assert_eq!(w.glosses(), vec!["hello", "hi (informal)"]);
    }

    #[test]
    fn glosses_skip_empty_primary() {
        let w = word("", &["hi"]);
        assert_eq!(w.glosses(), vec!["hi"]);
    }

    #[test]
    fn settings_merge_prefers_overrides() {
        let stored = Settings::default();
        let overrides = SettingsOverride {
            lesson_size: Some(10),
            shuffle_lessons: None,
        };
        let merged = Settings::merge(&stored, Some(&overrides));
        assert_eq!(merged.lesson_size, 10);
        assert!(!merged.shuffle_lessons);
        assert_eq!(Settings::merge(&stored, None), stored);
    }

    #[test]
    fn shuffle_defaults_off() {
        assert!(!Settings::default().session_options().shuffle);
        assert!(!SessionOptions::default().shuffle);
    }
}
