//! Lesson progress summaries.

use crate::db::{HistoryRepository, LessonRepository};
use crate::state::AppState;

use super::CommandError;

/// A lesson as shown in the lesson list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LessonSummary {
    pub id: i64,
    pub total: usize,
    /// Best recorded number of correct words, 0 if never finished.
    pub best_correct: usize,
}

impl LessonSummary {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.best_correct >= self.total
    }
}

/// List all lessons with their best recorded progress.
///
/// `total` counts the words a session over the lesson would hold, so ids of
/// words that no longer exist are left out.
pub fn list_lessons<R>(state: &AppState<R>) -> Result<Vec<LessonSummary>, CommandError>
where
    R: LessonRepository + HistoryRepository,
{
    state
        .repository
        .get_all_lessons()?
        .into_iter()
        .map(|listed| {
            let lesson = state.repository.get_lesson_by_id(listed.id)?;
            let best_correct = state.repository.best_progress(lesson.id)?.unwrap_or(0);
            Ok(LessonSummary {
                id: lesson.id,
                total: lesson.words.len(),
                best_correct,
            })
        })
        .collect()
}
