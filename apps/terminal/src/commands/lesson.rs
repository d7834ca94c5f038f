//! Lesson session commands.

use crate::db::{HistoryRecord, HistoryRepository, LessonRepository, SettingsRepository, WordRepository};
use crate::state::AppState;
use chrono::Utc;
use lomo_core::{LessonSession, SessionController};
use tracing::info;

use super::CommandError;

/// Open a session over a stored lesson.
pub fn open_lesson<R>(lesson_id: i64, state: &AppState<R>) -> Result<SessionController, CommandError>
where
    R: LessonRepository + SettingsRepository,
{
    let lesson = state.repository.get_lesson_by_id(lesson_id)?;
    let options = state.settings()?.session_options();
    let session = LessonSession::from_lesson(&lesson, options, &mut rand::rng())?;
    info!(lesson = lesson_id, words = session.len(), shuffle = options.shuffle, "opened lesson");
    Ok(SessionController::new(session))
}

/// Open a shuffled review session over the whole vocabulary.
pub fn open_review<R: WordRepository>(state: &AppState<R>) -> Result<SessionController, CommandError> {
    let words = state.repository.get_all_words()?;
    let session = LessonSession::review(words, &mut rand::rng())?;
    info!(words = session.len(), "opened review");
    Ok(SessionController::new(session))
}

/// Record a session's result. Calling this again for the same session
/// replaces the earlier record.
pub fn finish_session<R: HistoryRepository>(
    session: &LessonSession,
    state: &AppState<R>,
) -> Result<HistoryRecord, CommandError> {
    let (num_correct, total) = session.progress();
    let record = HistoryRecord {
        session_id: session.id(),
        lesson_id: session.source().lesson_id(),
        correct_ids: session.correct_word_ids(),
        num_correct,
        total,
        created_at: Utc::now(),
    };
    state.repository.save_history(&record)?;
    info!(session = %record.session_id, lesson = ?record.lesson_id, num_correct, total, "saved history");
    Ok(record)
}
