//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("lesson not found: {0}")]
    LessonNotFound(i64),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
