//! Operations invoked by the terminal shell and the command line.

pub mod import;
pub mod lesson;
pub mod settings;
pub mod stats;

pub use import::{import_dictionary, ImportResult};
pub use lesson::{finish_session, open_lesson, open_review};
pub use settings::{get_settings, save_settings};
pub use stats::{list_lessons, LessonSummary};

/// Error surfaced to the shell as a message.
#[derive(Debug, serde::Serialize, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<lomo_core::ParseError> for CommandError {
    fn from(e: lomo_core::ParseError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<lomo_core::SessionError> for CommandError {
    fn from(e: lomo_core::SessionError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self { message: e.to_string() }
    }
}
