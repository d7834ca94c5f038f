//! Core vocabulary trainer library used by the terminal app.
//!
//! Provides:
//! - Answer matching against multiple English glosses
//! - Lesson partitioning of an ordered vocabulary
//! - Lesson session state (cursor, correct/revealed flags, progress)
//! - Event dispatch for a running session
//! - Dictionary parsers for TSV word lists and the XML dictionary
//! - Shared types (Word, Lesson, Settings, SessionView)

pub mod error;
pub mod matching;
pub mod navigation;
pub mod parser;
pub mod partition;
pub mod session;
pub mod types;
pub mod xml;

pub use error::{ParseError, Result, SessionError};
pub use matching::{is_correct, match_answer, AnswerMatch, MatchKind};
pub use navigation::{ControllerState, EventOutcome, ExitReason, SessionController, SessionEvent};
pub use parser::{parse, DictionaryFormat, ParsedDictionary};
pub use partition::partition;
pub use session::{shuffle, LessonSession, SessionWord, SubmitOutcome};
pub use types::{
    Lesson, NewWord, SessionOptions, SessionSource, SessionView, Settings, SettingsOverride, Word,
};
pub use xml::parse_xml;
