//! Event dispatch for a running lesson session.
//!
//! [`SessionController`] turns discrete input events into calls on
//! [`LessonSession`]. It makes no decisions of its own beyond the
//! active/exited state.

use crate::error::SessionError;
use crate::session::{LessonSession, SubmitOutcome};
use crate::types::SessionView;
use serde::{Deserialize, Serialize};

/// Input understood by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    Quit,
    MoveRight,
    MoveLeft,
    Submit(String),
    Reveal,
    GoBack,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Active,
    Exited,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Leave the program.
    Quit,
    /// Return to the menu.
    GoBack,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// State may have changed; redraw.
    Updated,
    /// Wrong answer; clear the input buffer.
    Retry,
    /// The cursor moved to another word.
    Moved,
    Exited(ExitReason),
}

/// Drives one [`LessonSession`] from input events.
#[derive(Debug, Clone)]
pub struct SessionController {
    session: LessonSession,
    state: ControllerState,
}

impl SessionController {
    pub fn new(session: LessonSession) -> Self {
        Self {
            session,
            state: ControllerState::Active,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> &LessonSession {
        &self.session
    }

    pub fn into_session(self) -> LessonSession {
        self.session
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    /// Apply one event. Events after exit are rejected with
    /// [`SessionError::Exited`].
    pub fn handle(&mut self, event: SessionEvent) -> Result<EventOutcome, SessionError> {
        if self.state == ControllerState::Exited {
            return Err(SessionError::Exited);
        }

        let outcome = match event {
            SessionEvent::Quit => self.exit(ExitReason::Quit),
            SessionEvent::GoBack => self.exit(ExitReason::GoBack),
            SessionEvent::MoveRight => {
                if self.session.advance() {
                    EventOutcome::Moved
                } else {
                    EventOutcome::Updated
                }
            }
            SessionEvent::MoveLeft => {
                if self.session.retreat() {
                    EventOutcome::Moved
                } else {
                    EventOutcome::Updated
                }
            }
            SessionEvent::Submit(text) => match self.session.submit(&text) {
                SubmitOutcome::Correct => EventOutcome::Updated,
                SubmitOutcome::Retry => EventOutcome::Retry,
            },
            SessionEvent::Reveal => {
                self.session.toggle_reveal();
                EventOutcome::Updated
            }
        };
        Ok(outcome)
    }

    fn exit(&mut self, reason: ExitReason) -> EventOutcome {
        self.state = ControllerState::Exited;
        EventOutcome::Exited(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionOptions, SessionSource, Word};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> SessionController {
        let words = ["uno", "dos"]
            .iter()
            .zip(["one", "two"])
            .enumerate()
            .map(|(i, (es, en))| Word {
                id: i as i64 + 1,
                spanish: es.to_string(),
                english_primary: en.to_string(),
                english_translations: vec![],
                word_type: None,
            })
            .collect();
        let session = LessonSession::new(
            SessionSource::Lesson(1),
            words,
            SessionOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        SessionController::new(session)
    }

    #[test]
    fn starts_active() {
        assert_eq!(controller().state(), ControllerState::Active);
    }

    #[test]
    fn moves_within_bounds() {
        let mut c = controller();
        assert_eq!(c.handle(SessionEvent::MoveLeft), Ok(EventOutcome::Updated));
        assert_eq!(c.handle(SessionEvent::MoveRight), Ok(EventOutcome::Moved));
        assert_eq!(c.handle(SessionEvent::MoveRight), Ok(EventOutcome::Updated));
        assert_eq!(c.session().current_index(), 1);
        assert_eq!(c.handle(SessionEvent::MoveLeft), Ok(EventOutcome::Moved));
        assert_eq!(c.session().current_index(), 0);
    }

    #[test]
    fn submit_reports_retry() {
        let mut c = controller();
        assert_eq!(
            c.handle(SessionEvent::Submit("three".into())),
            Ok(EventOutcome::Retry)
        );
        assert_eq!(
            c.handle(SessionEvent::Submit("one".into())),
            Ok(EventOutcome::Updated)
        );
        assert_eq!(c.view().num_correct, 1);
        assert_eq!(c.state(), ControllerState::Active);
    }

    #[test]
    fn reveal_toggles_without_scoring() {
        let mut c = controller();
        c.handle(SessionEvent::Reveal).unwrap();
        let view = c.view();
        assert!(view.revealed);
        assert!(!view.correct);
        c.handle(SessionEvent::Reveal).unwrap();
        assert!(!c.view().revealed);
    }

    #[test]
    fn quit_and_go_back_exit() {
        let mut c = controller();
        assert_eq!(
            c.handle(SessionEvent::Quit),
            Ok(EventOutcome::Exited(ExitReason::Quit))
        );
        assert_eq!(c.state(), ControllerState::Exited);

        let mut c = controller();
        assert_eq!(
            c.handle(SessionEvent::GoBack),
            Ok(EventOutcome::Exited(ExitReason::GoBack))
        );
        assert_eq!(c.state(), ControllerState::Exited);
    }

    #[test]
    fn no_events_after_exit() {
        let mut c = controller();
        c.handle(SessionEvent::Submit("one".into())).unwrap();
        c.handle(SessionEvent::GoBack).unwrap();

        for event in [
            SessionEvent::Quit,
            SessionEvent::MoveRight,
            SessionEvent::MoveLeft,
            SessionEvent::Submit("two".into()),
            SessionEvent::Reveal,
            SessionEvent::GoBack,
        ] {
            assert_eq!(c.handle(event), Err(SessionError::Exited));
        }
        assert_eq!(c.session().progress(), (1, 2));
        assert_eq!(c.into_session().current_index(), 0);
    }
}
