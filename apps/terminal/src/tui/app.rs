//! Screen routing.
//!
//! The router only decides which screen is showing. Quiz decisions belong to
//! the session controller; this module feeds it events and reacts to its
//! outcomes.

use crate::commands::{self, LessonSummary};
use crate::db::Repository;
use crate::state::AppState;
use crossterm::event::KeyEvent;
use lomo_core::{EventOutcome, ExitReason, SessionController, SessionEvent};
use tracing::{info, warn};

use super::input::{lesson_key, menu_action, LessonKey, MenuAction};

/// Longest answer the input line accepts.
pub const INPUT_CHAR_LIMIT: usize = 156;

pub const MAIN_MENU: [&str; 3] = ["Lessons", "Review", "Quit"];

/// A running lesson plus the text the learner is typing.
pub struct LessonScreen {
    pub controller: SessionController,
    pub input: String,
    /// Last answer was wrong.
    pub retry: bool,
}

impl LessonScreen {
    fn new(controller: SessionController) -> Self {
        Self {
            controller,
            input: String::new(),
            retry: false,
        }
    }
}

pub enum Screen {
    MainMenu { cursor: usize },
    LessonMenu { lessons: Vec<LessonSummary>, cursor: usize },
    Lesson(LessonScreen),
}

pub struct App<R> {
    pub state: AppState<R>,
    pub screen: Screen,
    /// One-line message shown under the current screen.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<R: Repository> App<R> {
    pub fn new(state: AppState<R>) -> Self {
        Self {
            state,
            screen: Screen::MainMenu { cursor: 0 },
            status: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match &self.screen {
            Screen::MainMenu { .. } | Screen::LessonMenu { .. } => {
                if let Some(action) = menu_action(&key) {
                    self.handle_menu(action);
                }
            }
            Screen::Lesson(_) => {
                if let Some(key) = lesson_key(&key) {
                    self.handle_lesson(key);
                }
            }
        }
    }

    fn handle_menu(&mut self, action: MenuAction) {
        if action == MenuAction::Quit {
            self.should_quit = true;
            return;
        }

        let selected = match &mut self.screen {
            Screen::MainMenu { cursor } => match action {
                MenuAction::Up => {
                    *cursor = cursor.saturating_sub(1);
                    None
                }
                MenuAction::Down => {
                    *cursor = (*cursor + 1).min(MAIN_MENU.len() - 1);
                    None
                }
                MenuAction::Select => Some(MenuChoice::Main(*cursor)),
                MenuAction::Back | MenuAction::Quit => None,
            },
            Screen::LessonMenu { lessons, cursor } => match action {
                MenuAction::Up => {
                    *cursor = cursor.saturating_sub(1);
                    None
                }
                MenuAction::Down => {
                    *cursor = (*cursor + 1).min(lessons.len().saturating_sub(1));
                    None
                }
                MenuAction::Select => lessons.get(*cursor).map(|l| MenuChoice::Lesson(l.id)),
                MenuAction::Back => Some(MenuChoice::Back),
                MenuAction::Quit => None,
            },
            Screen::Lesson(_) => None,
        };

        match selected {
            Some(MenuChoice::Main(0)) => self.show_lesson_menu(),
            Some(MenuChoice::Main(1)) => {
                self.start(commands::open_review(&self.state));
            }
            Some(MenuChoice::Main(_)) => self.should_quit = true,
            Some(MenuChoice::Lesson(id)) => {
                self.start(commands::open_lesson(id, &self.state));
            }
            Some(MenuChoice::Back) => self.screen = Screen::MainMenu { cursor: 0 },
            None => {}
        }
    }

    fn show_lesson_menu(&mut self) {
        match commands::list_lessons(&self.state) {
            Ok(lessons) => {
                if lessons.is_empty() {
                    self.status = Some("No lessons yet. Run `lomo import <file>` first.".into());
                }
                self.screen = Screen::LessonMenu { lessons, cursor: 0 };
            }
            Err(e) => self.status = Some(e.message),
        }
    }

    fn start(&mut self, opened: Result<SessionController, commands::CommandError>) {
        match opened {
            Ok(controller) => {
                self.status = None;
                self.screen = Screen::Lesson(LessonScreen::new(controller));
            }
            Err(e) => {
                warn!(error = %e, "could not open session");
                self.status = Some(e.message);
            }
        }
    }

    fn handle_lesson(&mut self, key: LessonKey) {
        let Screen::Lesson(screen) = &mut self.screen else {
            return;
        };

        let event = match key {
            LessonKey::Char(c) => {
                if screen.input.chars().count() < INPUT_CHAR_LIMIT {
                    screen.input.push(c);
                }
                return;
            }
            LessonKey::Backspace => {
                screen.input.pop();
                return;
            }
            LessonKey::Quit => SessionEvent::Quit,
            LessonKey::GoBack => SessionEvent::GoBack,
            LessonKey::Right => SessionEvent::MoveRight,
            LessonKey::Left => SessionEvent::MoveLeft,
            LessonKey::Reveal => SessionEvent::Reveal,
            LessonKey::Submit => SessionEvent::Submit(screen.input.clone()),
        };

        let outcome = match screen.controller.handle(event) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.status = Some(e.to_string());
                return;
            }
        };

        match outcome {
            EventOutcome::Updated => screen.retry = false,
            EventOutcome::Retry => {
                screen.retry = true;
                screen.input.clear();
            }
            EventOutcome::Moved => {
                screen.retry = false;
                screen.input.clear();
            }
            EventOutcome::Exited(reason) => self.exit_lesson(reason),
        }
    }

    fn exit_lesson(&mut self, reason: ExitReason) {
        let screen = std::mem::replace(&mut self.screen, Screen::MainMenu { cursor: 0 });
        if let Screen::Lesson(screen) = screen {
            let session = screen.controller.into_session();
            match commands::finish_session(&session, &self.state) {
                Ok(record) => {
                    self.status = Some(format!(
                        "Saved: {}/{} correct",
                        record.num_correct, record.total
                    ));
                }
                Err(e) => {
                    warn!(error = %e, "could not save history");
                    self.status = Some(format!("Could not save progress: {}", e.message));
                }
            }
        }

        if reason == ExitReason::Quit {
            info!("quit from lesson");
            self.should_quit = true;
        }
    }
}

enum MenuChoice {
    Main(usize),
    Lesson(i64),
    Back,
}
