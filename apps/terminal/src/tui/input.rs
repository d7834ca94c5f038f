//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Menu screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Select,
    Back,
    Quit,
}

/// Lesson screen actions. Text editing stays with the screen; everything
/// else becomes a session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKey {
    Quit,
    GoBack,
    Right,
    Left,
    Submit,
    Reveal,
    Char(char),
    Backspace,
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

pub fn menu_action(key: &KeyEvent) -> Option<MenuAction> {
    if is_ctrl(key, 'c') {
        return Some(MenuAction::Quit);
    }
    match key.code {
        KeyCode::Char('q') => Some(MenuAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(MenuAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(MenuAction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuAction::Select),
        KeyCode::Esc | KeyCode::Char('b') => Some(MenuAction::Back),
        _ => None,
    }
}

pub fn lesson_key(key: &KeyEvent) -> Option<LessonKey> {
    if is_ctrl(key, 'c') {
        return Some(LessonKey::Quit);
    }
    if is_ctrl(key, 'b') {
        return Some(LessonKey::GoBack);
    }
    match key.code {
        KeyCode::Esc => Some(LessonKey::GoBack),
        KeyCode::Right => Some(LessonKey::Right),
        KeyCode::Left => Some(LessonKey::Left),
        KeyCode::Enter => Some(LessonKey::Submit),
        KeyCode::Delete => Some(LessonKey::Reveal),
        KeyCode::Backspace => Some(LessonKey::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(LessonKey::Char(c)),
        _ => None,
    }
}
