//! Drawing. Reads app state, never changes it.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use ratatui::Frame;

use super::app::{App, LessonScreen, Screen, MAIN_MENU};
use crate::commands::LessonSummary;
use lomo_core::SessionSource;

const PURPLE: Color = Color::Rgb(0x71, 0x68, 0xf2);
const HEADER: Color = Color::Rgb(0x92, 0x8c, 0xed);
const INPUT: Color = Color::Rgb(0xdb, 0x9a, 0x3d);
const INPUT_WRONG: Color = Color::Rgb(0x57, 0x3c, 0x17);
const TARGET: Color = Color::Rgb(0x03, 0xfc, 0xc6);
const CORRECT: Color = Color::Rgb(0x03, 0xfc, 0x56);

pub fn draw<R>(frame: &mut Frame, app: &App<R>) {
    let [body, status, help] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let help_text = match &app.screen {
        Screen::MainMenu { cursor } => {
            draw_main_menu(frame, body, *cursor);
            "up/down to move, enter to select, q to quit"
        }
        Screen::LessonMenu { lessons, cursor } => {
            draw_lesson_menu(frame, body, lessons, *cursor);
            "up/down to move, enter to open, esc to go back, q to quit"
        }
        Screen::Lesson(screen) => {
            draw_lesson(frame, body, screen);
            "delete to see answer, left/right to navigate, ctrl+b or esc to go back, ctrl+c to quit"
        }
    };

    if let Some(message) = &app.status {
        frame.render_widget(Paragraph::new(message.as_str()).fg(INPUT), status);
    }
    frame.render_widget(Paragraph::new(help_text).fg(HEADER), help);
}

fn frame_block(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(PURPLE))
        .title(Span::styled(title, Style::new().fg(HEADER).add_modifier(Modifier::BOLD)))
}

fn cursor_line(selected: bool, text: String, style: Style) -> Line<'static> {
    let marker = if selected { "=> " } else { "   " };
    Line::from(vec![Span::raw(marker), Span::styled(text, style)])
}

fn draw_main_menu(frame: &mut Frame, area: Rect, cursor: usize) {
    let mut lines = vec![
        Line::from("Welcome to lomo").fg(INPUT).bold(),
        Line::from("What would you like to do?"),
        Line::default(),
    ];
    lines.extend(
        MAIN_MENU
            .iter()
            .enumerate()
            .map(|(i, item)| cursor_line(i == cursor, item.to_string(), Style::new().fg(TARGET))),
    );

    frame.render_widget(Paragraph::new(lines).block(frame_block(" lomo ")), area);
}

fn draw_lesson_menu(frame: &mut Frame, area: Rect, lessons: &[LessonSummary], cursor: usize) {
    let mut lines = vec![Line::from("Select a lesson:"), Line::default()];
    lines.extend(lessons.iter().enumerate().map(|(i, lesson)| {
        let style = if lesson.is_complete() {
            Style::new().fg(CORRECT)
        } else {
            Style::new()
        };
        cursor_line(
            i == cursor,
            format!("Lesson {} ({}/{})", lesson.id, lesson.best_correct, lesson.total),
            style,
        )
    }));

    frame.render_widget(Paragraph::new(lines).block(frame_block(" Lessons ")), area);
}

fn draw_lesson(frame: &mut Frame, area: Rect, screen: &LessonScreen) {
    let view = screen.controller.view();
    let title = match screen.controller.session().source() {
        SessionSource::Lesson(id) => format!(" Lesson {id} "),
        SessionSource::Review => " Review ".to_string(),
    };

    let mut lines = vec![
        Line::from(format!(
            "Word {}/{}  -  {}/{} correct",
            view.position + 1,
            view.total,
            view.num_correct,
            view.total
        ))
        .fg(HEADER),
        Line::default(),
        Line::from(vec![
            Span::raw("Spanish: "),
            Span::styled(view.spanish.clone(), Style::new().fg(TARGET).bold()),
        ]),
        input_line(screen),
        Line::default(),
    ];

    if let Some(translations) = &view.translations {
        let color = if view.correct { CORRECT } else { INPUT };
        if view.correct {
            lines.push(Line::from("Correct!").fg(color).bold());
        }
        lines.push(Line::from("Translations:").fg(color));
        lines.extend(
            translations
                .iter()
                .map(|t| Line::from(format!("    {t}")).fg(color)),
        );
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(frame_block(&title)),
        area,
    );
}

fn input_line(screen: &LessonScreen) -> Line<'static> {
    let prompt = Span::styled("> ", Style::new().fg(INPUT));
    if screen.input.is_empty() && screen.retry {
        Line::from(vec![prompt, Span::styled("try again!", Style::new().fg(INPUT_WRONG))])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(screen.input.clone(), Style::new().fg(INPUT)),
        ])
    }
}
