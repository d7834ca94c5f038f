pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod state;
pub mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Command};
use db::{SettingsRepository, SqliteRepository};
use lomo_core::types::Settings;
use state::AppState;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(&cli.log_path()).context("failed to set up logging")?;

    // Ensure data directory exists
    let db_path = cli.db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    tracing::info!(path = %db_path.display(), "opening database");
    let repository = SqliteRepository::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    let state = AppState::new(repository, cli.overrides());

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => tui::run_tui(state),
        Command::Import { path } => {
            let result = commands::import_dictionary(&path, &state)?;
            println!(
                "Imported {} words into {} lessons",
                result.words,
                result.lessons.len()
            );
            if !result.skipped.is_empty() {
                println!("Skipped malformed lines: {:?}", result.skipped);
            }
            Ok(())
        }
        Command::Lessons => {
            for lesson in commands::list_lessons(&state)? {
                let mark = if lesson.is_complete() { "*" } else { " " };
                println!("{mark} Lesson {} ({}/{})", lesson.id, lesson.best_correct, lesson.total);
            }
            Ok(())
        }
        Command::Config {
            lesson_size,
            shuffle_lessons,
        } => {
            let stored = state.repository.get_settings()?;
            let settings = Settings {
                lesson_size: lesson_size.map_or(stored.lesson_size, |n| n as usize),
                shuffle_lessons: shuffle_lessons.unwrap_or(stored.shuffle_lessons),
            };
            commands::save_settings(&settings, &state)?;
            println!(
                "lesson_size = {}, shuffle_lessons = {}",
                settings.lesson_size, settings.shuffle_lessons
            );
            Ok(())
        }
    }
}
