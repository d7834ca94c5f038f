//! Command line configuration.

use clap::{Parser, Subcommand};
use lomo_core::types::SettingsOverride;
use std::path::PathBuf;

const APP_DIR: &str = "lomo";

#[derive(Debug, Parser)]
#[command(name = "lomo", version, about = "Spanish-English vocabulary trainer for the terminal")]
pub struct Cli {
    /// Path of the word database.
    #[arg(long, env = "LOMO_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Shuffle words in normal lessons (review sessions always shuffle).
    #[arg(long, global = true)]
    pub shuffle: bool,

    /// Words per lesson when importing.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub lesson_size: Option<u32>,

    /// Where to write logs.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive trainer (default).
    Run,
    /// Import a dictionary. TSV word lists also create lessons.
    Import {
        /// `.xml` dictionary, or a TSV file with a `Number<TAB>Spanish<TAB>in English` header.
        path: PathBuf,
    },
    /// Print lessons with their best recorded progress.
    Lessons,
    /// Store settings in the database.
    Config {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        lesson_size: Option<u32>,
        #[arg(long)]
        shuffle_lessons: Option<bool>,
    },
}

impl Cli {
    /// Settings given on the command line, applied on top of stored ones.
    pub fn overrides(&self) -> SettingsOverride {
        SettingsOverride {
            lesson_size: self.lesson_size.map(|n| n as usize),
            shuffle_lessons: self.shuffle.then_some(true),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(default_db_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| data_dir().join("lomo.log"))
    }
}

fn data_dir() -> PathBuf {
    // Use the local data directory, fall back to the current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_db_path() -> PathBuf {
    data_dir().join("words.db")
}
