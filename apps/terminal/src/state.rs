//! Application state.

use crate::db::{DbError, SettingsRepository, SqliteRepository};
use lomo_core::types::{Settings, SettingsOverride};

/// State shared by every screen and command.
///
/// The repository is owned here and handed to commands by reference; there
/// is no process-wide database handle.
pub struct AppState<R = SqliteRepository> {
    pub repository: R,
    pub overrides: SettingsOverride,
}

impl<R: SettingsRepository> AppState<R> {
    pub fn new(repository: R, overrides: SettingsOverride) -> Self {
        Self {
            repository,
            overrides,
        }
    }

    /// Stored settings with command line overrides applied.
    pub fn settings(&self) -> Result<Settings, DbError> {
        let stored = self.repository.get_settings()?;
        Ok(Settings::merge(&stored, Some(&self.overrides)))
    }
}
