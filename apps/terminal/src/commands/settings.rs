//! Settings commands.

use crate::db::SettingsRepository;
use crate::state::AppState;
use lomo_core::types::Settings;

use super::CommandError;

/// Get effective settings (stored values with command line overrides).
pub fn get_settings<R: SettingsRepository>(state: &AppState<R>) -> Result<Settings, CommandError> {
    state.settings().map_err(Into::into)
}

/// Persist settings.
pub fn save_settings<R: SettingsRepository>(
    settings: &Settings,
    state: &AppState<R>,
) -> Result<(), CommandError> {
    if settings.lesson_size == 0 {
        return Err(CommandError::new("lesson size must be at least 1"));
    }
    state.repository.save_settings(settings).map_err(Into::into)
}
