pub mod config;
pub mod event;
pub mod export;
pub mod month;

use daybook_core::{Config, JsonFileAdapter, Planner};

/// Open the planner on the configured snapshot file.
///
/// An unreadable snapshot is reported and the planner starts empty.
pub fn open_planner() -> Result<(Config, Planner<JsonFileAdapter>), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let planner = Planner::open(JsonFileAdapter::new(config.snapshot_path()?));
    if let Some(e) = planner.load_error() {
        eprintln!("warning: {e}; starting with no events");
    }
    Ok((config, planner))
}

/// Report a save failure without failing the command.
pub fn warn_unsaved(save_error: Option<&daybook_core::PersistenceError>) {
    if let Some(e) = save_error {
        eprintln!("warning: change kept in memory only: {e}");
    }
}
