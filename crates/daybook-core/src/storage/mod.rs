mod config;

pub use config::{Config, EventsConfig, ExportConfig, StorageConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding the config and the event snapshot.
///
/// `DAYBOOK_DATA_DIR` wins if set. Otherwise `~/.config/daybook[-dev]/`,
/// with the `-dev` suffix when `DAYBOOK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYBOOK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYBOOK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("daybook-dev")
            } else {
                base_dir.join("daybook")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
