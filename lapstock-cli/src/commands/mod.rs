pub(crate) mod activation;
pub(crate) mod config;
pub(crate) mod expense;
pub(crate) mod init;
pub(crate) mod list;
pub(crate) mod merge;
pub(crate) mod resolve;
pub(crate) mod search;
pub(crate) mod seed;
pub(crate) mod stats;

use std::path::PathBuf;

use lapstock_db::Connection;

use crate::CliError;

/// Default path for catalog YAML seed data.
pub(crate) fn default_seed_dir() -> PathBuf {
    // Look for catalog/ relative to the current directory
    PathBuf::from("catalog")
}

/// Open (creating if needed) the catalog database at the resolved path.
pub(crate) fn open_catalog(db: Option<PathBuf>) -> Result<(Connection, PathBuf), CliError> {
    let db_path = crate::settings::resolve_db_path(db);
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = lapstock_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open {}: {}", db_path.display(), e)))?;
    log::debug!("Using catalog database {}", db_path.display());
    Ok((conn, db_path))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}
