use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

/// Create or migrate the catalog database.
pub(crate) fn run_init(db: Option<PathBuf>) -> Result<(), CliError> {
    let (conn, db_path) = open_catalog(db)?;
    let version = lapstock_db::schema::get_schema_version(&conn)
        .map_err(|e| CliError::database(format!("Failed to read schema version: {}", e)))?;

    log::info!(
        "{}",
        "Catalog database ready".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path:           {}", db_path.display());
    log::info!("  Schema version: {}", version);
    Ok(())
}
