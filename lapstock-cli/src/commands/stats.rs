use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use lapstock_catalog::ALL_KINDS;

use crate::CliError;

use super::open_catalog;

pub(crate) fn run_stats(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let (conn, db_path) = open_catalog(db)?;
    let counts = lapstock_db::active_counts(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    if json {
        let output = serde_json::to_string_pretty(&counts)
            .map_err(|e| CliError::other(format!("Failed to serialize stats: {}", e)))?;
        println!("{output}");
        return Ok(());
    }

    log::info!(
        "{}",
        "Catalog Statistics (active entries)".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    for &kind in ALL_KINDS {
        log::info!("  {:<18}{:>8}", format!("{}:", kind.display_name()), counts.get(kind));
    }
    log::info!("  {:<18}{:>8}", "Total:", counts.total());
    Ok(())
}
