use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{default_seed_dir, open_catalog};

/// Load YAML seed files into the catalogs.
pub(crate) fn run_seed(db: Option<PathBuf>, dir: Option<PathBuf>) -> Result<(), CliError> {
    let dir = dir.unwrap_or_else(default_seed_dir);
    if !dir.exists() {
        log::warn!("Seed directory {} does not exist", dir.display());
        return Ok(());
    }
    let files = lapstock_catalog::load_seed_dir(&dir)
        .map_err(|e| CliError::config(format!("Failed to load seed files: {}", e)))?;

    if files.is_empty() {
        log::warn!("No seed files found in {}", dir.display());
        return Ok(());
    }

    let (conn, _) = open_catalog(db)?;
    let stats = lapstock_normalize::seed_catalog(&conn, &files)
        .map_err(|e| CliError::catalog(format!("Seeding failed: {}", e)))?;

    log::info!(
        "{}",
        "Catalog seeded".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Files:    {:>6}", files.len());
    log::info!(
        "  Created:  {:>6}",
        stats.created.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!("  Existing: {:>6}", stats.existing);
    if stats.skipped > 0 {
        log::info!(
            "  Skipped:  {:>6}",
            stats.skipped.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}
