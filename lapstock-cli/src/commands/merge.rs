use std::path::PathBuf;

use lapstock_catalog::CatalogKind;
use lapstock_normalize::MergeOutcome;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_catalog;

/// Merge a duplicate catalog entry into its canonical entry.
pub(crate) fn run_merge(
    db: Option<PathBuf>,
    kind: CatalogKind,
    source: i64,
    target: i64,
) -> Result<(), CliError> {
    let (conn, _) = open_catalog(db)?;
    let outcome = lapstock_normalize::merge_entries(&conn, kind, source, target)
        .map_err(|e| CliError::catalog(format!("Merge failed: {}", e)))?;
    let MergeOutcome::Merged { moved } = outcome else {
        log::info!("Nothing merged.");
        return Ok(());
    };

    log::info!(
        "  Inventory rows moved: {}",
        moved.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  {} #{} is now inactive", kind, source);
    Ok(())
}
