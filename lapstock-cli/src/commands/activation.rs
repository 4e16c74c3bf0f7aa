use std::path::PathBuf;

use lapstock_catalog::CatalogKind;

use crate::CliError;

use super::open_catalog;

/// Activate or deactivate a catalog entry.
pub(crate) fn run_set_active(
    db: Option<PathBuf>,
    kind: CatalogKind,
    id: i64,
    active: bool,
) -> Result<(), CliError> {
    let (conn, _) = open_catalog(db)?;
    let found = lapstock_normalize::set_active(&conn, kind, id, active)
        .map_err(|e| CliError::catalog(e.to_string()))?;

    if !found {
        log::warn!("No {} with id {}", kind, id);
        return Ok(());
    }

    let references = lapstock_db::count_references(&conn, kind, id)
        .map_err(|e| CliError::database(e.to_string()))?;
    log::info!(
        "{} #{} {}",
        kind.display_name(),
        id,
        if active { "activated" } else { "deactivated" }
    );
    if !active && references > 0 {
        log::info!("  Still referenced by {} inventory rows", references);
    }
    Ok(())
}
