//! Soft deletion: entries are deactivated and reactivated, never removed.

use lapstock_catalog::CatalogKind;
use lapstock_db::operations;
use rusqlite::Connection;

use crate::resolver::NormalizeError;

/// Set an entry's active flag. Returns `false` if the entry doesn't exist.
///
/// Inventory rows referencing the entry are not touched.
pub fn set_active(
    conn: &Connection,
    kind: CatalogKind,
    id: i64,
    active: bool,
) -> Result<bool, NormalizeError> {
    let tx = operations::begin_write(conn)?;
    let Some(entry) = operations::find_entry_by_id(&tx, kind, id)? else {
        return Ok(false);
    };
    operations::set_entry_active(&tx, kind, id, active)?;
    tx.commit()?;

    log::info!(
        "{} {} '{}' (#{})",
        if active { "Activated" } else { "Deactivated" },
        kind,
        entry.name,
        id
    );
    Ok(true)
}
