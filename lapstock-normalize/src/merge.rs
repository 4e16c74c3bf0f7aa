//! Merging duplicate catalog entries.
//!
//! A merge moves every inventory reference from a source entry to a target
//! entry of the same kind, then retires the source. Retired entries stay in
//! the table so historical rows keep resolving.

use lapstock_catalog::CatalogKind;
use lapstock_db::operations;
use rusqlite::Connection;

use crate::resolver::NormalizeError;

/// Result of a merge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The source was retired; `moved` inventory rows now point at the target.
    Merged { moved: usize },
    /// Source and target are the same entry. Nothing changed.
    SameEntry,
    /// The source or the target does not exist. Nothing changed.
    NotFound,
}

impl MergeOutcome {
    /// Inventory rows moved, 0 when nothing was merged.
    pub fn moved(&self) -> usize {
        match self {
            Self::Merged { moved } => *moved,
            Self::SameEntry | Self::NotFound => 0,
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

/// Merge `source_id` into `target_id`.
///
/// The existence checks, reassignment and deactivation run in one write
/// unit, so the outcome reflects exactly what was committed.
pub fn merge_entries(
    conn: &Connection,
    kind: CatalogKind,
    source_id: i64,
    target_id: i64,
) -> Result<MergeOutcome, NormalizeError> {
    if source_id == target_id {
        log::warn!(
            "Refusing to merge {} #{} into itself; entry left active",
            kind,
            source_id
        );
        return Ok(MergeOutcome::SameEntry);
    }

    let tx = operations::begin_write(conn)?;

    let source = operations::find_entry_by_id(&tx, kind, source_id)?;
    let target = operations::find_entry_by_id(&tx, kind, target_id)?;
    let (Some(source), Some(target)) = (source, target) else {
        log::warn!(
            "Cannot merge {} #{} into #{}: entry not found",
            kind,
            source_id,
            target_id
        );
        return Ok(MergeOutcome::NotFound);
    };

    let moved = operations::reassign_references(&tx, kind, source.id, target.id)?;
    operations::set_entry_active(&tx, kind, source.id, false)?;
    tx.commit()?;

    log::info!(
        "Merged {} '{}' (#{}) into '{}' (#{}): {} inventory row(s) moved",
        kind,
        source.name,
        source.id,
        target.name,
        target.id,
        moved
    );
    Ok(MergeOutcome::Merged { moved })
}
