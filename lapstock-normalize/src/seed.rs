//! Seeding catalogs from YAML seed files.
//!
//! Every name goes through the same get-or-create path as form input, so
//! seeding is idempotent and never duplicates an existing entry.

use lapstock_catalog::{RawValue, SeedFile};
use lapstock_db::operations;
use rusqlite::Connection;

use crate::resolver::{resolve_entry, NormalizeError, Resolution};

/// Statistics from a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub created: usize,
    pub existing: usize,
    /// Children listed under a kind that has no child collection.
    pub skipped: usize,
}

impl SeedStats {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Created(_) => self.created += 1,
            Resolution::Existing(_) => self.existing += 1,
            Resolution::Unselected => self.skipped += 1,
        }
    }
}

/// Seed the catalogs from parsed seed files in one transaction.
pub fn seed_catalog(conn: &Connection, files: &[SeedFile]) -> Result<SeedStats, NormalizeError> {
    let mut stats = SeedStats::default();
    let tx = operations::begin_write(conn)?;

    for file in files {
        for entry in &file.entries {
            let parent = resolve_entry(&tx, file.kind, &RawValue::from_text(entry.name()), None)?;
            stats.record(parent);

            if entry.children().is_empty() {
                continue;
            }
            let Some(child_kind) = file.kind.child_kind() else {
                log::warn!(
                    "Skipping {} children of {} '{}': {} entries have no child catalog",
                    entry.children().len(),
                    file.kind,
                    entry.name(),
                    file.kind
                );
                stats.skipped += entry.children().len();
                continue;
            };
            let Some(parent_id) = parent.id() else {
                stats.skipped += entry.children().len();
                continue;
            };
            for child in entry.children() {
                let resolution =
                    resolve_entry(&tx, child_kind, &RawValue::from_text(child), Some(parent_id))?;
                stats.record(resolution);
            }
        }
    }

    tx.commit()?;
    log::info!(
        "Seeded catalogs: {} created, {} existing, {} skipped",
        stats.created,
        stats.existing,
        stats.skipped
    );
    Ok(stats)
}
