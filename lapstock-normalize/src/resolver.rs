//! Get-or-create resolution of a single catalog value.
//!
//! A value is either an existing id (returned untouched), free text (looked
//! up by name, created when unseen), or no selection. Resolution does not
//! commit: callers run it inside their own unit of work so a later failure
//! rolls back every entry created along the way.

use lapstock_catalog::{CatalogKind, RawValue};
use lapstock_db::operations::{self, OperationError};
use rusqlite::Connection;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Conflicting {kind} entry for '{name}': created concurrently but not visible")]
    Conflict { kind: CatalogKind, name: String },
}

/// Outcome of resolving one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The value was empty; nothing was looked up or created.
    Unselected,
    /// An existing id, either given directly or matched by name.
    Existing(i64),
    /// A new entry was created for an unseen name.
    Created(i64),
}

impl Resolution {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Unselected => None,
            Self::Existing(id) | Self::Created(id) => Some(*id),
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Resolve a raw JSON form value to a catalog id, creating the entry if needed.
///
/// `parent_id` scopes Model lookups to a brand and Location lookups to a
/// store; it is ignored for other kinds.
pub fn resolve(
    conn: &Connection,
    kind: CatalogKind,
    value: &Value,
    parent_id: Option<i64>,
) -> Result<Option<i64>, NormalizeError> {
    let raw = RawValue::classify(value);
    Ok(resolve_entry(conn, kind, &raw, parent_id)?.id())
}

/// Resolve a classified value, reporting whether an entry was created.
///
/// Identifiers are not checked for existence here; the inventory foreign
/// keys are the source of truth for those.
pub fn resolve_entry(
    conn: &Connection,
    kind: CatalogKind,
    raw: &RawValue,
    parent_id: Option<i64>,
) -> Result<Resolution, NormalizeError> {
    let name = match raw {
        RawValue::Empty => return Ok(Resolution::Unselected),
        RawValue::Identifier(id) => return Ok(Resolution::Existing(*id)),
        RawValue::FreeText(text) => text.trim(),
    };
    if name.is_empty() {
        return Ok(Resolution::Unselected);
    }

    let parent_id = kind.descriptor().parent.and(parent_id);

    if let Some(entry) = operations::find_entry_by_name(conn, kind, name, parent_id)? {
        log::debug!("{} '{}' matched existing id {}", kind, name, entry.id);
        return Ok(Resolution::Existing(entry.id));
    }

    match operations::insert_entry(conn, kind, name, parent_id) {
        Ok(id) => {
            log::info!("Created {} '{}' (id {})", kind, name, id);
            Ok(Resolution::Created(id))
        }
        Err(e) if e.is_unique_violation() => {
            // Someone else inserted the same name after our lookup.
            log::debug!("{} '{}' hit the uniqueness index, retrying lookup", kind, name);
            match operations::find_entry_by_name(conn, kind, name, parent_id)? {
                Some(entry) => Ok(Resolution::Existing(entry.id)),
                None => Err(NormalizeError::Conflict {
                    kind,
                    name: name.to_string(),
                }),
            }
        }
        Err(e) => Err(e.into()),
    }
}
