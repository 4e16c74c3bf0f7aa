//! Resolution of a whole form submission.
//!
//! Fields are resolved parents first so a model name is looked up (and
//! created) under the brand chosen in the same submission, and a location
//! under its store.

use std::collections::BTreeMap;

use lapstock_catalog::{CatalogKind, RawValue, ALL_KINDS};
use lapstock_db::operations::{self, OperationError};
use rusqlite::Connection;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::resolver::{resolve_entry, NormalizeError, Resolution};

/// Order in which submission fields are resolved. Parents precede children.
pub const RESOLUTION_ORDER: &[CatalogKind] = ALL_KINDS;

/// Canonical ids for every catalog field of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSubmission {
    ids: BTreeMap<CatalogKind, Option<i64>>,
    created: Vec<(CatalogKind, i64)>,
}

impl ResolvedSubmission {
    /// Resolved id for `kind`; `None` when the field did not resolve.
    pub fn get(&self, kind: CatalogKind) -> Option<i64> {
        self.ids.get(&kind).copied().flatten()
    }

    /// Resolved id by field name (e.g. `"brand_id"`).
    pub fn get_field(&self, field: &str) -> Option<i64> {
        CatalogKind::from_field_name(field).and_then(|k| self.get(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CatalogKind, Option<i64>)> + '_ {
        self.ids.iter().map(|(k, v)| (*k, *v))
    }

    /// Entries created while resolving, in creation order.
    pub fn created(&self) -> &[(CatalogKind, i64)] {
        &self.created
    }

    fn record(&mut self, kind: CatalogKind, resolution: Resolution) {
        if let Resolution::Created(id) = resolution {
            self.created.push((kind, id));
        }
        self.ids.insert(kind, resolution.id());
    }
}

impl Serialize for ResolvedSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (kind, id) in &self.ids {
            map.serialize_entry(kind.field_name(), id)?;
        }
        map.end()
    }
}

/// Resolve every catalog field without managing the transaction.
///
/// Use this inside a caller-owned unit of work. Unknown fields are ignored;
/// missing fields resolve to `None`.
pub fn resolve_fields(
    conn: &Connection,
    fields: &Map<String, Value>,
) -> Result<ResolvedSubmission, NormalizeError> {
    for key in fields.keys() {
        if CatalogKind::from_field_name(key).is_none() {
            log::debug!("Ignoring non-catalog field '{}'", key);
        }
    }

    let mut resolved = ResolvedSubmission::default();
    for &kind in RESOLUTION_ORDER {
        let raw = RawValue::classify_opt(fields.get(kind.field_name()));
        let parent_id = kind.parent_kind().and_then(|p| resolved.get(p));
        let resolution = resolve_entry(conn, kind, &raw, parent_id)?;
        resolved.record(kind, resolution);
    }
    Ok(resolved)
}

/// Resolve a submission as one unit of work.
///
/// Entries created for new names are committed only if every field
/// resolves; on any error nothing is kept.
pub fn resolve_submission(
    conn: &Connection,
    fields: &Map<String, Value>,
) -> Result<ResolvedSubmission, NormalizeError> {
    let tx = operations::begin_write(conn)?;
    let resolved = resolve_fields(&tx, fields)?;
    tx.commit()?;

    if !resolved.created.is_empty() {
        log::info!(
            "Submission resolved with {} new catalog entr{}",
            resolved.created.len(),
            if resolved.created.len() == 1 { "y" } else { "ies" }
        );
    }
    Ok(resolved)
}

/// Resolve a submission and point an inventory row at the results.
///
/// Only fields present in the submission are written to the row. Resolution
/// and the row update commit together.
pub fn update_laptop_from_submission(
    conn: &Connection,
    laptop_id: i64,
    fields: &Map<String, Value>,
) -> Result<ResolvedSubmission, NormalizeError> {
    let tx = operations::begin_write(conn)?;
    if operations::find_laptop(&tx, laptop_id)?.is_none() {
        return Err(OperationError::NotFound {
            entity_type: "laptop".to_string(),
            id: laptop_id.to_string(),
        }
        .into());
    }
    let resolved = resolve_fields(&tx, fields)?;
    for (kind, id) in resolved.iter() {
        if fields.contains_key(kind.field_name()) {
            operations::set_laptop_reference(&tx, laptop_id, kind, id)?;
        }
    }
    tx.commit()?;
    Ok(resolved)
}
