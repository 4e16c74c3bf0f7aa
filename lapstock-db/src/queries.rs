//! Read queries for the catalog database.
//!
//! Provides active counts, paginated listings, global search, and
//! reference counts.

use std::collections::BTreeMap;

use lapstock_catalog::types::*;
use rusqlite::{params, Connection};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::operations::{entry_columns, row_to_entry, OperationError};

/// Default number of entries per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hits per kind when searching every catalog at once.
const SEARCH_ALL_LIMIT: u32 = 5;

/// Hits when searching a single catalog.
const SEARCH_ONE_LIMIT: u32 = 20;

// ── Statistics ──────────────────────────────────────────────────────────────

/// Number of active entries per catalog kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveCounts {
    pub counts: BTreeMap<CatalogKind, i64>,
}

impl ActiveCounts {
    pub fn get(&self, kind: CatalogKind) -> i64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }
}

impl Serialize for ActiveCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (kind, count) in &self.counts {
            map.serialize_entry(kind.plural_key(), count)?;
        }
        map.end()
    }
}

/// Count active entries in every catalog. Inactive entries are never counted.
pub fn active_counts(conn: &Connection) -> Result<ActiveCounts, OperationError> {
    let mut counts = BTreeMap::new();
    for &kind in ALL_KINDS {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE is_active = 1",
            kind.descriptor().table
        );
        let count: i64 = conn.query_row(&sql, [], |r| r.get(0))?;
        counts.insert(kind, count);
    }
    Ok(ActiveCounts { counts })
}

/// Number of inventory rows referencing a catalog entry.
pub fn count_references(
    conn: &Connection,
    kind: CatalogKind,
    id: i64,
) -> Result<i64, OperationError> {
    let sql = format!(
        "SELECT COUNT(*) FROM laptops WHERE {} = ?1",
        kind.field_name()
    );
    let count: i64 = conn.query_row(&sql, params![id], |r| r.get(0))?;
    Ok(count)
}

// ── Listings ────────────────────────────────────────────────────────────────

/// Filter for [`list_active_entries`].
#[derive(Debug, Clone)]
pub struct EntryFilter {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Restrict models to a brand or locations to a store. Ignored for
    /// top-level kinds.
    pub parent_id: Option<i64>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            search: None,
            parent_id: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of active entries.
#[derive(Debug, Clone, Serialize)]
pub struct EntryPage {
    pub entries: Vec<CatalogEntry>,
    pub total: i64,
    /// Whether another page follows this one.
    pub more: bool,
}

/// List active entries of a kind, ordered by name.
pub fn list_active_entries(
    conn: &Connection,
    kind: CatalogKind,
    filter: &EntryFilter,
) -> Result<EntryPage, OperationError> {
    let desc = kind.descriptor();
    let mut clauses = vec!["is_active = 1".to_string()];
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let (Some(scope), Some(parent)) = (desc.parent, filter.parent_id) {
        param_values.push(Box::new(parent));
        clauses.push(format!("{} = ?{}", scope.column, param_values.len()));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        param_values.push(Box::new(like_pattern(search)));
        clauses.push(format!("name LIKE ?{} ESCAPE '\\'", param_values.len()));
    }
    let where_sql = clauses.join(" AND ");

    let params: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(|v| v.as_ref()).collect();

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {} WHERE {where_sql}", desc.table),
        params.as_slice(),
        |r| r.get(0),
    )?;

    let page_size = filter.page_size.max(1);
    let offset = i64::from(filter.page.max(1) - 1) * i64::from(page_size);
    let sql = format!(
        "SELECT {} FROM {} WHERE {where_sql}
         ORDER BY name COLLATE NOCASE LIMIT {page_size} OFFSET {offset}",
        entry_columns(kind),
        desc.table
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params.as_slice(), |row| row_to_entry(kind, row))?;
    let entries = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(EntryPage {
        entries,
        total,
        more: offset + i64::from(page_size) < total,
    })
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Search active entries by name across catalogs.
///
/// With `kind` set, only that catalog is searched (up to 20 hits). Otherwise
/// every catalog is searched with up to 5 hits each, and every kind appears
/// in the result even with no hits. A blank query returns an empty map.
pub fn search_catalogs(
    conn: &Connection,
    query: &str,
    kind: Option<CatalogKind>,
) -> Result<BTreeMap<CatalogKind, Vec<CatalogEntry>>, OperationError> {
    let mut results = BTreeMap::new();
    let query = query.trim();
    if query.is_empty() {
        return Ok(results);
    }

    let (kinds, limit): (Vec<CatalogKind>, u32) = match kind {
        Some(k) => (vec![k], SEARCH_ONE_LIMIT),
        None => (ALL_KINDS.to_vec(), SEARCH_ALL_LIMIT),
    };
    let pattern = like_pattern(query);

    for kind in kinds {
        let sql = format!(
            "SELECT {} FROM {} WHERE is_active = 1 AND name LIKE ?1 ESCAPE '\\'
             ORDER BY name COLLATE NOCASE LIMIT {limit}",
            entry_columns(kind),
            kind.descriptor().table
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![pattern], |row| row_to_entry(kind, row))?;
        results.insert(kind, rows.collect::<Result<Vec<_>, _>>()?);
    }

    Ok(results)
}

/// Substring LIKE pattern with `%`, `_` and `\` escaped.
fn like_pattern(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('%');
    for c in text.chars() {
        match c {
            '%' => result.push_str("\\%"),
            '_' => result.push_str("\\_"),
            '\\' => result.push_str("\\\\"),
            _ => result.push(c),
        }
    }
    result.push('%');
    result
}
