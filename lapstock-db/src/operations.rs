//! Catalog store operations: lookups, inserts and updates over the catalog
//! tables and the inventory table.
//!
//! Table and column names come from the static [`CatalogDescriptor`] of each
//! kind and are interpolated into SQL; every value is bound as a parameter.
//!
//! [`CatalogDescriptor`]: lapstock_catalog::CatalogDescriptor

use lapstock_catalog::types::*;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    /// Whether this error is a uniqueness-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => {
                e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

/// Begin a write unit of work.
///
/// The write lock is taken at `BEGIN IMMEDIATE`, so a get-or-create lookup
/// inside the transaction always sees the latest committed names. A second
/// writer waits on the connection's busy timeout.
pub fn begin_write(conn: &Connection) -> Result<Transaction<'_>, OperationError> {
    Ok(Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?)
}

// ── Catalog Entry Operations ────────────────────────────────────────────────

/// Column list for selecting a catalog entry of `kind`.
pub(crate) fn entry_columns(kind: CatalogKind) -> String {
    let parent = kind.descriptor().parent.map_or("NULL", |p| p.column);
    format!("id, name, is_active, {parent}, created_at, updated_at")
}

pub(crate) fn row_to_entry(kind: CatalogKind, row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: row.get(0)?,
        kind,
        name: row.get(1)?,
        is_active: row.get(2)?,
        parent_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Find a catalog entry by name (case-insensitive, surrounding whitespace ignored).
///
/// For parent-scoped kinds, `parent_id` restricts the match to that parent;
/// without one, an entry under any parent matches. `parent_id` is ignored
/// for top-level kinds. Inactive entries are found too.
pub fn find_entry_by_name(
    conn: &Connection,
    kind: CatalogKind,
    name: &str,
    parent_id: Option<i64>,
) -> Result<Option<CatalogEntry>, OperationError> {
    let desc = kind.descriptor();
    let columns = entry_columns(kind);
    let name = name.trim();

    let result = match (desc.parent, parent_id) {
        (Some(scope), Some(parent)) => {
            let sql = format!(
                "SELECT {columns} FROM {} WHERE name = ?1 COLLATE NOCASE AND {} = ?2
                 ORDER BY id LIMIT 1",
                desc.table, scope.column
            );
            conn.query_row(&sql, params![name, parent], |row| row_to_entry(kind, row))
                .optional()?
        }
        _ => {
            let sql = format!(
                "SELECT {columns} FROM {} WHERE name = ?1 COLLATE NOCASE ORDER BY id LIMIT 1",
                desc.table
            );
            conn.query_row(&sql, params![name], |row| row_to_entry(kind, row))
                .optional()?
        }
    };
    Ok(result)
}

/// Find a catalog entry by id.
pub fn find_entry_by_id(
    conn: &Connection,
    kind: CatalogKind,
    id: i64,
) -> Result<Option<CatalogEntry>, OperationError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        entry_columns(kind),
        kind.descriptor().table
    );
    let entry = conn
        .query_row(&sql, params![id], |row| row_to_entry(kind, row))
        .optional()?;
    Ok(entry)
}

/// Insert a new active catalog entry. Returns the generated ID.
///
/// The name is stored trimmed. `parent_id` is only written for
/// parent-scoped kinds.
pub fn insert_entry(
    conn: &Connection,
    kind: CatalogKind,
    name: &str,
    parent_id: Option<i64>,
) -> Result<i64, OperationError> {
    let desc = kind.descriptor();
    let name = name.trim();
    match desc.parent {
        Some(scope) => {
            let sql = format!(
                "INSERT INTO {} (name, {}, is_active) VALUES (?1, ?2, 1)",
                desc.table, scope.column
            );
            conn.execute(&sql, params![name, parent_id])?;
        }
        None => {
            let sql = format!("INSERT INTO {} (name, is_active) VALUES (?1, 1)", desc.table);
            conn.execute(&sql, params![name])?;
        }
    }
    Ok(conn.last_insert_rowid())
}

/// Set the active flag of an entry. Returns `false` if the entry doesn't exist.
pub fn set_entry_active(
    conn: &Connection,
    kind: CatalogKind,
    id: i64,
    active: bool,
) -> Result<bool, OperationError> {
    let sql = format!(
        "UPDATE {} SET is_active = ?2, updated_at = datetime('now') WHERE id = ?1",
        kind.descriptor().table
    );
    let changed = conn.execute(&sql, params![id, active])?;
    Ok(changed > 0)
}

/// Rewrite every inventory reference to `old_id` so it points at `new_id`.
///
/// This is a bulk update: inventory `updated_at` stamps are left alone.
/// Returns the number of inventory rows changed.
pub fn reassign_references(
    conn: &Connection,
    kind: CatalogKind,
    old_id: i64,
    new_id: i64,
) -> Result<usize, OperationError> {
    let column = kind.field_name();
    let sql = format!("UPDATE laptops SET {column} = ?2 WHERE {column} = ?1");
    let changed = conn.execute(&sql, params![old_id, new_id])?;
    Ok(changed)
}

// ── Inventory Operations ────────────────────────────────────────────────────

const LAPTOP_COLUMNS: &str = "id, sku, display_name, brand_id, model_id, processor_id, os_id,
     screen_id, graphics_card_id, storage_id, ram_id, store_id, location_id, supplier_id,
     created_at, updated_at";

/// Insert an inventory row. Returns the generated ID.
pub fn insert_laptop(conn: &Connection, laptop: &Laptop) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO laptops (sku, display_name, brand_id, model_id, processor_id, os_id,
             screen_id, graphics_card_id, storage_id, ram_id, store_id, location_id, supplier_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            laptop.sku,
            laptop.display_name,
            laptop.brand_id,
            laptop.model_id,
            laptop.processor_id,
            laptop.os_id,
            laptop.screen_id,
            laptop.graphics_card_id,
            laptop.storage_id,
            laptop.ram_id,
            laptop.store_id,
            laptop.location_id,
            laptop.supplier_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Find an inventory row by id.
pub fn find_laptop(conn: &Connection, id: i64) -> Result<Option<Laptop>, OperationError> {
    let sql = format!("SELECT {LAPTOP_COLUMNS} FROM laptops WHERE id = ?1");
    let laptop = conn
        .query_row(&sql, params![id], |row| {
            Ok(Laptop {
                id: row.get(0)?,
                sku: row.get(1)?,
                display_name: row.get(2)?,
                brand_id: row.get(3)?,
                model_id: row.get(4)?,
                processor_id: row.get(5)?,
                os_id: row.get(6)?,
                screen_id: row.get(7)?,
                graphics_card_id: row.get(8)?,
                storage_id: row.get(9)?,
                ram_id: row.get(10)?,
                store_id: row.get(11)?,
                location_id: row.get(12)?,
                supplier_id: row.get(13)?,
                created_at: row.get(14)?,
                updated_at: row.get(15)?,
            })
        })
        .optional()?;
    Ok(laptop)
}

/// Point one catalog reference of an inventory row at `value`.
pub fn set_laptop_reference(
    conn: &Connection,
    laptop_id: i64,
    kind: CatalogKind,
    value: Option<i64>,
) -> Result<(), OperationError> {
    let column = kind.field_name();
    let sql = format!(
        "UPDATE laptops SET {column} = ?2, updated_at = datetime('now') WHERE id = ?1"
    );
    let changed = conn.execute(&sql, params![laptop_id, value])?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "laptop".to_string(),
            id: laptop_id.to_string(),
        });
    }
    Ok(())
}
