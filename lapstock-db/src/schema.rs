//! SQLite schema creation and migration.
//!
//! Catalog tables share one shape and are generated from the kind
//! descriptors; the inventory table is written out by hand.

use std::time::Duration;

use lapstock_catalog::{CatalogKind, ALL_KINDS};
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::operations::{self, OperationError};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
///
/// - v1: catalog and inventory tables
/// - v2: trimmed names, case-insensitive unique name per scope (existing
///   duplicates are folded into the oldest entry)
pub const CURRENT_VERSION: i32 = 2;

/// How long a writer waits for another connection's write unit to finish.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create all tables and indexes if they don't exist. Safe to call on an
/// existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(VERSION_TABLE_SQL)?;
    for &kind in ALL_KINDS {
        conn.execute_batch(&catalog_table_sql(kind))?;
    }
    conn.execute_batch(INVENTORY_SQL)?;
    create_name_indexes(conn)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    match get_schema_version(&conn)? {
        0 => {
            log::debug!("Creating schema v{} in {}", CURRENT_VERSION, path.display());
            create_schema(&conn)?;
        }
        CURRENT_VERSION => {}
        found => migrate(&conn, found)?,
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema, for tests.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let tx = operations::begin_write(conn)?;
    for version in from_version..CURRENT_VERSION {
        if version == 1 {
            log::info!("Migrating catalog schema v1 -> v2 (name uniqueness)");
            for &kind in ALL_KINDS {
                tx.execute(
                    &format!("UPDATE {} SET name = TRIM(name)", kind.descriptor().table),
                    [],
                )?;
            }
            let folded = fold_duplicate_names(&tx)?;
            if folded > 0 {
                log::warn!("Folded {} duplicate catalog entries", folded);
            }
            create_name_indexes(&tx)?;
        }
        set_schema_version(&tx, version + 1)?;
    }
    tx.commit()?;

    Ok(())
}

/// Fold entries whose names differ only by case into the oldest entry of the
/// same scope. Inventory rows and child entries are repointed, then the
/// duplicate row is removed. Returns the number of rows folded.
///
/// Kinds are processed parents first, so models of two folded brands end up
/// under one brand before models themselves are folded.
fn fold_duplicate_names(conn: &Connection) -> Result<usize, SchemaError> {
    let mut folded = 0;
    for &kind in ALL_KINDS {
        let desc = kind.descriptor();
        let same_scope = desc.parent.map_or(String::new(), |p| {
            format!(" AND COALESCE(k.{col}, 0) = COALESCE(t.{col}, 0)", col = p.column)
        });
        let sql = format!(
            "SELECT t.id, (SELECT MIN(k.id) FROM {table} k
                           WHERE k.name = t.name COLLATE NOCASE{same_scope})
             FROM {table} t ORDER BY t.id",
            table = desc.table
        );
        let duplicates: Vec<(i64, i64)> = {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        for (duplicate, keeper) in duplicates.into_iter().filter(|(id, keeper)| id != keeper) {
            operations::reassign_references(conn, kind, duplicate, keeper)?;
            let child_scope = kind
                .child_kind()
                .and_then(|child| Some((child.descriptor().table, child.descriptor().parent?.column)));
            if let Some((child_table, column)) = child_scope {
                conn.execute(
                    &format!("UPDATE {child_table} SET {column} = ?2 WHERE {column} = ?1"),
                    params![duplicate, keeper],
                )?;
            }
            // The survivor stays selectable if either copy was.
            conn.execute(
                &format!(
                    "UPDATE {table} SET is_active = 1
                     WHERE id = ?2 AND (SELECT is_active FROM {table} WHERE id = ?1) = 1",
                    table = desc.table
                ),
                params![duplicate, keeper],
            )?;
            conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", desc.table),
                params![duplicate],
            )?;
            log::debug!("Folded {} #{} into #{}", kind, duplicate, keeper);
            folded += 1;
        }
    }
    Ok(folded)
}

/// Columns a catalog table carries beyond the common ones.
fn extra_columns(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Store => "address TEXT,\n    phone TEXT,\n    ",
        CatalogKind::Supplier => "contact_name TEXT,\n    email TEXT,\n    phone TEXT,\n    ",
        _ => "",
    }
}

fn catalog_table_sql(kind: CatalogKind) -> String {
    let desc = kind.descriptor();
    let parent = desc.parent.map_or(String::new(), |scope| {
        format!(
            "{} INTEGER REFERENCES {}(id),\n    ",
            scope.column,
            scope.kind.descriptor().table
        )
    });
    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    {parent}is_active BOOLEAN NOT NULL DEFAULT 1,
    {extra}created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);",
        table = desc.table,
        extra = extra_columns(kind),
    );
    if let Some(scope) = desc.parent {
        sql.push_str(&format!(
            "\nCREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table}({column});",
            table = desc.table,
            column = scope.column
        ));
    }
    sql
}

/// Unique name per scope, ignoring case. A missing parent is its own scope (0).
fn create_name_indexes(conn: &Connection) -> Result<(), SchemaError> {
    for &kind in ALL_KINDS {
        let desc = kind.descriptor();
        let scope = desc
            .parent
            .map_or(String::new(), |p| format!("COALESCE({}, 0), ", p.column));
        conn.execute_batch(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_name
                 ON {table}({scope}name COLLATE NOCASE);",
            table = desc.table
        ))?;
    }
    Ok(())
}

const VERSION_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

const INVENTORY_SQL: &str = "
CREATE TABLE IF NOT EXISTS laptops (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sku TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    brand_id INTEGER REFERENCES brands(id),
    model_id INTEGER REFERENCES laptop_models(id),
    processor_id INTEGER REFERENCES processors(id),
    os_id INTEGER REFERENCES operating_systems(id),
    screen_id INTEGER REFERENCES screens(id),
    graphics_card_id INTEGER REFERENCES graphics_cards(id),
    storage_id INTEGER REFERENCES storage(id),
    ram_id INTEGER REFERENCES ram(id),
    store_id INTEGER REFERENCES stores(id),
    location_id INTEGER REFERENCES locations(id),
    supplier_id INTEGER REFERENCES suppliers(id),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_laptops_brand ON laptops(brand_id);
CREATE INDEX IF NOT EXISTS idx_laptops_model ON laptops(model_id);
CREATE INDEX IF NOT EXISTS idx_laptops_store_location ON laptops(store_id, location_id);";
