//! SQLite persistence layer for the laptop catalog.
//!
//! Provides schema creation, the catalog store operations used by the
//! resolver and merge logic, and read queries for listings and statistics,
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    begin_write, find_entry_by_id, find_entry_by_name, find_laptop, insert_entry, insert_laptop,
    reassign_references, set_entry_active, set_laptop_reference, OperationError,
};
pub use queries::{
    active_counts, count_references, list_active_entries, search_catalogs, ActiveCounts,
    EntryFilter, EntryPage, DEFAULT_PAGE_SIZE,
};
pub use rusqlite::Connection;
pub use schema::{open_database, open_memory, SchemaError};
