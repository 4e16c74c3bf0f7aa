use lapstock_catalog::ALL_KINDS;
use lapstock_db::schema::{create_schema, get_schema_version, CURRENT_VERSION};
use lapstock_db::{open_database, open_memory, Connection};
use tempfile::TempDir;

/// Rewind an on-disk database to v1: no name indexes.
fn downgrade_to_v1(conn: &Connection) {
    for kind in ALL_KINDS {
        conn.execute_batch(&format!("DROP INDEX idx_{}_name;", kind.descriptor().table))
            .unwrap();
    }
    conn.execute_batch(
        "DELETE FROM schema_version;
         INSERT INTO schema_version (version) VALUES (1);",
    )
    .unwrap();
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "brands",
        "laptop_models",
        "processors",
        "operating_systems",
        "screens",
        "graphics_cards",
        "storage",
        "ram",
        "stores",
        "locations",
        "suppliers",
        "laptops",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn names_are_unique_ignoring_case() {
    let conn = open_memory().unwrap();
    conn.execute("INSERT INTO brands (name) VALUES ('Dell')", []).unwrap();
    let dup = conn.execute("INSERT INTO brands (name) VALUES ('DELL')", []);
    assert!(dup.is_err());
}

#[test]
fn model_names_are_unique_per_brand() {
    let conn = open_memory().unwrap();
    conn.execute("INSERT INTO brands (name) VALUES ('Acer'), ('Dell')", []).unwrap();
    conn.execute("INSERT INTO laptop_models (name, brand_id) VALUES ('Pro 14', 1)", [])
        .unwrap();
    conn.execute("INSERT INTO laptop_models (name, brand_id) VALUES ('Pro 14', 2)", [])
        .unwrap();
    let dup = conn.execute("INSERT INTO laptop_models (name, brand_id) VALUES ('pro 14', 1)", []);
    assert!(dup.is_err());
}

#[test]
fn open_database_on_disk_reopens_cleanly() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lapstock.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO brands (name) VALUES ('Lenovo')", []).unwrap();
    }
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM brands", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn migrate_v1_trims_names_and_adds_unique_indexes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lapstock.db");
    {
        // Simulate a v1 database: no name indexes, untrimmed names.
        let conn = open_database(&path).unwrap();
        downgrade_to_v1(&conn);
        conn.execute("INSERT INTO brands (name) VALUES ('  Asus ')", []).unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    let name: String = conn
        .query_row("SELECT name FROM brands", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Asus");
    let dup = conn.execute("INSERT INTO brands (name) VALUES ('ASUS')", []);
    assert!(dup.is_err());
}

#[test]
fn newer_schema_version_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lapstock.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }
    assert!(open_database(&path).is_err());
}

#[test]
fn migrate_v1_folds_case_duplicates() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lapstock.db");
    {
        let conn = open_database(&path).unwrap();
        downgrade_to_v1(&conn);
        conn.execute_batch(
            "INSERT INTO brands (id, name) VALUES (1, 'Dell'), (2, 'dell ');
             INSERT INTO brands (id, name, is_active) VALUES (3, 'HP', 0), (4, 'hp', 1);
             INSERT INTO laptop_models (id, name, brand_id) VALUES (1, 'XPS 13', 2), (2, 'xps 13', 1);
             INSERT INTO laptops (sku, display_name, brand_id, model_id)
                 VALUES ('S1', 'XPS 13', 2, 2), ('S2', 'HP 250', 4, NULL);",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    assert_eq!(count(&conn, "brands"), 2);
    assert_eq!(count(&conn, "laptop_models"), 1);

    let (brand, model): (i64, i64) = conn
        .query_row(
            "SELECT brand_id, model_id FROM laptops WHERE sku = 'S1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!((brand, model), (1, 1));
    let model_brand: i64 = conn
        .query_row("SELECT brand_id FROM laptop_models WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(model_brand, 1);

    // HP survives as #3 and inherits the active flag of its duplicate.
    let (hp_brand, hp_active): (i64, bool) = conn
        .query_row(
            "SELECT l.brand_id, b.is_active FROM laptops l JOIN brands b ON b.id = l.brand_id
             WHERE l.sku = 'S2'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!((hp_brand, hp_active), (3, true));

    let dup = conn.execute("INSERT INTO brands (name) VALUES ('DELL')", []);
    assert!(dup.is_err());
}
