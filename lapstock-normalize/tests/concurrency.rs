use std::thread;
use std::time::Duration;

use lapstock_catalog::{CatalogKind, RawValue};
use lapstock_db::*;
use lapstock_normalize::*;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn concurrent_submission_reuses_entry_created_by_other_writer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lapstock.db");
    let first = open_database(&path).unwrap();
    let second = open_database(&path).unwrap();

    let tx = begin_write(&first).unwrap();
    let created = resolve_entry(&tx, CatalogKind::Brand, &RawValue::from("Dell"), None).unwrap();
    assert!(created.was_created());

    let waiting = thread::spawn(move || {
        let submission = fields(json!({ "brand_id": "dell" }));
        resolve_submission(&second, &submission)
    });

    // Let the second writer block on the write lock before committing.
    thread::sleep(Duration::from_millis(200));
    tx.commit().unwrap();

    let resolved = waiting.join().unwrap().unwrap();
    assert_eq!(resolved.get(CatalogKind::Brand), created.id());
    assert!(resolved.created().is_empty());

    let brands: i64 = first
        .query_row("SELECT COUNT(*) FROM brands", [], |row| row.get(0))
        .unwrap();
    assert_eq!(brands, 1);
}

#[test]
fn write_unit_blocks_second_writer_until_commit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lapstock.db");
    let first = open_database(&path).unwrap();
    let second = open_database(&path).unwrap();
    second.busy_timeout(Duration::from_millis(50)).unwrap();

    let tx = begin_write(&first).unwrap();
    let blocked = begin_write(&second);
    assert!(blocked.is_err());
    drop(blocked);
    tx.commit().unwrap();

    assert!(begin_write(&second).is_ok());
}
