use lapstock_catalog::{load_seed_dir, CatalogKind, SeedEntry, SeedFile};
use lapstock_db::*;
use lapstock_normalize::*;
use std::fs;
use tempfile::TempDir;

fn seed_files() -> Vec<SeedFile> {
    vec![
        SeedFile {
            kind: CatalogKind::Brand,
            entries: vec![
                SeedEntry::Name("Lenovo".to_string()),
                SeedEntry::Nested {
                    name: "Dell".to_string(),
                    children: vec!["Inspiron 15".to_string(), "XPS 13".to_string()],
                },
            ],
        },
        SeedFile {
            kind: CatalogKind::Processor,
            entries: vec![SeedEntry::Nested {
                name: "Intel Core i7".to_string(),
                children: vec!["ignored".to_string()],
            }],
        },
    ]
}

#[test]
fn seed_creates_entries_and_children() {
    let conn = open_memory().unwrap();
    let stats = seed_catalog(&conn, &seed_files()).unwrap();
    assert_eq!(stats.created, 5);
    assert_eq!(stats.existing, 0);
    assert_eq!(stats.skipped, 1);

    let dell = find_entry_by_name(&conn, CatalogKind::Brand, "dell", None)
        .unwrap()
        .unwrap();
    let xps = find_entry_by_name(&conn, CatalogKind::Model, "XPS 13", Some(dell.id))
        .unwrap()
        .unwrap();
    assert_eq!(xps.parent_id, Some(dell.id));
}

#[test]
fn seeding_twice_is_idempotent() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &seed_files()).unwrap();
    let stats = seed_catalog(&conn, &seed_files()).unwrap();
    assert_eq!(stats.created, 0);
    assert_eq!(stats.existing, 5);

    let counts = active_counts(&conn).unwrap();
    assert_eq!(counts.get(CatalogKind::Brand), 2);
    assert_eq!(counts.get(CatalogKind::Model), 2);
    assert_eq!(counts.get(CatalogKind::Processor), 1);
}

#[test]
fn seed_from_yaml_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("stores.yaml"),
        r#"
kind: store
entries:
  - name: Tienda Principal
    locations: [Estante A-1, Vitrina 3]
"#,
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let files = load_seed_dir(tmp.path()).unwrap();
    let stats = seed_catalog(&conn, &files).unwrap();
    assert_eq!(stats.created, 3);
    assert_eq!(active_counts(&conn).unwrap().get(CatalogKind::Location), 2);
}
