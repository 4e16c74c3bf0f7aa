use lapstock_catalog::types::*;
use lapstock_db::*;

fn laptop(sku: &str) -> Laptop {
    Laptop {
        sku: sku.to_string(),
        display_name: format!("Laptop {sku}"),
        ..Default::default()
    }
}

#[test]
fn insert_and_find_entry() {
    let conn = open_memory().unwrap();
    let id = insert_entry(&conn, CatalogKind::Processor, "  Intel Core i7-12700H ", None).unwrap();

    let entry = find_entry_by_id(&conn, CatalogKind::Processor, id).unwrap().unwrap();
    assert_eq!(entry.name, "Intel Core i7-12700H");
    assert_eq!(entry.kind, CatalogKind::Processor);
    assert!(entry.is_active);
    assert_eq!(entry.parent_id, None);

    let by_name = find_entry_by_name(&conn, CatalogKind::Processor, "intel core I7-12700h", None)
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, id);
}

#[test]
fn find_missing_entry_returns_none() {
    let conn = open_memory().unwrap();
    assert!(find_entry_by_id(&conn, CatalogKind::Brand, 99).unwrap().is_none());
    assert!(find_entry_by_name(&conn, CatalogKind::Brand, "Dell", None)
        .unwrap()
        .is_none());
}

#[test]
fn model_lookup_is_scoped_to_brand() {
    let conn = open_memory().unwrap();
    let acer = insert_entry(&conn, CatalogKind::Brand, "Acer", None).unwrap();
    let dell = insert_entry(&conn, CatalogKind::Brand, "Dell", None).unwrap();
    let model = insert_entry(&conn, CatalogKind::Model, "Nitro 5", Some(acer)).unwrap();

    let found = find_entry_by_name(&conn, CatalogKind::Model, "nitro 5", Some(acer))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, model);
    assert_eq!(found.parent_id, Some(acer));

    assert!(find_entry_by_name(&conn, CatalogKind::Model, "Nitro 5", Some(dell))
        .unwrap()
        .is_none());

    // Without a brand context any brand matches.
    let unscoped = find_entry_by_name(&conn, CatalogKind::Model, "Nitro 5", None)
        .unwrap()
        .unwrap();
    assert_eq!(unscoped.id, model);
}

#[test]
fn parent_is_ignored_for_top_level_kinds() {
    let conn = open_memory().unwrap();
    let id = insert_entry(&conn, CatalogKind::Ram, "16GB DDR5", Some(42)).unwrap();
    let found = find_entry_by_name(&conn, CatalogKind::Ram, "16gb ddr5", Some(7))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.parent_id, None);
}

#[test]
fn duplicate_insert_is_a_unique_violation() {
    let conn = open_memory().unwrap();
    insert_entry(&conn, CatalogKind::Supplier, "Ingram", None).unwrap();
    let err = insert_entry(&conn, CatalogKind::Supplier, "INGRAM ", None).unwrap_err();
    assert!(err.is_unique_violation());

    let not_found = OperationError::NotFound {
        entity_type: "laptop".to_string(),
        id: "1".to_string(),
    };
    assert!(!not_found.is_unique_violation());
}

#[test]
fn set_active_toggles_flag() {
    let conn = open_memory().unwrap();
    let id = insert_entry(&conn, CatalogKind::Screen, "15.6\" FHD IPS", None).unwrap();

    assert!(set_entry_active(&conn, CatalogKind::Screen, id, false).unwrap());
    let entry = find_entry_by_id(&conn, CatalogKind::Screen, id).unwrap().unwrap();
    assert!(!entry.is_active);

    assert!(set_entry_active(&conn, CatalogKind::Screen, id, true).unwrap());
    let entry = find_entry_by_id(&conn, CatalogKind::Screen, id).unwrap().unwrap();
    assert!(entry.is_active);

    assert!(!set_entry_active(&conn, CatalogKind::Screen, id + 1, false).unwrap());
}

#[test]
fn inactive_entries_are_still_found_by_name() {
    let conn = open_memory().unwrap();
    let id = insert_entry(&conn, CatalogKind::Brand, "Toshiba", None).unwrap();
    set_entry_active(&conn, CatalogKind::Brand, id, false).unwrap();
    let found = find_entry_by_name(&conn, CatalogKind::Brand, "toshiba", None)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, id);
}

#[test]
fn laptop_insert_and_find() {
    let conn = open_memory().unwrap();
    let brand = insert_entry(&conn, CatalogKind::Brand, "HP", None).unwrap();
    let mut row = laptop("LX-20250101-0001");
    row.brand_id = Some(brand);
    let id = insert_laptop(&conn, &row).unwrap();

    let found = find_laptop(&conn, id).unwrap().unwrap();
    assert_eq!(found.sku, "LX-20250101-0001");
    assert_eq!(found.brand_id, Some(brand));
    assert_eq!(found.model_id, None);
    assert!(find_laptop(&conn, id + 1).unwrap().is_none());
}

#[test]
fn reassign_references_rewrites_only_matching_rows() {
    let conn = open_memory().unwrap();
    let a = insert_entry(&conn, CatalogKind::Ram, "16GB DDR4", None).unwrap();
    let b = insert_entry(&conn, CatalogKind::Ram, "16 GB DDR4", None).unwrap();
    let c = insert_entry(&conn, CatalogKind::Ram, "32GB DDR5", None).unwrap();

    let mut ids = Vec::new();
    for (sku, ram) in [("S1", b), ("S2", b), ("S3", c)] {
        let mut row = laptop(sku);
        row.ram_id = Some(ram);
        ids.push(insert_laptop(&conn, &row).unwrap());
    }

    let changed = reassign_references(&conn, CatalogKind::Ram, b, a).unwrap();
    assert_eq!(changed, 2);
    assert_eq!(find_laptop(&conn, ids[0]).unwrap().unwrap().ram_id, Some(a));
    assert_eq!(find_laptop(&conn, ids[1]).unwrap().unwrap().ram_id, Some(a));
    assert_eq!(find_laptop(&conn, ids[2]).unwrap().unwrap().ram_id, Some(c));
}

#[test]
fn set_laptop_reference_updates_one_column() {
    let conn = open_memory().unwrap();
    let store = insert_entry(&conn, CatalogKind::Store, "Sucursal Centro", None).unwrap();
    let id = insert_laptop(&conn, &laptop("S1")).unwrap();

    set_laptop_reference(&conn, id, CatalogKind::Store, Some(store)).unwrap();
    assert_eq!(find_laptop(&conn, id).unwrap().unwrap().store_id, Some(store));

    set_laptop_reference(&conn, id, CatalogKind::Store, None).unwrap();
    assert_eq!(find_laptop(&conn, id).unwrap().unwrap().store_id, None);

    let err = set_laptop_reference(&conn, id + 10, CatalogKind::Store, None).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}
