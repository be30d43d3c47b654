use super::{ExpressionStore, FileStore, MemoryStore, StoreError};
use crate::record::{encode_store_json, NewExpression, StoreDocument};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock ok")
        .as_nanos();
    std::env::temp_dir().join(format!("expreval-{prefix}-{nanos}.json"))
}

fn new_expression(name: &str) -> NewExpression {
    NewExpression {
        name: name.to_string(),
        expression: "flag".to_string(),
        ast_json: r#"{"type":"value","value":"flag"}"#.to_string(),
    }
}

#[test]
fn memory_store_assigns_increasing_ids() {
    let mut store = MemoryStore::new();
    let first = store.insert(new_expression("first")).expect("insert");
    let second = store.insert(new_expression("second")).expect("insert");
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(store.get(2).expect("get").map(|stored| stored.name), Some("second".to_string()));
    assert_eq!(store.get(3).expect("get"), None);
}

#[test]
fn memory_store_never_reuses_removed_ids() {
    let mut store = MemoryStore::new();
    store.insert(new_expression("a")).expect("insert");
    let b = store.insert(new_expression("b")).expect("insert");
    assert!(store.remove(b.id).expect("remove"));
    assert!(!store.remove(b.id).expect("remove again"));
    let c = store.insert(new_expression("c")).expect("insert");
    assert_eq!(c.id, 3);
    assert_eq!(store.list().expect("list").len(), 2);
}

#[test]
fn file_store_roundtrip_path() {
    let path = temp_path("store-roundtrip");
    {
        let mut store = FileStore::open(&path).expect("open missing");
        assert_eq!(store.path(), path.as_path());
        assert!(store.list().expect("list").is_empty());
        store.insert(new_expression("one")).expect("insert");
        store.insert(new_expression("two")).expect("insert");
        assert!(store.remove(1).expect("remove"));
    }

    let mut reopened = FileStore::open(&path).expect("reopen");
    let listed = reopened.list().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, 2);
    assert_eq!(listed[0].name, "two");
    assert_eq!(reopened.insert(new_expression("three")).expect("insert").id, 3);

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_rejects_unknown_schema() {
    let path = temp_path("store-schema");
    let mut document = StoreDocument::empty();
    document.schema = "expreval-store/9.9.9".to_string();
    std::fs::write(&path, encode_store_json(&document).expect("encode")).expect("write");

    let error = FileStore::open(&path).expect_err("must fail");
    assert!(matches!(error, StoreError::Schema { ref found, .. } if found == "expreval-store/9.9.9"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_repairs_stale_next_id_and_rejects_duplicates() {
    let path = temp_path("store-ids");
    let mut document = StoreDocument::empty();
    document.expressions.push(new_expression("x").with_id(7));
    std::fs::write(&path, encode_store_json(&document).expect("encode")).expect("write");
    let mut store = FileStore::open(&path).expect("open");
    assert_eq!(store.insert(new_expression("y")).expect("insert").id, 8);

    document.expressions.push(new_expression("dup").with_id(7));
    std::fs::write(&path, encode_store_json(&document).expect("encode")).expect("write");
    assert!(matches!(FileStore::open(&path), Err(StoreError::DuplicateId(7))));

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_reports_corrupt_json() {
    let path = temp_path("store-corrupt");
    std::fs::write(&path, "{not json").expect("write");
    assert!(matches!(FileStore::open(&path), Err(StoreError::Json(_))));
    let _ = std::fs::remove_file(path);
}
