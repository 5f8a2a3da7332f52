mod common;

use common::{create_sequential_context, create_test_context};
use jotdb::errors::ErrorKind;
use jotdb::doc;

#[test]
fn test_insert() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    let document = doc! {
        "first_name": "John",
        "last_name": "Doe",
        "birth_day": 1234567890,
        "data": [1, 2, 3],
        "body": "This is a test document"
    };
    collection.insert(document).unwrap();

    let all = collection.all();
    assert_eq!(all.len(), 1);
    let document = &all[0];
    assert_eq!(document.get("first_name").as_string().unwrap(), "John");
    assert_eq!(document.get("last_name").as_string().unwrap(), "Doe");
    assert!(!document.get("birth_day").is_null());
    assert!(!document.get("data").is_null());
    assert!(!document.get("body").is_null());
    assert!(document.id().is_some());
}

#[test]
fn test_insert_generates_id_when_absent() {
    let ctx = create_sequential_context();
    let mut collection = ctx.db.collection("test").unwrap();

    collection.insert(doc! { "username": "cyd" }).unwrap();
    collection.insert(doc! { "username": "ada" }).unwrap();

    let all = collection.all();
    assert_eq!(all[0].id(), Some("id-1"));
    assert_eq!(all[1].id(), Some("id-2"));
}

#[test]
fn test_insert_keeps_supplied_id() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    collection
        .insert(doc! { "id": "user-7", "username": "cyd" })
        .unwrap();

    assert_eq!(collection.all()[0].id(), Some("user-7"));
}

#[test]
fn test_insert_duplicate_id_fails_and_leaves_file_unchanged() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    collection.insert(doc! { "id": "1", "username": "cyd" }).unwrap();
    let err = collection
        .insert(doc! { "id": "1", "username": "ada" })
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DuplicateId);

    collection.reload().unwrap();
    let all = collection.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get("username").as_string().unwrap(), "cyd");
}

#[test]
fn test_insert_rejects_non_string_id() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    // put() refuses a numeric id, so smuggle one in through deserialization
    let document: jotdb::Document =
        serde_json::from_str(r#"{ "id": 42, "username": "cyd" }"#).unwrap();

    let err = collection.insert(document).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidId);
    assert_eq!(collection.count(), 0);
}

#[test]
fn test_insert_rejects_empty_id() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    let document: jotdb::Document = serde_json::from_str(r#"{ "id": "" }"#).unwrap();

    let err = collection.insert(document).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidId);
}

#[test]
fn test_insert_sets_timestamps() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();

    collection.insert(doc! { "username": "cyd" }).unwrap();

    let all = collection.all();
    let created = all[0].get("createdAt").as_i64().unwrap();
    let updated = all[0].get("updatedAt").as_i64().unwrap();
    assert!(created > 0);
    assert_eq!(created, updated);
}

#[test]
fn test_insert_without_timestamps() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = jotdb::JotDb::builder()
        .root(dir.path())
        .database("test")
        .include_timestamps(false)
        .open()
        .unwrap();

    let mut collection = db.collection("test").unwrap();
    collection.insert(doc! { "username": "cyd" }).unwrap();

    let all = collection.all();
    assert!(all[0].get_opt("createdAt").is_none());
    assert!(all[0].get_opt("updatedAt").is_none());
}

#[test]
fn test_insert_persists_across_handles() {
    let ctx = create_test_context();
    let mut writer = ctx.db.collection("test").unwrap();
    writer.insert(doc! { "id": "1", "username": "cyd" }).unwrap();

    let mut reader = ctx.db.collection("test").unwrap();
    assert_eq!(reader.count(), 1);
    assert_eq!(reader.all()[0].id(), Some("1"));
}

#[test]
fn test_insert_file_is_pretty_printed_json_array() {
    let ctx = create_test_context();
    let mut collection = ctx.db.collection("test").unwrap();
    collection.insert(doc! { "id": "1", "username": "cyd" }).unwrap();

    let raw = std::fs::read_to_string(ctx.root().join("test").join("test.json")).unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}
