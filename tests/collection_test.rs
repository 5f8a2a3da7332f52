mod common;

use common::{create_test_context, seed_users};
use jotdb::doc;
use jotdb::errors::ErrorKind;

#[test]
fn test_collection_is_created_on_demand() {
    let ctx = create_test_context();
    let database = ctx.db.database("test").unwrap();

    assert!(!database.collection_exists("users").unwrap());
    ctx.db.collection("users").unwrap();
    assert!(database.collection_exists("users").unwrap());

    let raw = std::fs::read_to_string(ctx.root().join("test").join("users.json")).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn test_collection_creation_can_be_disabled() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = jotdb::JotDb::builder()
        .root(dir.path())
        .database("test")
        .create_collection_if_missing(false)
        .open()
        .unwrap();

    let err = db.collection("users").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
}

#[test]
fn test_create_collection_twice_fails() {
    let ctx = create_test_context();
    let database = ctx.db.database("test").unwrap();

    database.create_collection("users").unwrap();
    let err = database.create_collection("users").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CollectionExists);
}

#[test]
fn test_collections_are_listed_sorted() {
    let ctx = create_test_context();
    let database = ctx.db.database("test").unwrap();

    database.create_collection("posts").unwrap();
    database.create_collection("users").unwrap();
    database.create_collection("comments").unwrap();

    assert_eq!(database.collections().unwrap(), vec!["comments", "posts", "users"]);
}

#[test]
fn test_delete_collection() {
    let ctx = create_test_context();
    let database = ctx.db.database("test").unwrap();

    database.create_collection("users").unwrap();
    database.delete_collection("users").unwrap();
    assert!(!database.collection_exists("users").unwrap());

    let err = database.delete_collection("users").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
}

#[test]
fn test_collection_names_are_validated() {
    let ctx = create_test_context();
    let database = ctx.db.database("test").unwrap();

    assert!(database.create_collection("").is_err());
    assert!(database.create_collection("a/b").is_err());
    assert!(database.create_collection(".hidden").is_err());
}

#[test]
fn test_corrupt_collection_file_is_reported() {
    let ctx = create_test_context();
    ctx.db.collection("users").unwrap();

    let path = ctx.root().join("test").join("users.json");
    std::fs::write(&path, "{ not an array").unwrap();

    let err = ctx.db.collection("users").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CorruptCollection);
}

#[test]
fn test_hand_edited_file_is_readable() {
    let ctx = create_test_context();
    ctx.db.collection("users").unwrap();

    let path = ctx.root().join("test").join("users.json");
    std::fs::write(&path, r#"[ { "id": "x", "username": "hand" } ]"#).unwrap();

    let mut users = ctx.db.collection("users").unwrap();
    let view = users.id("x").get();
    assert_eq!(view.single().unwrap().get("username").as_string().unwrap(), "hand");
}

#[test]
fn test_field_order_is_preserved_on_rewrite() {
    let ctx = create_test_context();
    let mut users = ctx.db.collection("users").unwrap();
    users
        .insert(doc! { "id": "1", "zeta": 1, "alpha": 2, "mid": 3 })
        .unwrap();

    let raw = std::fs::read_to_string(ctx.root().join("test").join("users.json")).unwrap();
    let zeta = raw.find("zeta").unwrap();
    let alpha = raw.find("alpha").unwrap();
    let mid = raw.find("mid").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn test_no_temp_files_left_behind() {
    let ctx = create_test_context();
    seed_users(&ctx, "users");

    let leftovers: Vec<_> = std::fs::read_dir(ctx.root().join("test"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_reload_sees_external_changes() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let mut other = ctx.db.collection("users").unwrap();
    other.insert(doc! { "id": "4", "username": "dan" }).unwrap();

    // the first handle still holds the stale load
    assert_eq!(users.count(), 3);
    users.reload().unwrap();
    assert_eq!(users.count(), 4);
}
