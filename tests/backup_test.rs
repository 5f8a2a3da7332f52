mod common;

use common::{create_test_context, seed_users};
use jotdb::doc;

#[test]
fn test_backup_snapshots_every_database() {
    let ctx = create_test_context();
    seed_users(&ctx, "users");
    let mut posts = ctx.db.database("blog").unwrap().collection("posts").unwrap();
    posts.insert(doc! { "id": "p1", "title": "hello" }).unwrap();

    let dest = tempfile::TempDir::new().unwrap();
    let snapshot = ctx.db.backup().create_in(dest.path()).unwrap();

    assert!(snapshot
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("backup-"));
    assert!(snapshot.join("test").join("users.json").is_file());
    assert!(snapshot.join("blog").join("posts.json").is_file());
}

#[test]
fn test_backup_copies_files_byte_for_byte() {
    let ctx = create_test_context();
    seed_users(&ctx, "users");

    let dest = tempfile::TempDir::new().unwrap();
    let snapshot = ctx.db.backup().create_in(dest.path()).unwrap();

    let original = std::fs::read(ctx.root().join("test").join("users.json")).unwrap();
    let copied = std::fs::read(snapshot.join("test").join("users.json")).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn test_backup_into_the_root_does_not_recurse() {
    let ctx = create_test_context();
    seed_users(&ctx, "users");

    let snapshot = ctx.db.backup().create_in(ctx.root()).unwrap();

    assert!(snapshot.join("test").join("users.json").is_file());
    // the snapshot does not contain a copy of itself
    assert!(!snapshot
        .join(snapshot.file_name().unwrap())
        .exists());
}

#[test]
fn test_backup_is_independent_of_later_writes() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let dest = tempfile::TempDir::new().unwrap();
    let snapshot = ctx.db.backup().create_in(dest.path()).unwrap();

    users.id("1").delete().unwrap();

    let copied = std::fs::read_to_string(snapshot.join("test").join("users.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&copied).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}
