mod common;

use common::{create_test_context, seed_users};
use jotdb::errors::ErrorKind;
use jotdb::{doc, Filter};

#[test]
fn test_delete_by_id() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let removed = users.id("2").delete().unwrap();
    assert!(removed);

    assert_eq!(users.count(), 2);
    assert!(users.id("2").get().is_not_found());
}

#[test]
fn test_delete_filtered_set() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let removed = users
        .filter(&Filter::new().eq("location.state", "KY"))
        .delete()
        .unwrap();
    assert!(removed);

    let all = users.all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get("username").as_string().unwrap(), "ada");
}

#[test]
fn test_delete_preserves_remaining_order() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    users.id("2").delete().unwrap();

    let all = users.all();
    let ids: Vec<&str> = all.iter().map(|d| d.id().unwrap()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_delete_on_empty_view_is_a_no_op() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let removed = users
        .filter(&Filter::new().eq("username", "nobody"))
        .delete()
        .unwrap();
    assert!(!removed);

    let removed = users.id("missing").delete().unwrap();
    assert!(!removed);
    assert_eq!(users.count(), 3);
}

#[test]
fn test_delete_everything_is_guarded() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    let err = users.delete().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DeleteAllGuard);

    // the guard fired before any write
    users.reload().unwrap();
    assert_eq!(users.count(), 3);
}

#[test]
fn test_delete_guard_checks_disk_not_the_view() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    // the filtered view is a strict subset until another handle shrinks
    // the file underneath it
    users.filter(&Filter::new().lte("age", 31));
    let mut other = ctx.db.collection("users").unwrap();
    other.id("2").delete().unwrap();

    let err = users.delete().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::DeleteAllGuard);
}

#[test]
fn test_empty_clears_the_collection() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    users.empty().unwrap();
    assert_eq!(users.count(), 0);

    let raw = std::fs::read_to_string(ctx.root().join("test").join("users.json")).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn test_empty_is_idempotent() {
    let ctx = create_test_context();
    let mut users = ctx.db.collection("users").unwrap();

    users.empty().unwrap();
    users.empty().unwrap();
    assert_eq!(users.count(), 0);
}

#[test]
fn test_reuse_of_a_deleted_id() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");

    users.id("3").delete().unwrap();
    users.insert(doc! { "id": "3", "username": "new-bob" }).unwrap();

    let view = users.id("3").get();
    assert_eq!(view.single().unwrap().get("username").as_string().unwrap(), "new-bob");
}

#[test]
fn test_delete_persists_to_disk() {
    let ctx = create_test_context();
    let mut users = seed_users(&ctx, "users");
    users.id("1").delete().unwrap();

    let mut fresh = ctx.db.collection("users").unwrap();
    assert_eq!(fresh.count(), 2);
}
