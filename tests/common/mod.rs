// not every test binary uses every helper
#![allow(dead_code)]

use jotdb::collection::IdGenerator;
use jotdb::{doc, JotDb};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// Setup only one time per test binary.
#[ctor::ctor]
fn init() {
    colog::init();
}

/// A database rooted in a temporary directory; the directory is removed
/// when the context is dropped.
pub struct TestContext {
    pub db: JotDb,
    dir: TempDir,
}

impl TestContext {
    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }
}

/// Opens a fresh instance with default database `test`.
pub fn create_test_context() -> TestContext {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db = JotDb::builder()
        .root(dir.path())
        .database("test")
        .open()
        .expect("failed to open test database");
    TestContext { db, dir }
}

/// Opens a fresh instance with sequential, predictable document ids.
pub fn create_sequential_context() -> TestContext {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db = JotDb::builder()
        .root(dir.path())
        .database("test")
        .id_generator(Arc::new(SequentialIds::default()))
        .open()
        .expect("failed to open test database");
    TestContext { db, dir }
}

/// Generates ids `id-1`, `id-2`, ... for deterministic assertions.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Three users with known ids, ages and locations.
pub fn create_test_docs() -> Vec<jotdb::Document> {
    vec![
        doc! { "id": "1", "username": "cyd", "age": 31, "location": { "state": "KY" } },
        doc! { "id": "2", "username": "ada", "age": 36, "location": { "state": "TX" } },
        doc! { "id": "3", "username": "bob", "age": 24, "location": { "state": "KY" } },
    ]
}

/// Inserts the standard users into the named collection.
pub fn seed_users(ctx: &TestContext, name: &str) -> jotdb::collection::Collection {
    let mut users = ctx.db.collection(name).expect("failed to open collection");
    for doc in create_test_docs() {
        users.insert(doc).expect("failed to seed document");
    }
    users
}
