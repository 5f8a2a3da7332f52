use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::collection::{Document, View};
use crate::common::constants::{DOC_CREATED_AT, DOC_ID, DOC_UPDATED_AT, EMPTY_COLLECTION};
use crate::common::util::document_utils::{collect_ids, find_by_id, id_exists};
use crate::common::util::time::epoch_seconds;
use crate::common::{LockHandle, SortOrder};
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::filter::Filter;
use crate::jotdb_config::JotDbConfig;
use crate::store::Storage;

/// A collection of documents backed by one JSON file.
///
/// The engine loads every document of its file eagerly at construction and
/// keeps a mutable "current view" over them. Query methods (`filter`,
/// `order_by`, `limit`, `id`) narrow the view without touching disk;
/// terminal reads (`get`, `count`) consume and reset it; `all` ignores it.
/// Mutations (`insert`, `update`, `delete`, `empty`) always re-read the
/// authoritative on-disk state, apply the change and rewrite the whole
/// file, holding the collection's write lock for the full
/// read-modify-write cycle.
///
/// # Examples
///
/// ```rust,ignore
/// let mut users = db.collection("users")?;
///
/// users.insert(doc! { username: "ada", age: 36 })?;
///
/// let adults = users
///     .filter(&Filter::new().gte("age", 18))
///     .order_by("username", SortOrder::Ascending)
///     .limit(10)
///     .get();
/// ```
#[derive(Debug)]
pub struct Collection {
    name: String,
    path: PathBuf,
    config: JotDbConfig,
    storage: Storage,
    lock_handle: LockHandle,
    documents: Vec<Document>,
    // None = the unnarrowed "all documents" view
    view: Option<View>,
}

impl Collection {
    /// Binds an engine to an existing collection file and loads it.
    ///
    /// The file must already exist (the database manager creates it as
    /// `[]`); its contents must parse as a JSON array of objects.
    pub(crate) fn open(
        name: &str,
        path: PathBuf,
        config: JotDbConfig,
        storage: Storage,
        lock_handle: LockHandle,
    ) -> JotResult<Self> {
        let documents = {
            let _guard = lock_handle.read();
            read_documents(&storage, &path, name)?
        };
        log::debug!(
            "Opened collection '{}' with {} document(s)",
            name,
            documents.len()
        );

        Ok(Collection {
            name: name.to_string(),
            path,
            config,
            storage,
            lock_handle,
            documents,
            view: None,
        })
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved collection file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the backing file, discarding the in-memory set and any
    /// narrowing. Useful after another handle mutated the same file.
    pub fn reload(&mut self) -> JotResult<()> {
        let documents = {
            let _guard = self.lock_handle.read();
            read_documents(&self.storage, &self.path, &self.name)?
        };
        self.documents = documents;
        self.view = None;
        Ok(())
    }

    // ---- query chain -------------------------------------------------

    /// Narrows the current view to the documents matching the filter.
    pub fn filter(&mut self, filter: &Filter) -> &mut Self {
        let docs = self.take_view().into_documents();
        let matched = docs.into_iter().filter(|doc| filter.matches(doc)).collect();
        self.view = Some(View::Documents(matched));
        self
    }

    /// Narrows the current view with a filter in its dynamic document
    /// shape (see [Filter::parse]).
    ///
    /// # Errors
    ///
    /// `FilterFormat` when a tuple entry is malformed; the view is left
    /// untouched in that case.
    pub fn filter_doc(&mut self, predicates: &Document) -> JotResult<&mut Self> {
        let filter = Filter::parse(predicates)?;
        Ok(self.filter(&filter))
    }

    /// Sorts the current view on a direct (non-dotted) field.
    ///
    /// The sort is stable and total: documents missing the field sort as
    /// null, first ascending and last descending.
    pub fn order_by(&mut self, field: &str, order: SortOrder) -> &mut Self {
        let mut docs = self.take_view().into_documents();
        docs.sort_by(|a, b| {
            let ord = a.get(field).cmp_for_sort(b.get(field));
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        self.view = Some(View::Documents(docs));
        self
    }

    /// Keeps up to `count` documents from the front of the current view.
    pub fn limit(&mut self, count: usize) -> &mut Self {
        self.limit_from(count, 0)
    }

    /// Keeps up to `count` documents starting at `offset`, preserving
    /// order. An offset past the end yields an empty view; a range past
    /// the end yields the remainder. Never errors.
    pub fn limit_from(&mut self, count: usize, offset: usize) -> &mut Self {
        let docs = self.take_view().into_documents();
        let docs = docs.into_iter().skip(offset).take(count).collect();
        self.view = Some(View::Documents(docs));
        self
    }

    /// Narrows the current view to the single document with the given id,
    /// or to the explicit [View::NotFound] state.
    pub fn id(&mut self, id: &str) -> &mut Self {
        let docs = self.take_view().into_documents();
        self.view = Some(match find_by_id(&docs, id) {
            Some((_, doc)) => View::Document(doc.clone()),
            None => View::NotFound,
        });
        self
    }

    // ---- terminal reads ----------------------------------------------

    /// Returns the current view and resets the chain.
    pub fn get(&mut self) -> View {
        self.take_view()
    }

    /// Returns the current view projected down to the named fields and
    /// resets the chain. Projecting a miss stays a miss.
    pub fn get_projected(&mut self, fields: &[&str]) -> View {
        self.take_view().project(fields)
    }

    /// The full loaded document sequence, ignoring any narrowing. Resets
    /// the chain.
    pub fn all(&mut self) -> Vec<Document> {
        self.view = None;
        self.documents.clone()
    }

    /// Number of documents in the current view. Resets the chain.
    pub fn count(&mut self) -> usize {
        self.take_view().count()
    }

    // ---- mutations ---------------------------------------------------

    /// Inserts a new document.
    ///
    /// All fields of `data` are kept; when it supplies no `id` a
    /// process-unique one is generated. When timestamps are enabled,
    /// `createdAt` and `updatedAt` are set to the current epoch seconds.
    /// The document is appended to the authoritative on-disk set and the
    /// file is rewritten.
    ///
    /// # Errors
    ///
    /// * `InvalidId` - the supplied `id` is not a non-empty string
    /// * `DuplicateId` - the id already exists on disk (file unchanged)
    /// * `Write` - the rewrite failed
    pub fn insert(&mut self, data: Document) -> JotResult<()> {
        let _guard = self.lock_handle.write();
        self.view = None;

        let mut document = data;
        let supplied = match document.get_opt(DOC_ID) {
            Some(value) => match value.as_string() {
                Some(id) if !id.is_empty() => Some(id.clone()),
                _ => {
                    log::error!(
                        "Rejecting insert into '{}': id must be a non-empty string",
                        self.name
                    );
                    return Err(JotError::new(
                        "Document id must be a non-empty string",
                        ErrorKind::InvalidId,
                    ));
                }
            },
            None => None,
        };

        let id = match supplied {
            Some(id) => id,
            None => {
                let id = self.config.id_generator().next_id();
                document.put(DOC_ID, id.as_str())?;
                id
            }
        };

        let mut documents = read_documents(&self.storage, &self.path, &self.name)?;
        if id_exists(&documents, &id) {
            log::error!(
                "Document with id '{}' already exists in collection '{}'",
                id,
                self.name
            );
            return Err(JotError::new(
                &format!(
                    "Document with id '{}' already exists in collection '{}'",
                    id, self.name
                ),
                ErrorKind::DuplicateId,
            ));
        }

        if self.config.include_timestamps() {
            let now = epoch_seconds();
            document.put(DOC_CREATED_AT, now)?;
            document.put(DOC_UPDATED_AT, now)?;
        }

        log::debug!("Inserting document '{}' into collection '{}'", id, self.name);
        documents.push(document);
        self.write_documents(&documents)?;
        self.documents = documents;
        Ok(())
    }

    /// Applies the given field changes to every document in the current
    /// view.
    ///
    /// Each view document is located by `id` in the freshly re-read
    /// on-disk set and only the given fields are overwritten; view entries
    /// whose id no longer exists on disk are skipped. When timestamps are
    /// enabled `updatedAt` is refreshed on each touched document.
    ///
    /// Returns `Ok(false)` without writing when the view is empty, a miss,
    /// or every targeted id is gone.
    ///
    /// # Errors
    ///
    /// * `InvalidOperation` - `changes` contains an `id` field
    /// * `Write` - the rewrite failed
    pub fn update(&mut self, changes: &Document) -> JotResult<bool> {
        if changes.contains_key(DOC_ID) {
            log::error!(
                "Rejecting update of collection '{}': update data cannot change 'id'",
                self.name
            );
            return Err(JotError::new(
                "Update data cannot change the 'id' field",
                ErrorKind::InvalidOperation,
            ));
        }

        let target_ids = collect_ids(&self.take_view().into_documents());
        if target_ids.is_empty() {
            log::debug!("Update on empty view of collection '{}' is a no-op", self.name);
            return Ok(false);
        }

        let _guard = self.lock_handle.write();
        let mut documents = read_documents(&self.storage, &self.path, &self.name)?;
        let now = epoch_seconds();
        let mut touched = 0usize;
        for id in &target_ids {
            if let Some((index, _)) = find_by_id(&documents, id) {
                documents[index].merge(changes);
                if self.config.include_timestamps() {
                    documents[index].put(DOC_UPDATED_AT, now)?;
                }
                touched += 1;
            }
        }

        if touched == 0 {
            log::debug!(
                "Update of collection '{}' matched no documents on disk",
                self.name
            );
            return Ok(false);
        }

        log::debug!("Updated {} document(s) in collection '{}'", touched, self.name);
        self.write_documents(&documents)?;
        self.documents = documents;
        Ok(true)
    }

    /// Removes every document of the current view from the authoritative
    /// on-disk set, compacting the remainder in order.
    ///
    /// Ids are re-validated against the fresh disk read, not the stale
    /// view. Returns `Ok(false)` without writing when the view is empty or
    /// none of its ids remain on disk.
    ///
    /// # Errors
    ///
    /// * `DeleteAllGuard` - the targeted documents are the entire
    ///   collection; `empty()` is the explicit way to clear one
    /// * `Write` - the rewrite failed
    pub fn delete(&mut self) -> JotResult<bool> {
        let target_ids: HashSet<String> = collect_ids(&self.take_view().into_documents())
            .into_iter()
            .collect();
        if target_ids.is_empty() {
            log::debug!("Delete on empty view of collection '{}' is a no-op", self.name);
            return Ok(false);
        }

        let _guard = self.lock_handle.write();
        let documents = read_documents(&self.storage, &self.path, &self.name)?;
        let matched = documents
            .iter()
            .filter(|doc| doc.id().is_some_and(|id| target_ids.contains(id)))
            .count();

        if matched == 0 {
            return Ok(false);
        }
        if matched == documents.len() {
            log::error!(
                "delete() would remove every document of collection '{}'",
                self.name
            );
            return Err(JotError::new(
                &format!(
                    "delete() would remove every document of collection '{}'; call empty() to clear a collection",
                    self.name
                ),
                ErrorKind::DeleteAllGuard,
            ));
        }

        let remaining: Vec<Document> = documents
            .into_iter()
            .filter(|doc| !doc.id().is_some_and(|id| target_ids.contains(id)))
            .collect();

        log::debug!("Deleted {} document(s) from collection '{}'", matched, self.name);
        self.write_documents(&remaining)?;
        self.documents = remaining;
        Ok(true)
    }

    /// Unconditionally overwrites the file with an empty array, bypassing
    /// the delete-all guard. Idempotent.
    ///
    /// # Errors
    ///
    /// `Write` when the rewrite fails.
    pub fn empty(&mut self) -> JotResult<()> {
        let _guard = self.lock_handle.write();
        self.view = None;

        log::debug!("Emptying collection '{}'", self.name);
        self.storage
            .write_file(&self.path, EMPTY_COLLECTION.as_bytes())?;
        self.documents.clear();
        Ok(())
    }

    // ---- internals ---------------------------------------------------

    fn take_view(&mut self) -> View {
        self.view
            .take()
            .unwrap_or_else(|| View::Documents(self.documents.clone()))
    }

    fn write_documents(&self, documents: &[Document]) -> JotResult<()> {
        let bytes = serde_json::to_vec_pretty(documents).map_err(|e| {
            log::error!("Failed to serialize collection '{}': {}", self.name, e);
            JotError::new(
                &format!("Failed to serialize collection '{}': {}", self.name, e),
                ErrorKind::Write,
            )
        })?;
        self.storage.write_file(&self.path, &bytes).map_err(|e| {
            JotError::new_with_cause(
                &format!("Failed to rewrite collection '{}'", self.name),
                ErrorKind::Write,
                e,
            )
        })
    }
}

/// Reads and parses the backing file. Locking is the caller's business:
/// mutations already hold the write lock when re-reading.
fn read_documents(storage: &Storage, path: &Path, name: &str) -> JotResult<Vec<Document>> {
    let bytes = storage.read_file(path)?;
    serde_json::from_slice::<Vec<Document>>(&bytes).map_err(|e| {
        log::error!(
            "Collection file {} is not a JSON array of objects: {}",
            path.display(),
            e
        );
        JotError::new(
            &format!(
                "Collection '{}' file is not a valid JSON array of objects: {}",
                name, e
            ),
            ErrorKind::CorruptCollection,
        )
    })
}
