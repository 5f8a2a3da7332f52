use crate::collection::Document;

/// Locates a document by its `id` field within an ordered sequence.
///
/// The scan always walks the whole sequence without short-circuiting; if
/// several documents share an id (which the uniqueness invariant should
/// prevent) the **last** match wins, matching linear-overwrite behavior.
/// Only string-valued `id` fields participate in matching.
///
/// # Arguments
///
/// * `documents` - The sequence to scan
/// * `id` - The id value to look for
///
/// # Returns
///
/// The index and document of the last match, or [None].
pub fn find_by_id<'a>(documents: &'a [Document], id: &str) -> Option<(usize, &'a Document)> {
    let mut found = None;
    for (index, document) in documents.iter().enumerate() {
        if let Some(doc_id) = document.id() {
            if doc_id == id {
                found = Some((index, document));
            }
        }
    }
    found
}

/// Returns true when a document with the given id exists in the sequence.
pub fn id_exists(documents: &[Document], id: &str) -> bool {
    find_by_id(documents, id).is_some()
}

/// Extracts all string ids from the sequence, in order.
pub(crate) fn collect_ids(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|doc| doc.id().map(|id| id.to_string()))
        .collect()
}
