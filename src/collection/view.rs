use std::fmt::{Debug, Display, Formatter};

use crate::collection::Document;

/// The transient result of a query chain.
///
/// A view is produced by the query methods of a collection and consumed by
/// a terminal read or a mutation; it never persists. The three states carry
/// the three shapes a chain can end in:
///
/// - [View::Documents]: the general case, an ordered subset of the
///   collection
/// - [View::Document]: exactly one document, after `id(...)` narrowed the
///   chain
/// - [View::NotFound]: an explicit miss, e.g. `id(...)` with an unknown id
///
/// # Examples
///
/// ```rust,ignore
/// let view = users.filter(&Filter::new().gte("age", 21)).get();
/// for doc in view.documents() {
///     println!("{}", doc);
/// }
/// ```
#[derive(Clone, PartialEq)]
pub enum View {
    /// An ordered sequence of documents.
    Documents(Vec<Document>),
    /// A single document, after narrowing by id.
    Document(Document),
    /// An explicit empty result.
    NotFound,
}

impl View {
    /// Number of documents in the view (a single document counts 1, a miss
    /// counts 0).
    pub fn count(&self) -> usize {
        match self {
            View::Documents(docs) => docs.len(),
            View::Document(_) => 1,
            View::NotFound => 0,
        }
    }

    /// Checks if the view holds no documents.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Checks if the view is the explicit miss state.
    pub fn is_not_found(&self) -> bool {
        matches!(self, View::NotFound)
    }

    /// The documents of the view as a sequence, in order. A miss yields an
    /// empty sequence.
    pub fn into_documents(self) -> Vec<Document> {
        match self {
            View::Documents(docs) => docs,
            View::Document(doc) => vec![doc],
            View::NotFound => Vec::new(),
        }
    }

    /// Borrowing iteration over the view's documents, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        let docs: Vec<&Document> = match self {
            View::Documents(docs) => docs.iter().collect(),
            View::Document(doc) => vec![doc],
            View::NotFound => Vec::new(),
        };
        docs.into_iter()
    }

    /// The first document of the view, when any.
    pub fn first(&self) -> Option<&Document> {
        match self {
            View::Documents(docs) => docs.first(),
            View::Document(doc) => Some(doc),
            View::NotFound => None,
        }
    }

    /// The single document of the view, when it was narrowed to one.
    pub fn single(&self) -> Option<&Document> {
        match self {
            View::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Projects every document down to the named fields (omission, not
    /// renaming). [View::NotFound] passes through unchanged.
    pub fn project(self, fields: &[&str]) -> View {
        match self {
            View::Documents(docs) => {
                View::Documents(docs.iter().map(|doc| doc.project(fields)).collect())
            }
            View::Document(doc) => View::Document(doc.project(fields)),
            View::NotFound => View::NotFound,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Documents(Vec::new())
    }
}

impl Debug for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Documents(docs) => {
                write!(f, "[")?;
                for (i, doc) in docs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", doc)?;
                }
                write!(f, "]")
            }
            View::Document(doc) => write!(f, "{}", doc),
            View::NotFound => write!(f, "not found"),
        }
    }
}

impl IntoIterator for View {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_documents().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn count_covers_all_states() {
        assert_eq!(View::Documents(vec![doc! {a: 1}, doc! {a: 2}]).count(), 2);
        assert_eq!(View::Document(doc! {a: 1}).count(), 1);
        assert_eq!(View::NotFound.count(), 0);
    }

    #[test]
    fn emptiness_and_miss_are_distinct() {
        let empty = View::Documents(Vec::new());
        assert!(empty.is_empty());
        assert!(!empty.is_not_found());
        assert!(View::NotFound.is_empty());
        assert!(View::NotFound.is_not_found());
    }

    #[test]
    fn into_documents_flattens_states() {
        assert_eq!(View::NotFound.into_documents(), Vec::new());
        assert_eq!(
            View::Document(doc! {id: "x"}).into_documents(),
            vec![doc! {id: "x"}]
        );
    }

    #[test]
    fn first_and_single() {
        let many = View::Documents(vec![doc! {a: 1}, doc! {a: 2}]);
        assert_eq!(many.first().unwrap(), &doc! {a: 1});
        assert!(many.single().is_none());

        let one = View::Document(doc! {a: 1});
        assert_eq!(one.single().unwrap(), &doc! {a: 1});
        assert!(View::NotFound.first().is_none());
    }

    #[test]
    fn projection_keeps_named_fields() {
        let view = View::Documents(vec![
            doc! { id: "1", name: "Alice", age: 30 },
            doc! { id: "2", name: "Bob", age: 25 },
        ]);
        let projected = view.project(&["name"]);
        for doc in projected.iter() {
            assert_eq!(doc.size(), 1);
            assert!(doc.contains_key("name"));
        }
    }

    #[test]
    fn projecting_not_found_stays_not_found() {
        assert!(View::NotFound.project(&["name"]).is_not_found());
    }

    #[test]
    fn view_iterates_in_order() {
        let view = View::Documents(vec![doc! {n: 1}, doc! {n: 2}, doc! {n: 3}]);
        let ns: Vec<i64> = view
            .into_iter()
            .map(|d| d.get("n").as_i64().unwrap())
            .collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[test]
    fn display_renders_each_state() {
        assert_eq!(View::NotFound.to_string(), "not found");
        assert!(View::Documents(vec![doc! {a: 1}]).to_string().starts_with("["));
    }
}
