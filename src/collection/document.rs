use indexmap::IndexMap;
use itertools::Itertools;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

use crate::common::{Value, DOC_ID};
use crate::errors::{ErrorKind, JotError, JotResult};

static NULL: Value = Value::Null;

/// Represents one record of a collection.
///
/// A document is composed of key-value pairs. The key is always a [String]
/// and the value is a [Value]. Field order is insertion order and is
/// preserved through serialization, so a collection file stays stable and
/// human-readable across rewrites.
///
/// Nesting is expressed through values: a field may hold
/// [Value::Document], and filters address nested fields with dot-paths like
/// `location.state`. Keys themselves are plain names; a dotted string used
/// as a key stays a literal key.
///
/// The field `id` is reserved: it identifies the document within its
/// collection and must be a non-empty string. When timestamps are enabled
/// the engine also maintains `createdAt` and `updatedAt` (epoch seconds).
///
/// # Examples
///
/// ```ignore
/// let mut doc = Document::new();
/// doc.put("name", "Alice")?;
/// doc.put("age", 30i64)?;
/// doc.put("location", doc! { state: "KY" })?;
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified value with the specified key.
    ///
    /// Inserts a key-value pair into the document, updating the value in
    /// place when the key already exists (field order keeps the original
    /// position).
    ///
    /// # Arguments
    ///
    /// * `key` - The field name. Cannot be empty.
    /// * `value` - Anything that implements `Into<Value>` (primitives,
    ///   strings, documents, arrays).
    ///
    /// # Errors
    ///
    /// * The key is empty (`InvalidOperation`)
    /// * The key is `id` and the value is not a non-empty string
    ///   (`InvalidId`)
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30i64)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> JotResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(JotError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        if key == DOC_ID {
            match value.as_string() {
                Some(id) if !id.is_empty() => {}
                _ => {
                    log::error!("Document id must be a non-empty string");
                    return Err(JotError::new(
                        "Document id must be a non-empty string",
                        ErrorKind::InvalidId,
                    ));
                }
            }
        }

        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Returns the value associated with the key, or [Value::Null] when the
    /// document contains no such field.
    ///
    /// The borrow-based twin of [Document::get_opt] for call sites that do
    /// not care about the present-but-null distinction.
    pub fn get(&self, key: &str) -> &Value {
        self.data.get(key).unwrap_or(&NULL)
    }

    /// Returns the value associated with the key, or [None] when the field
    /// is absent. A field explicitly set to null yields `Some(&Value::Null)`.
    pub fn get_opt(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns the document id when present and string-valued.
    pub fn id(&self) -> Option<&str> {
        self.data
            .get(DOC_ID)
            .and_then(|value| value.as_string())
            .map(|s| s.as_str())
    }

    /// Checks if the document has a string id.
    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Removes a field, returning its value when it existed.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Returns the number of fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Checks if the document contains the given field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Top-level field names, in insertion order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Overwrites this document's fields with the fields of `other`,
    /// top level only. Fields absent from `other` are untouched; nested
    /// documents are replaced wholesale, not merged.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Builds a copy reduced to the named fields, in the requested order.
    /// Fields the document does not have are omitted, not nulled.
    pub fn project(&self, fields: &[&str]) -> Document {
        let mut projected = Document::new();
        for field in fields {
            if let Some(value) = self.data.get(*field) {
                projected.data.insert((*field).to_string(), value.clone());
            }
        }
        projected
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    // Deserialization entry: no validation, foreign files may carry shapes
    // put() would reject (e.g. numeric ids), and they must still load.
    pub(crate) fn insert_raw(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.data
                .iter()
                .map(|(key, value)| format!("{:?}: {}", key, value))
                .join(", ")
        )
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (key, value) in &self.data {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut doc = Document::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.insert_raw(key, value);
        }
        Ok(doc)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Document, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys are bare identifiers or quoted strings; values are literals, nested
/// `{ ... }` documents, `[ ... ]` arrays, or arbitrary expressions.
///
/// # Examples
///
/// ```rust
/// use jotdb::doc;
///
/// // Empty document
/// let empty = doc!{};
///
/// // Fields, nesting and arrays
/// let user = doc! {
///     id: "u1",
///     username: "ada",
///     age: 36,
///     location: { state: "KY" },
///     tags: ["admin", "ops"]
/// };
/// assert_eq!(user.size(), 5);
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document (with braces)
    ({}) => {
        $crate::collection::Document::new()
    };

    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs (outer braces)
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, literal, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.size(), 0);
    }

    #[test]
    fn put_and_get_round_trip() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30i64).unwrap();
        assert_eq!(doc.get("name"), &Value::from("Alice"));
        assert_eq!(doc.get("age"), &Value::I64(30));
        assert_eq!(doc.size(), 2);
    }

    #[test]
    fn get_missing_field_returns_null() {
        let doc = doc! { name: "Alice" };
        assert_eq!(doc.get("missing"), &Value::Null);
        assert_eq!(doc.get_opt("missing"), None);
    }

    #[test]
    fn get_opt_distinguishes_explicit_null() {
        let mut doc = Document::new();
        doc.put("nickname", Value::Null).unwrap();
        assert_eq!(doc.get_opt("nickname"), Some(&Value::Null));
        assert_eq!(doc.get_opt("other"), None);
    }

    #[test]
    fn put_rejects_empty_key() {
        let mut doc = Document::new();
        let err = doc.put("", 1i64).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn put_rejects_non_string_id() {
        let mut doc = Document::new();
        let err = doc.put("id", 42i64).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn put_rejects_empty_string_id() {
        let mut doc = Document::new();
        let err = doc.put("id", "").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn put_accepts_string_id() {
        let mut doc = Document::new();
        doc.put("id", "u1").unwrap();
        assert_eq!(doc.id(), Some("u1"));
        assert!(doc.has_id());
    }

    #[test]
    fn id_is_none_for_non_string_value() {
        let mut doc = Document::new();
        doc.insert_raw("id".to_string(), Value::I64(5));
        assert_eq!(doc.id(), None);
        assert!(!doc.has_id());
    }

    #[test]
    fn put_overwrites_in_place() {
        let mut doc = doc! { status: "inactive", age: 1 };
        doc.put("status", "active").unwrap();
        assert_eq!(doc.get("status"), &Value::from("active"));
        // overwrite keeps the original field position
        assert_eq!(doc.fields(), vec!["status".to_string(), "age".to_string()]);
    }

    #[test]
    fn remove_returns_old_value() {
        let mut doc = doc! { a: 1, b: 2 };
        assert_eq!(doc.remove("a"), Some(Value::I64(1)));
        assert_eq!(doc.remove("a"), None);
        assert_eq!(doc.size(), 1);
    }

    #[test]
    fn merge_overwrites_top_level_fields() {
        let mut doc = doc! { a: 1, b: 2 };
        let patch = doc! { b: 20, c: 30 };
        doc.merge(&patch);
        assert_eq!(doc.get("a"), &Value::I64(1));
        assert_eq!(doc.get("b"), &Value::I64(20));
        assert_eq!(doc.get("c"), &Value::I64(30));
    }

    #[test]
    fn project_keeps_requested_fields_only() {
        let doc = doc! { id: "1", name: "Alice", age: 30 };
        let projected = doc.project(&["name", "missing", "id"]);
        assert_eq!(projected.size(), 2);
        assert_eq!(projected.fields(), vec!["name".to_string(), "id".to_string()]);
        assert_eq!(projected.get("name"), &Value::from("Alice"));
    }

    #[test]
    fn serialization_preserves_insertion_order() {
        let doc = doc! { zebra: 1, alpha: 2, mike: 3 };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, "{\"zebra\":1,\"alpha\":2,\"mike\":3}");
    }

    #[test]
    fn deserializes_from_plain_json() {
        let doc: Document = serde_json::from_str("{\"id\": \"x\", \"n\": 1}").unwrap();
        assert_eq!(doc.id(), Some("x"));
        assert_eq!(doc.get("n"), &Value::I64(1));
    }

    #[test]
    fn serde_round_trip_with_nesting() {
        let original = doc! {
            id: "42",
            profile: { name: "Ada", langs: ["rust", "php"] },
            active: true
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn doc_macro_supports_quoted_and_bare_keys() {
        let doc = doc! { "dotted.key": 1, plain: 2 };
        assert!(doc.contains_key("dotted.key"));
        assert!(doc.contains_key("plain"));
    }

    #[test]
    fn doc_macro_supports_expressions() {
        let username = String::from("ada");
        let doc = doc! { username: username.clone(), next_age: (36 + 1) };
        assert_eq!(doc.get("username"), &Value::from("ada"));
        assert_eq!(doc.get("next_age"), &Value::I64(37));
    }

    #[test]
    fn display_renders_fields_in_order() {
        let doc = doc! { b: 1, a: 2 };
        let rendered = doc.to_string();
        assert!(rendered.starts_with("{\"b\": 1"));
        assert!(rendered.contains("\"a\": 2"));
    }

    #[test]
    fn normalize_strips_quotes() {
        assert_eq!(normalize("\"quoted\""), "quoted");
        assert_eq!(normalize("bare"), "bare");
    }
}
