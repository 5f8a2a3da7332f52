use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::collection::Document;
use crate::common::util::dot;
use crate::common::Value;
use crate::errors::{ErrorKind, JotError, JotResult};

/// Comparison operator of a range predicate.
///
/// `Eq` uses loose equality (numeric values compare by magnitude across the
/// integer/float divide); the remaining operators use the native ordering of
/// [Value::compare] and fail against values that do not admit an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Loose equality (`=`)
    Eq,
    /// Greater than or equal (`>=`)
    Gte,
    /// Strictly greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    Lte,
    /// Strictly less than (`<`)
    Lt,
}

impl Display for CompareOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Lte => write!(f, "<="),
            CompareOp::Lt => write!(f, "<"),
        }
    }
}

impl FromStr for CompareOp {
    type Err = JotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(CompareOp::Eq),
            ">=" => Ok(CompareOp::Gte),
            ">" => Ok(CompareOp::Gt),
            "<=" => Ok(CompareOp::Lte),
            "<" => Ok(CompareOp::Lt),
            other => {
                log::error!("Unknown filter operator '{}'", other);
                Err(JotError::new(
                    &format!(
                        "Unknown filter operator '{}', expected one of =, >=, >, <=, <",
                        other
                    ),
                    ErrorKind::FilterFormat,
                ))
            }
        }
    }
}

/// One condition of a [Filter].
///
/// The two variants preserve the two call shapes of the query surface:
/// a bare `field: value` entry is [Predicate::Equals] with strict equality,
/// a `[field, op, value]` entry is [Predicate::Compare].
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The field must exist and strictly equal the value (same variant,
    /// same content).
    Equals { field: String, value: Value },
    /// The field must exist and stand in the given relation to the value.
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
}

impl Predicate {
    fn field(&self) -> &str {
        match self {
            Predicate::Equals { field, .. } => field,
            Predicate::Compare { field, .. } => field,
        }
    }

    fn matches(&self, document: &Document) -> bool {
        let actual = match lookup(document, self.field()) {
            Some(value) => value,
            // an absent field (including an unresolvable dot-path) fails
            // the predicate
            None => return false,
        };

        match self {
            Predicate::Equals { value, .. } => actual == value,
            Predicate::Compare { op, value, .. } => match op {
                CompareOp::Eq => actual.loose_eq(value),
                CompareOp::Gte => matches!(
                    actual.compare(value),
                    Some(Ordering::Greater | Ordering::Equal)
                ),
                CompareOp::Gt => matches!(actual.compare(value), Some(Ordering::Greater)),
                CompareOp::Lte => matches!(
                    actual.compare(value),
                    Some(Ordering::Less | Ordering::Equal)
                ),
                CompareOp::Lt => matches!(actual.compare(value), Some(Ordering::Less)),
            },
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Equals { field, value } => write!(f, "({} == {})", field, value),
            Predicate::Compare { field, op, value } => {
                write!(f, "({} {} {})", field, op, value)
            }
        }
    }
}

/// Resolves a field reference against a document: dot-paths walk nested
/// documents, plain names use direct lookup.
fn lookup<'a>(document: &'a Document, field: &str) -> Option<&'a Value> {
    if dot::is_dot_path(field) {
        dot::resolve(document, field)
    } else {
        document.get_opt(field)
    }
}

/// An ordered conjunction of predicates over document fields.
///
/// A document passes the filter only if **all** predicates pass; an empty
/// filter passes everything. Filters are built fluently or parsed from the
/// dynamic document shape a caller may hand over at runtime.
///
/// # Examples
///
/// ```
/// use jotdb::filter::Filter;
/// use jotdb::doc;
///
/// // Fluent form
/// let filter = Filter::new().eq("location.state", "KY").gte("age", 21);
///
/// // Dynamic form: bare entries mean equality, 3-element arrays are
/// // [field, operator, value] comparisons
/// let dynamic = Filter::parse(&doc! {
///     "location.state": "KY",
///     age: ["age", ">=", 21]
/// }).unwrap();
///
/// let person = doc! { age: 30, location: { state: "KY" } };
/// assert!(filter.matches(&person));
/// assert!(dynamic.matches(&person));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Creates an empty filter that matches every document.
    pub fn new() -> Self {
        Filter {
            predicates: Vec::new(),
        }
    }

    /// Adds a strict equality predicate.
    pub fn eq<T: Into<Value>>(mut self, field: &str, value: T) -> Self {
        self.predicates.push(Predicate::Equals {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    /// Adds a comparison predicate with an explicit operator.
    pub fn compare<T: Into<Value>>(mut self, field: &str, op: CompareOp, value: T) -> Self {
        self.predicates.push(Predicate::Compare {
            field: field.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    /// Adds a loose equality (`=`) predicate.
    pub fn loose_eq<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.compare(field, CompareOp::Eq, value)
    }

    /// Adds a `>=` predicate.
    pub fn gte<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.compare(field, CompareOp::Gte, value)
    }

    /// Adds a `>` predicate.
    pub fn gt<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.compare(field, CompareOp::Gt, value)
    }

    /// Adds a `<=` predicate.
    pub fn lte<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.compare(field, CompareOp::Lte, value)
    }

    /// Adds a `<` predicate.
    pub fn lt<T: Into<Value>>(self, field: &str, value: T) -> Self {
        self.compare(field, CompareOp::Lt, value)
    }

    /// Parses a filter from its dynamic document shape.
    ///
    /// Each entry of `predicates` is either a literal value, meaning "field
    /// strictly equals value", or a 3-element array `[field, operator,
    /// value]` where the first two elements are strings and the operator is
    /// one of `=`, `>=`, `>`, `<=`, `<`.
    ///
    /// # Errors
    ///
    /// `FilterFormat` when an array entry does not have exactly three
    /// elements, its field or operator element is not a string, or the
    /// operator is unknown.
    pub fn parse(predicates: &Document) -> JotResult<Filter> {
        let mut filter = Filter::new();
        for (key, entry) in predicates.iter() {
            match entry {
                Value::Array(parts) => {
                    filter.predicates.push(parse_compare(key, parts)?);
                }
                value => {
                    filter.predicates.push(Predicate::Equals {
                        field: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(filter)
    }

    /// Checks whether the document passes every predicate.
    pub fn matches(&self, document: &Document) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(document))
    }

    /// Checks if the filter has no predicates (and so matches everything).
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the number of predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Iterates the predicates in insertion order.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for predicate in &self.predicates {
            if !first {
                write!(f, " && ")?;
            }
            write!(f, "{}", predicate)?;
            first = false;
        }
        if first {
            write!(f, "(all)")?;
        }
        Ok(())
    }
}

fn parse_compare(key: &str, parts: &[Value]) -> JotResult<Predicate> {
    if parts.len() != 3 {
        log::error!(
            "Filter entry '{}' has {} elements, expected [field, operator, value]",
            key,
            parts.len()
        );
        return Err(JotError::new(
            &format!(
                "Filter entry '{}' must be a 3-element [field, operator, value] array, got {} elements",
                key,
                parts.len()
            ),
            ErrorKind::FilterFormat,
        ));
    }

    let field = parts[0].as_string().ok_or_else(|| {
        log::error!("Filter entry '{}' has a non-string field element", key);
        JotError::new(
            &format!("Filter entry '{}' field element must be a string", key),
            ErrorKind::FilterFormat,
        )
    })?;

    let op = parts[1].as_string().ok_or_else(|| {
        log::error!("Filter entry '{}' has a non-string operator element", key);
        JotError::new(
            &format!("Filter entry '{}' operator element must be a string", key),
            ErrorKind::FilterFormat,
        )
    })?;

    Ok(Predicate::Compare {
        field: field.clone(),
        op: op.parse()?,
        value: parts[2].clone(),
    })
}
