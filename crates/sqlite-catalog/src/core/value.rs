//! Dynamically typed catalog values and rows.
//!
//! Catalog queries and PRAGMA commands return loosely typed rows: a field
//! may be missing, NULL, or reported as text where a number is expected.
//! [`CatalogRow`] owns one such row and offers accessors that coerce the
//! way SQLite does, so model constructors can substitute defaults instead
//! of failing.

use serde::Serialize;

/// One dynamically typed value, mirroring SQLite storage classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CatalogValue {
    /// Whether the value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }

    /// Text form of the value. NULL and blobs that are not UTF-8 have none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CatalogValue::Null => None,
            CatalogValue::Integer(v) => Some(v.to_string()),
            CatalogValue::Real(v) => Some(v.to_string()),
            CatalogValue::Text(s) => Some(s.clone()),
            CatalogValue::Blob(b) => String::from_utf8(b.clone()).ok(),
        }
    }

    /// Integer form of the value.
    ///
    /// Text is parsed after trimming; reals are truncated only when they
    /// carry no fractional part.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CatalogValue::Integer(v) => Some(*v),
            CatalogValue::Real(v) if v.fract() == 0.0 => Some(*v as i64),
            CatalogValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<i64> for CatalogValue {
    fn from(v: i64) -> Self {
        CatalogValue::Integer(v)
    }
}

impl From<&str> for CatalogValue {
    fn from(v: &str) -> Self {
        CatalogValue::Text(v.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(v: String) -> Self {
        CatalogValue::Text(v)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CatalogValue::Null)
    }
}

/// An owned row returned by a [`QueryExecutor`](super::traits::QueryExecutor).
///
/// Column names are matched case-insensitively, as SQLite does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRow {
    columns: Vec<String>,
    values: Vec<CatalogValue>,
}

impl CatalogRow {
    /// Create a row from parallel column-name and value lists.
    pub fn new(columns: Vec<String>, values: Vec<CatalogValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Build a row from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CatalogValue>,
    {
        let (columns, values) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self { columns, values }
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value by column name; `None` when the column is not in the row.
    pub fn get(&self, name: &str) -> Option<&CatalogValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| &self.values[i])
    }

    /// Value by position.
    pub fn get_at(&self, index: usize) -> Option<&CatalogValue> {
        self.values.get(index)
    }

    /// Text accessor: missing column and NULL both give `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(CatalogValue::as_text)
    }

    /// Integer accessor: missing column, NULL and non-numeric text give `None`.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(CatalogValue::as_int)
    }

    /// Boolean accessor for 0/1 catalog flags. Absent flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.int(name).is_some_and(|v| v != 0)
    }
}
