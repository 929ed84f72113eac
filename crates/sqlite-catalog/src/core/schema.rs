//! Catalog entries and whole-database schema snapshots.
//!
//! A [`SchemaSnapshot`] is a point-in-time copy of the `sqlite_master`
//! listing. It holds no connection and never reflects later catalog changes.

use std::fmt;

use serde::{Serialize, Serializer};

use super::value::CatalogRow;

/// Kind of catalog object, as reported in the `type` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Table,
    Index,
    View,
    Trigger,
    /// A type code this crate does not recognize, preserved verbatim.
    Other(String),
}

impl EntryKind {
    /// Parse a catalog type code. Unknown codes map to [`EntryKind::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "table" => EntryKind::Table,
            "index" => EntryKind::Index,
            "view" => EntryKind::View,
            "trigger" => EntryKind::Trigger,
            other => EntryKind::Other(other.to_string()),
        }
    }

    /// The catalog type code for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::Table => "table",
            EntryKind::Index => "index",
            EntryKind::View => "view",
            EntryKind::Trigger => "trigger",
            EntryKind::Other(code) => code,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    kind: EntryKind,
    name: String,
    table_name: String,
    root_page: Option<i64>,
    sql: Option<String>,
}

impl SchemaEntry {
    /// Create an entry from already-parsed parts.
    pub fn new(
        kind: EntryKind,
        name: impl Into<String>,
        table_name: impl Into<String>,
        root_page: Option<i64>,
        sql: Option<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            table_name: table_name.into(),
            root_page,
            sql,
        }
    }

    /// Build an entry from a `type, name, tbl_name, rootpage, sql` row.
    ///
    /// Missing or NULL `type`, `name` and `tbl_name` become empty strings;
    /// missing `rootpage` and `sql` stay absent.
    pub fn from_row(row: &CatalogRow) -> Self {
        Self {
            kind: EntryKind::from_code(&row.text("type").unwrap_or_default()),
            name: row.text("name").unwrap_or_default(),
            table_name: row.text("tbl_name").unwrap_or_default(),
            root_page: row.int("rootpage"),
            sql: row.text("sql"),
        }
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the table this object belongs to (itself, for tables).
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Root b-tree page, when the object has storage.
    pub fn root_page(&self) -> Option<i64> {
        self.root_page
    }

    /// Defining SQL. Absent for automatically created indexes.
    pub fn sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Whether the object is owned by the engine (`sqlite_` prefix).
    pub fn is_internal(&self) -> bool {
        self.name.starts_with("sqlite_")
    }
}

/// Every catalog entry of a database, in catalog enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaSnapshot {
    entries: Vec<SchemaEntry>,
}

impl SchemaSnapshot {
    pub fn new(entries: Vec<SchemaEntry>) -> Self {
        Self { entries }
    }

    /// Build a snapshot with one entry per catalog row.
    pub fn from_rows(rows: &[CatalogRow]) -> Self {
        Self {
            entries: rows.iter().map(SchemaEntry::from_row).collect(),
        }
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with exactly this name, scanning in catalog order.
    pub fn entry(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entries_of_kind<'a>(
        &'a self,
        kind: &'a EntryKind,
    ) -> impl Iterator<Item = &'a SchemaEntry> + 'a {
        self.entries.iter().filter(move |e| &e.kind == kind)
    }

    pub fn tables(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Table)
    }

    pub fn indexes(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Index)
    }

    pub fn views(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::View)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Trigger)
    }

    /// Names of all table entries, in catalog order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables().map(SchemaEntry::name).collect()
    }

    /// Index entries whose owning table is `table`.
    pub fn indexes_for_table<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = &'a SchemaEntry> + 'a {
        self.indexes().filter(move |e| e.table_name == table)
    }
}

impl<'a> IntoIterator for &'a SchemaSnapshot {
    type Item = &'a SchemaEntry;
    type IntoIter = std::slice::Iter<'a, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
