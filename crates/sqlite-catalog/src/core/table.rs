//! Table, column and index descriptors.
//!
//! These are immutable point-in-time values built from `PRAGMA table_info`,
//! `PRAGMA index_list` and `PRAGMA index_xinfo` rows. Index descriptors are
//! assembled in two passes through [`IndexBuilder`], which is frozen into
//! an [`IndexDescriptor`] before anything is handed to callers.

use std::fmt;

use serde::{Serialize, Serializer};

use super::value::CatalogRow;

/// Column metadata from `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    ordinal: i64,
    name: String,
    declared_type: Option<String>,
    not_null: bool,
    default_value: Option<String>,
    primary_key_ordinal: i64,
}

impl ColumnDescriptor {
    pub fn new(
        ordinal: i64,
        name: impl Into<String>,
        declared_type: Option<String>,
        not_null: bool,
        default_value: Option<String>,
        primary_key_ordinal: i64,
    ) -> Self {
        Self {
            ordinal,
            name: name.into(),
            declared_type,
            not_null,
            default_value,
            primary_key_ordinal,
        }
    }

    /// Build from a `cid, name, type, notnull, dflt_value, pk` row.
    ///
    /// An empty declared type (`CREATE TABLE t(a)`) is reported as absent.
    pub fn from_row(row: &CatalogRow) -> Self {
        Self {
            ordinal: row.int("cid").unwrap_or_default(),
            name: row.text("name").unwrap_or_default(),
            declared_type: row.text("type").filter(|t| !t.is_empty()),
            not_null: row.flag("notnull"),
            default_value: row.text("dflt_value"),
            primary_key_ordinal: row.int("pk").unwrap_or_default(),
        }
    }

    /// Zero-based position of the column in the table.
    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type as written in the column definition, if any.
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// Default value expression, as SQL text.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// 0 when the column is not part of the primary key, otherwise its
    /// 1-based position in the key declaration.
    pub fn primary_key_ordinal(&self) -> i64 {
        self.primary_key_ordinal
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key_ordinal > 0
    }
}

/// How an index came to exist (`origin` column of `PRAGMA index_list`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexOrigin {
    /// Created by `CREATE INDEX`.
    CreateIndex,
    /// Implied by a `UNIQUE` constraint.
    UniqueConstraint,
    /// Implied by a `PRIMARY KEY` constraint.
    PrimaryKey,
    /// An origin code this crate does not recognize, preserved verbatim.
    Other(String),
}

impl IndexOrigin {
    pub fn from_code(code: &str) -> Self {
        match code {
            "c" => IndexOrigin::CreateIndex,
            "u" => IndexOrigin::UniqueConstraint,
            "pk" => IndexOrigin::PrimaryKey,
            other => IndexOrigin::Other(other.to_string()),
        }
    }

    /// The raw origin code.
    pub fn code(&self) -> &str {
        match self {
            IndexOrigin::CreateIndex => "c",
            IndexOrigin::UniqueConstraint => "u",
            IndexOrigin::PrimaryKey => "pk",
            IndexOrigin::Other(code) => code,
        }
    }
}

impl fmt::Display for IndexOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for IndexOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// One entry of `PRAGMA index_xinfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedColumn {
    index_position: i64,
    table_position: Option<i64>,
    name: Option<String>,
    descending: bool,
    collation: String,
    is_key: bool,
}

impl IndexedColumn {
    pub fn new(
        index_position: i64,
        table_position: Option<i64>,
        name: Option<String>,
        descending: bool,
        collation: impl Into<String>,
        is_key: bool,
    ) -> Self {
        Self {
            index_position,
            table_position,
            name,
            descending,
            collation: collation.into(),
            is_key,
        }
    }

    /// Build from a `seqno, cid, name, desc, coll, key` row.
    ///
    /// SQLite reports `cid` -1 for the rowid and -2 for expressions; both
    /// have no position in the table and map to `None`.
    pub fn from_row(row: &CatalogRow) -> Self {
        Self {
            index_position: row.int("seqno").unwrap_or_default(),
            table_position: row.int("cid").filter(|cid| *cid >= 0),
            name: row.text("name"),
            descending: row.flag("desc"),
            collation: row.text("coll").unwrap_or_default(),
            is_key: row.flag("key"),
        }
    }

    /// Zero-based position within the index.
    pub fn index_position(&self) -> i64 {
        self.index_position
    }

    /// Column ordinal within the table; `None` for rowid and expressions.
    pub fn table_position(&self) -> Option<i64> {
        self.table_position
    }

    /// Column name; `None` for expression entries.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn collation(&self) -> &str {
        &self.collation
    }

    /// Whether this is a key column rather than an auxiliary one.
    pub fn is_key(&self) -> bool {
        self.is_key
    }
}

/// Index metadata with its columns in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    name: String,
    sequence: i64,
    is_unique: bool,
    origin: IndexOrigin,
    is_partial: bool,
    columns: Vec<IndexedColumn>,
}

impl IndexDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequence number assigned by the engine in `PRAGMA index_list`.
    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    pub fn origin(&self) -> &IndexOrigin {
        &self.origin
    }

    /// Whether the index has a `WHERE` predicate.
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// All index entries, key and auxiliary, in index order.
    pub fn columns(&self) -> &[IndexedColumn] {
        &self.columns
    }

    pub fn key_columns(&self) -> impl Iterator<Item = &IndexedColumn> {
        self.columns.iter().filter(|c| c.is_key)
    }

    /// Names of the key columns, in index order. Expression entries are skipped.
    pub fn column_names(&self) -> Vec<&str> {
        self.key_columns().filter_map(IndexedColumn::name).collect()
    }
}

/// Mutable accumulator for an index during catalog reading.
///
/// Created from a `PRAGMA index_list` row with no columns, filled from
/// `PRAGMA index_xinfo`, then frozen with [`IndexBuilder::build`].
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    name: String,
    sequence: i64,
    is_unique: bool,
    origin: IndexOrigin,
    is_partial: bool,
    columns: Vec<IndexedColumn>,
}

impl IndexBuilder {
    /// Start from a `seq, name, unique, origin, partial` row.
    pub fn from_row(row: &CatalogRow) -> Self {
        Self {
            name: row.text("name").unwrap_or_default(),
            sequence: row.int("seq").unwrap_or_default(),
            is_unique: row.flag("unique"),
            origin: IndexOrigin::from_code(&row.text("origin").unwrap_or_default()),
            is_partial: row.flag("partial"),
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one column per `PRAGMA index_xinfo` row, in row order.
    pub fn extend_from_rows(&mut self, rows: &[CatalogRow]) {
        self.columns.extend(rows.iter().map(IndexedColumn::from_row));
    }

    pub fn build(self) -> IndexDescriptor {
        IndexDescriptor {
            name: self.name,
            sequence: self.sequence,
            is_unique: self.is_unique,
            origin: self.origin,
            is_partial: self.is_partial,
            columns: self.columns,
        }
    }
}

/// A table with its columns and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    name: String,
    columns: Vec<ColumnDescriptor>,
    indexes: Vec<IndexDescriptor>,
}

impl TableDescriptor {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        indexes: Vec<IndexDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            indexes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn indexes(&self) -> &[IndexDescriptor] {
        &self.indexes
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn index(&self, name: &str) -> Option<&IndexDescriptor> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Primary key columns in key declaration order.
    pub fn primary_key_columns(&self) -> Vec<&ColumnDescriptor> {
        let mut pk: Vec<_> = self.columns.iter().filter(|c| c.is_primary_key()).collect();
        pk.sort_by_key(|c| c.primary_key_ordinal);
        pk
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(ColumnDescriptor::is_primary_key)
    }
}
