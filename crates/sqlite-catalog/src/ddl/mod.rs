//! DDL statement builders.
//!
//! Pure functions that assemble CREATE / ALTER / DROP statement text. They
//! never touch a database; pass the result to
//! [`QueryExecutor::execute`](crate::core::QueryExecutor::execute) or
//! [`CatalogReader::apply`](crate::reader::CatalogReader::apply).
//!
//! Every table, index and column *name* is quoted with
//! [`quote_ident`]. Column definitions, constraint definitions, index
//! column expressions and partial-index predicates are raw SQL and are
//! inserted verbatim: sanitizing them is the caller's job.
//!
//! # Preconditions
//!
//! [`create_table`] and [`create_index`] require a non-empty list. An empty
//! list is not checked and yields SQL the engine will reject.

use crate::core::identifier::quote_ident;

/// Options for [`create_table`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTableOptions {
    /// Emit `IF NOT EXISTS`.
    pub if_not_exists: bool,
}

/// Options for [`drop_table`] and [`drop_index`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DropOptions {
    /// Emit `IF EXISTS`.
    pub if_exists: bool,
}

/// Options for [`create_index`].
#[derive(Debug, Clone, Default)]
pub struct CreateIndexOptions {
    /// Emit `UNIQUE`.
    pub unique: bool,
    /// Emit `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Partial-index predicate, inserted after `WHERE` as-is.
    pub where_clause: Option<String>,
}

fn if_not_exists(flag: bool) -> &'static str {
    if flag {
        "IF NOT EXISTS "
    } else {
        ""
    }
}

fn if_exists(flag: bool) -> &'static str {
    if flag {
        "IF EXISTS "
    } else {
        ""
    }
}

/// `CREATE TABLE [IF NOT EXISTS] "name" (def, ...)`
///
/// `definitions` are column and table-constraint definitions such as
/// `"id INTEGER PRIMARY KEY"` or `"UNIQUE (a, b)"`. Must not be empty.
pub fn create_table<S: AsRef<str>>(
    name: &str,
    definitions: &[S],
    opts: &CreateTableOptions,
) -> String {
    let defs = definitions
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE {}{} ({})",
        if_not_exists(opts.if_not_exists),
        quote_ident(name),
        defs
    )
}

/// `DROP TABLE [IF EXISTS] "name"`
pub fn drop_table(name: &str, opts: &DropOptions) -> String {
    format!("DROP TABLE {}{}", if_exists(opts.if_exists), quote_ident(name))
}

/// `ALTER TABLE "old" RENAME TO "new"`
pub fn rename_table(old_name: &str, new_name: &str) -> String {
    format!(
        "ALTER TABLE {} RENAME TO {}",
        quote_ident(old_name),
        quote_ident(new_name)
    )
}

/// `ALTER TABLE "table" ADD COLUMN <definition>`
pub fn add_column(table: &str, definition: &str) -> String {
    format!("ALTER TABLE {} ADD COLUMN {}", quote_ident(table), definition)
}

/// `ALTER TABLE "table" RENAME COLUMN "old" TO "new"` (SQLite 3.25+)
pub fn rename_column(table: &str, old_name: &str, new_name: &str) -> String {
    format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        quote_ident(table),
        quote_ident(old_name),
        quote_ident(new_name)
    )
}

/// `ALTER TABLE "table" DROP COLUMN "column"` (SQLite 3.35+)
pub fn drop_column(table: &str, column: &str) -> String {
    format!(
        "ALTER TABLE {} DROP COLUMN {}",
        quote_ident(table),
        quote_ident(column)
    )
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] "name" ON "table" (col, ...) [WHERE expr]`
///
/// `columns` are indexed-column expressions (`"a"`, `"b DESC"`,
/// `"lower(c)"`) and are inserted verbatim. Must not be empty.
pub fn create_index<S: AsRef<str>>(
    name: &str,
    table: &str,
    columns: &[S],
    opts: &CreateIndexOptions,
) -> String {
    let unique = if opts.unique { "UNIQUE " } else { "" };
    let cols = columns
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "CREATE {}INDEX {}{} ON {} ({})",
        unique,
        if_not_exists(opts.if_not_exists),
        quote_ident(name),
        quote_ident(table),
        cols
    );

    if let Some(ref predicate) = opts.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(predicate);
    }

    sql
}

/// `DROP INDEX [IF EXISTS] "name"`
pub fn drop_index(name: &str, opts: &DropOptions) -> String {
    format!("DROP INDEX {}{}", if_exists(opts.if_exists), quote_ident(name))
}
