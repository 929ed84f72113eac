//! Catalog reflection and DDL tests against in-memory SQLite databases.

use sqlite_catalog::ddl::{self, CreateIndexOptions, CreateTableOptions, DropOptions};
use sqlite_catalog::{CatalogReader, EntryKind, IndexOrigin, SqliteExecutor};

async fn reader() -> CatalogReader<SqliteExecutor> {
    CatalogReader::new(SqliteExecutor::in_memory().await.unwrap())
}

async fn apply(reader: &CatalogReader<SqliteExecutor>, sql: &str) {
    reader.apply(sql).await.unwrap();
}

// =============================================================================
// Identifier escaping
// =============================================================================

#[tokio::test]
async fn test_escaped_identifiers_round_trip_through_engine() {
    let reader = reader().await;
    let names = ["plain", "a\"b", "with \"two\" quotes", "\"\"\"", "Mixed Case  "];

    for name in names {
        apply(
            &reader,
            &ddl::create_table(name, &["v INTEGER"], &CreateTableOptions::default()),
        )
        .await;
    }

    let snapshot = reader.schema().await;
    for name in names {
        let entry = snapshot.entry(name).expect("table entry present");
        assert_eq!(entry.name(), name);
        assert_eq!(entry.kind(), &EntryKind::Table);

        let table = reader.table(name).await.unwrap().expect("table found");
        assert_eq!(table.name(), name);
        assert_eq!(table.columns()[0].name(), "v");
    }
}

// =============================================================================
// Schema snapshot
// =============================================================================

#[tokio::test]
async fn test_table_names_are_the_table_entries() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT UNIQUE)").await;
    apply(&reader, "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER)").await;
    apply(&reader, "CREATE INDEX idx_posts_user ON posts (user_id)").await;
    apply(&reader, "CREATE VIEW v_users AS SELECT email FROM users").await;
    apply(
        &reader,
        "CREATE TRIGGER trg_users AFTER INSERT ON users BEGIN SELECT 1; END",
    )
    .await;

    let snapshot = reader.schema().await;
    let table_names = snapshot.table_names();
    assert_eq!(table_names, vec!["users", "posts"]);

    let expected: Vec<&str> = snapshot
        .entries()
        .iter()
        .filter(|e| e.kind() == &EntryKind::Table)
        .map(|e| e.name())
        .collect();
    assert_eq!(table_names, expected);
    for name in &table_names {
        assert!(snapshot.entry(name).is_some());
    }

    assert_eq!(snapshot.views().count(), 1);
    assert_eq!(snapshot.triggers().count(), 1);
    assert_eq!(
        snapshot.entry("trg_users").unwrap().table_name(),
        "users"
    );
}

#[tokio::test]
async fn test_snapshot_indexes_for_table() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT UNIQUE)").await;
    apply(&reader, "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER)").await;
    apply(&reader, "CREATE INDEX idx_posts_user ON posts (user_id)").await;

    let snapshot = reader.schema().await;
    let user_indexes: Vec<_> = snapshot.indexes_for_table("users").collect();
    assert_eq!(user_indexes.len(), 1);
    assert!(user_indexes[0].is_internal());
    assert_eq!(user_indexes[0].sql(), None);

    let post_indexes: Vec<_> = snapshot.indexes_for_table("posts").collect();
    assert_eq!(post_indexes.len(), 1);
    assert_eq!(post_indexes[0].name(), "idx_posts_user");
    assert!(post_indexes[0].sql().unwrap().starts_with("CREATE INDEX"));
    assert!(post_indexes[0].root_page().unwrap() > 0);
}

#[tokio::test]
async fn test_snapshot_is_point_in_time() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE a (x)").await;

    let before = reader.schema().await;
    apply(&reader, "CREATE TABLE b (y)").await;
    let after = reader.schema().await;

    assert_eq!(before.table_names(), vec!["a"]);
    assert_eq!(after.table_names(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_empty_database_has_empty_snapshot() {
    let reader = reader().await;
    assert!(reader.schema().await.is_empty());
}

// =============================================================================
// Table descriptors
// =============================================================================

#[tokio::test]
async fn test_missing_table_is_none() {
    let reader = reader().await;
    assert!(reader.table("does_not_exist").await.unwrap().is_none());
    assert!(!reader.table_exists("does_not_exist").await.unwrap());
}

#[tokio::test]
async fn test_table_lookup_keeps_requested_spelling() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE Users (id INTEGER PRIMARY KEY)").await;
    apply(&reader, "CREATE VIEW active_users AS SELECT id FROM Users").await;

    let table = reader.table("USERS").await.unwrap().expect("case-insensitive match");
    assert_eq!(table.name(), "USERS");
    assert_eq!(reader.schema().await.table_names(), vec!["Users"]);

    // Views resolve through the same pragmas; the snapshot tells them apart
    let view = reader.table("active_users").await.unwrap().expect("view columns");
    assert_eq!(view.columns()[0].name(), "id");
    assert_eq!(
        reader.schema().await.entry("active_users").unwrap().kind(),
        &EntryKind::View
    );
}

#[tokio::test]
async fn test_column_descriptors() {
    let reader = reader().await;
    apply(
        &reader,
        "CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT NOT NULL DEFAULT 'none', payload, qty REAL)",
    )
    .await;

    let table = reader.table("items").await.unwrap().unwrap();
    let names: Vec<_> = table.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["id", "label", "payload", "qty"]);

    let ordinals: Vec<_> = table.columns().iter().map(|c| c.ordinal()).collect();
    assert_eq!(ordinals, vec![0, 1, 2, 3]);

    let id = table.column("id").unwrap();
    assert_eq!(id.declared_type(), Some("INTEGER"));
    assert_eq!(id.primary_key_ordinal(), 1);

    let label = table.column("label").unwrap();
    assert!(label.is_not_null());
    assert_eq!(label.default_value(), Some("'none'"));
    assert_eq!(label.primary_key_ordinal(), 0);

    let untyped = table.column("payload").unwrap();
    assert_eq!(untyped.declared_type(), None);
    assert!(!untyped.is_not_null());
    assert_eq!(untyped.default_value(), None);

    // INTEGER PRIMARY KEY aliases the rowid and has no index
    assert!(table.indexes().is_empty());
}

#[tokio::test]
async fn test_composite_primary_key_ordinals_follow_key_order() {
    let reader = reader().await;
    apply(
        &reader,
        "CREATE TABLE pairs (note TEXT, b INTEGER, a INTEGER, PRIMARY KEY (a, b))",
    )
    .await;

    let table = reader.table("pairs").await.unwrap().unwrap();
    let a = table.column("a").unwrap();
    let b = table.column("b").unwrap();
    assert_eq!(a.primary_key_ordinal(), 1);
    assert_eq!(b.primary_key_ordinal(), 2);
    assert_eq!(a.ordinal(), 2);
    assert_eq!(b.ordinal(), 1);
    assert_eq!(table.column("note").unwrap().primary_key_ordinal(), 0);

    let pk: Vec<_> = table
        .primary_key_columns()
        .into_iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(pk, vec!["a", "b"]);

    let pk_index = table
        .indexes()
        .iter()
        .find(|i| i.origin() == &IndexOrigin::PrimaryKey)
        .expect("primary key index");
    assert!(pk_index.is_unique());
    assert_eq!(pk_index.column_names(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_create_index_text_and_read_back() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE T (a, b)").await;

    let sql = ddl::create_index(
        "idx1",
        "T",
        &["a", "b"],
        &CreateIndexOptions {
            unique: true,
            if_not_exists: true,
            where_clause: None,
        },
    );
    assert_eq!(sql, "CREATE UNIQUE INDEX IF NOT EXISTS \"idx1\" ON \"T\" (a, b)");
    apply(&reader, &sql).await;

    let table = reader.table("T").await.unwrap().unwrap();
    assert_eq!(table.indexes().len(), 1);
    let index = &table.indexes()[0];
    assert_eq!(index.name(), "idx1");
    assert!(index.is_unique());
    assert_eq!(index.origin(), &IndexOrigin::CreateIndex);
    assert!(!index.is_partial());

    let snapshot = reader.schema().await;
    let names: Vec<_> = snapshot.indexes_for_table("T").map(|e| e.name()).collect();
    assert_eq!(names, vec!["idx1"]);

    // IF NOT EXISTS makes a second run a no-op
    apply(&reader, &sql).await;
}

#[tokio::test]
async fn test_index_column_order_is_declaration_order() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE t (a, b, c)").await;
    apply(&reader, "CREATE INDEX ix_cab ON t (c, a DESC, b COLLATE NOCASE)").await;

    let table = reader.table("t").await.unwrap().unwrap();
    let index = table.index("ix_cab").unwrap();
    assert_eq!(index.column_names(), vec!["c", "a", "b"]);

    let cols = index.columns();
    let positions: Vec<_> = cols.iter().map(|c| c.index_position()).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);

    assert_eq!(cols[0].table_position(), Some(2));
    assert!(!cols[0].is_descending());
    assert!(cols[1].is_descending());
    assert_eq!(cols[2].collation(), "NOCASE");

    // Trailing rowid entry is auxiliary
    assert!(!cols[3].is_key());
    assert_eq!(cols[3].table_position(), None);
}

#[tokio::test]
async fn test_expression_and_partial_indexes() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE people (name TEXT, deleted INTEGER)").await;
    apply(
        &reader,
        &ddl::create_index(
            "ix_lower_name",
            "people",
            &["lower(name)"],
            &CreateIndexOptions {
                where_clause: Some("deleted = 0".to_string()),
                ..Default::default()
            },
        ),
    )
    .await;

    let table = reader.table("people").await.unwrap().unwrap();
    let index = table.index("ix_lower_name").unwrap();
    assert!(index.is_partial());
    assert!(!index.is_unique());

    let expr = &index.columns()[0];
    assert!(expr.is_key());
    assert_eq!(expr.name(), None);
    assert_eq!(expr.table_position(), None);
}

#[tokio::test]
async fn test_unique_constraint_origin() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE u (id INTEGER PRIMARY KEY, code TEXT UNIQUE)").await;

    let table = reader.table("u").await.unwrap().unwrap();
    assert_eq!(table.indexes().len(), 1);
    assert_eq!(table.indexes()[0].origin(), &IndexOrigin::UniqueConstraint);
    assert_eq!(table.indexes()[0].column_names(), vec!["code"]);
}

#[tokio::test]
async fn test_tables_skips_internal_and_non_tables() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE a (id INTEGER PRIMARY KEY AUTOINCREMENT)").await;
    apply(&reader, "CREATE TABLE b (x)").await;
    apply(&reader, "CREATE VIEW v AS SELECT * FROM b").await;

    let tables = reader.tables().await.unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["a", "b"]);

    // AUTOINCREMENT creates the engine-owned sqlite_sequence table
    assert!(reader.schema().await.entry("sqlite_sequence").is_some());
}

// =============================================================================
// DDL round trips
// =============================================================================

#[tokio::test]
async fn test_rename_table() {
    let reader = reader().await;
    apply(
        &reader,
        &ddl::create_table("Old Name", &["id INTEGER"], &CreateTableOptions::default()),
    )
    .await;

    apply(&reader, &ddl::rename_table("Old Name", "New")).await;

    assert!(reader.table("New").await.unwrap().is_some());
    assert!(reader.table("Old Name").await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_rename_and_drop_column() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE t (a INTEGER)").await;

    apply(&reader, &ddl::add_column("t", "b TEXT NOT NULL DEFAULT ''")).await;
    apply(&reader, &ddl::rename_column("t", "b", "c")).await;
    let table = reader.table("t").await.unwrap().unwrap();
    let names: Vec<_> = table.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert!(table.column("c").unwrap().is_not_null());

    apply(&reader, &ddl::drop_column("t", "c")).await;
    let table = reader.table("t").await.unwrap().unwrap();
    assert_eq!(table.columns().len(), 1);
}

#[tokio::test]
async fn test_drop_table_and_index() {
    let reader = reader().await;
    apply(&reader, "CREATE TABLE t (a)").await;
    apply(&reader, "CREATE INDEX ix ON t (a)").await;

    apply(&reader, &ddl::drop_index("ix", &DropOptions::default())).await;
    assert!(reader.table("t").await.unwrap().unwrap().indexes().is_empty());

    let missing_index = ddl::drop_index("ix", &DropOptions::default());
    assert!(reader.apply(&missing_index).await.is_err());
    apply(&reader, &ddl::drop_index("ix", &DropOptions { if_exists: true })).await;

    apply(&reader, &ddl::drop_table("t", &DropOptions::default())).await;
    assert!(reader.table("t").await.unwrap().is_none());
    apply(&reader, &ddl::drop_table("t", &DropOptions { if_exists: true })).await;
}

#[tokio::test]
async fn test_create_table_if_not_exists() {
    let reader = reader().await;
    let create = ddl::create_table("t", &["a"], &CreateTableOptions::default());
    apply(&reader, &create).await;
    assert!(reader.apply(&create).await.is_err());

    let guarded = ddl::create_table(
        "t",
        &["a"],
        &CreateTableOptions {
            if_not_exists: true,
        },
    );
    apply(&reader, &guarded).await;
}

#[tokio::test]
async fn test_malformed_definition_surfaces_error() {
    let reader = reader().await;
    let sql = ddl::create_table("t", &["a INTEGER,,"], &CreateTableOptions::default());
    assert!(reader.apply(&sql).await.is_err());
}

// =============================================================================
// User version
// =============================================================================

#[tokio::test]
async fn test_user_version_round_trip() {
    let reader = reader().await;
    assert_eq!(reader.user_version().await.unwrap(), 0);

    reader.set_user_version(42).await.unwrap();
    assert_eq!(reader.user_version().await.unwrap(), 42);

    reader.set_user_version(-3).await.unwrap();
    assert_eq!(reader.user_version().await.unwrap(), -3);

    reader.set_user_version(i32::MAX).await.unwrap();
    assert_eq!(reader.user_version().await.unwrap(), i32::MAX);

    reader.set_user_version(i32::MIN).await.unwrap();
    assert_eq!(reader.user_version().await.unwrap(), i32::MIN);
}

#[tokio::test]
async fn test_file_database_persists_schema_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let mut config = sqlite_catalog::DatabaseConfig::for_path(path.to_string_lossy());
    config.create_if_missing = true;

    {
        let executor = SqliteExecutor::connect(&config).await.unwrap();
        let reader = CatalogReader::new(executor.clone());
        apply(&reader, "CREATE TABLE kept (id INTEGER PRIMARY KEY)").await;
        reader.set_user_version(3).await.unwrap();
        executor.close().await;
    }

    let reader = CatalogReader::new(SqliteExecutor::connect(&config).await.unwrap());
    assert!(reader.table_exists("kept").await.unwrap());
    assert_eq!(reader.user_version().await.unwrap(), 3);
}
