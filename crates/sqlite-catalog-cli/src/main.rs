//! sqlite-catalog CLI - Inspect SQLite schemas and generate DDL.

use clap::{Args, Parser, Subcommand};
use sqlite_catalog::ddl::{self, CreateIndexOptions, CreateTableOptions, DropOptions};
use sqlite_catalog::error::EXIT_NOT_FOUND;
use sqlite_catalog::{CatalogError, CatalogReader, Config, SqliteExecutor, TableDescriptor};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "sqlite-catalog")]
#[command(about = "Inspect SQLite schemas and generate DDL")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database file path (overrides the configuration file)
    #[arg(short, long)]
    database: Option<String>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of the schema catalog
    Schema {
        /// Include engine-owned sqlite_ objects
        #[arg(long)]
        include_internal: bool,
    },

    /// Describe a table's columns and indexes
    Table {
        /// Table name, unquoted
        name: String,
    },

    /// Read or write the database user version
    UserVersion {
        /// Store this version instead of reading it (32-bit signed)
        #[arg(long, allow_negative_numbers = true)]
        set: Option<i32>,
    },

    /// Generate a DDL statement
    Ddl(DdlArgs),
}

#[derive(Args)]
struct DdlArgs {
    /// Run the statement against the database after printing it
    #[arg(long, global = true)]
    execute: bool,

    #[command(subcommand)]
    statement: DdlCommand,
}

#[derive(Subcommand)]
enum DdlCommand {
    /// CREATE TABLE
    CreateTable {
        name: String,
        /// Column and constraint definitions, one per argument
        #[arg(required = true)]
        definitions: Vec<String>,
        #[arg(long)]
        if_not_exists: bool,
    },

    /// DROP TABLE
    DropTable {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },

    /// ALTER TABLE ... RENAME TO
    RenameTable { old_name: String, new_name: String },

    /// ALTER TABLE ... ADD COLUMN
    AddColumn {
        table: String,
        /// Column definition, e.g. "age INTEGER DEFAULT 0"
        definition: String,
    },

    /// ALTER TABLE ... RENAME COLUMN
    RenameColumn {
        table: String,
        old_name: String,
        new_name: String,
    },

    /// ALTER TABLE ... DROP COLUMN
    DropColumn { table: String, column: String },

    /// CREATE INDEX
    CreateIndex {
        name: String,
        table: String,
        /// Indexed columns or expressions, one per argument
        #[arg(required = true)]
        columns: Vec<String>,
        #[arg(long)]
        unique: bool,
        #[arg(long)]
        if_not_exists: bool,
        /// Partial index predicate
        #[arg(long = "where")]
        where_clause: Option<String>,
    },

    /// DROP INDEX
    DropIndex {
        name: String,
        #[arg(long)]
        if_exists: bool,
    },
}

impl DdlCommand {
    fn to_sql(&self) -> String {
        match self {
            DdlCommand::CreateTable {
                name,
                definitions,
                if_not_exists,
            } => ddl::create_table(
                name,
                definitions,
                &CreateTableOptions {
                    if_not_exists: *if_not_exists,
                },
            ),
            DdlCommand::DropTable { name, if_exists } => ddl::drop_table(
                name,
                &DropOptions {
                    if_exists: *if_exists,
                },
            ),
            DdlCommand::RenameTable { old_name, new_name } => {
                ddl::rename_table(old_name, new_name)
            }
            DdlCommand::AddColumn { table, definition } => ddl::add_column(table, definition),
            DdlCommand::RenameColumn {
                table,
                old_name,
                new_name,
            } => ddl::rename_column(table, old_name, new_name),
            DdlCommand::DropColumn { table, column } => ddl::drop_column(table, column),
            DdlCommand::CreateIndex {
                name,
                table,
                columns,
                unique,
                if_not_exists,
                where_clause,
            } => ddl::create_index(
                name,
                table,
                columns,
                &CreateIndexOptions {
                    unique: *unique,
                    if_not_exists: *if_not_exists,
                    where_clause: where_clause.clone(),
                },
            ),
            DdlCommand::DropIndex { name, if_exists } => ddl::drop_index(
                name,
                &DropOptions {
                    if_exists: *if_exists,
                },
            ),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CatalogError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(CatalogError::Config)?;

    // Printing DDL needs no database
    if let Commands::Ddl(ref args) = cli.command {
        let sql = args.statement.to_sql();
        if cli.output_json {
            println!("{}", serde_json::json!({ "sql": sql }));
        } else {
            println!("{}", sql);
        }
        if !args.execute {
            return Ok(ExitCode::SUCCESS);
        }

        let reader = open_reader(&cli).await?;
        reader.apply(&sql).await?;
        info!("Statement executed");
        reader.executor().close().await;
        return Ok(ExitCode::SUCCESS);
    }

    let reader = open_reader(&cli).await?;
    let code = match cli.command {
        Commands::Ddl(_) => ExitCode::SUCCESS,

        Commands::Schema { include_internal } => {
            let snapshot = reader.schema().await;
            let entries: Vec<_> = snapshot
                .entries()
                .iter()
                .filter(|e| include_internal || !e.is_internal())
                .collect();

            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    if entry.name() == entry.table_name() {
                        println!("{:<8} {}", entry.kind().as_str(), entry.name());
                    } else {
                        println!(
                            "{:<8} {} (on {})",
                            entry.kind().as_str(),
                            entry.name(),
                            entry.table_name()
                        );
                    }
                }
            }
            ExitCode::SUCCESS
        }

        Commands::Table { name } => match reader.table(&name).await? {
            Some(table) => {
                if cli.output_json {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                } else {
                    print_table(&table);
                }
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Table not found: {}", name);
                ExitCode::from(EXIT_NOT_FOUND)
            }
        },

        Commands::UserVersion { set } => {
            if let Some(version) = set {
                reader.set_user_version(version).await?;
                info!("User version set to {}", version);
            }
            let version = reader.user_version().await?;

            if cli.output_json {
                println!("{}", serde_json::json!({ "user_version": version }));
            } else {
                println!("{}", version);
            }
            ExitCode::SUCCESS
        }
    };

    reader.executor().close().await;
    Ok(code)
}

/// Resolve configuration from `--config` and `--database` and connect.
async fn open_reader(cli: &Cli) -> Result<CatalogReader<SqliteExecutor>, CatalogError> {
    let config = match (&cli.config, &cli.database) {
        (Some(path), database) => {
            let mut config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            if let Some(database) = database {
                config.database.path = database.clone();
                config.validate()?;
            }
            config
        }
        (None, Some(database)) => {
            let config = Config::for_path(database.clone());
            config.validate()?;
            config
        }
        (None, None) => {
            return Err(CatalogError::Config(
                "either --config or --database is required".to_string(),
            ))
        }
    };

    debug!("Opening database {}", config.database.path);
    let executor = SqliteExecutor::connect(&config.database).await?;
    Ok(CatalogReader::new(executor))
}

fn print_table(table: &TableDescriptor) {
    println!("Table: {}", table.name());

    println!("Columns:");
    for column in table.columns() {
        let mut line = format!("  {:>3} {}", column.ordinal(), column.name());
        if let Some(declared) = column.declared_type() {
            line.push(' ');
            line.push_str(declared);
        }
        if column.is_not_null() {
            line.push_str(" NOT NULL");
        }
        if let Some(default) = column.default_value() {
            line.push_str(&format!(" DEFAULT {}", default));
        }
        if column.is_primary_key() {
            line.push_str(&format!(" [pk {}]", column.primary_key_ordinal()));
        }
        println!("{}", line);
    }

    if table.indexes().is_empty() {
        return;
    }
    println!("Indexes:");
    for index in table.indexes() {
        let mut flags = vec![index.origin().code().to_string()];
        if index.is_unique() {
            flags.push("unique".to_string());
        }
        if index.is_partial() {
            flags.push("partial".to_string());
        }
        let columns: Vec<&str> = index
            .key_columns()
            .map(|c| c.name().unwrap_or("<expr>"))
            .collect();
        println!(
            "  {} ({}) [{}]",
            index.name(),
            columns.join(", "),
            flags.join(", ")
        );
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity: {}", other)),
    };

    // stdout carries command output
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format: {}", other)),
    }

    Ok(())
}
