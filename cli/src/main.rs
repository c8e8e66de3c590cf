use std::path::PathBuf;

use citydb_core::city_tables;
use citydb_sqlite::{DatabaseHandle, create_database, generate_schema_sql};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for the `schema` command.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SchemaFormat {
    Sql,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "citydb")]
#[command(about = "Create and inspect city databases")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new database with the countries, cities and cities_labels tables.
    Init(InitArgs),
    /// Show table presence and row counts of an existing database.
    Status(StatusArgs),
    /// Print the table layout without touching the filesystem.
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Database file path. Must not exist yet.
    #[arg(long)]
    db: PathBuf,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Output format.
    #[arg(long, default_value = "sql")]
    format: SchemaFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Init(args) => run_init(args),
        Command::Status(args) => run_status(args),
        Command::Schema(args) => run_schema(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_init(args: InitArgs) -> Result<(), String> {
    let handle = create_database(&args.db)
        .map_err(|e| format!("Failed to create database '{}': {e}", args.db.display()))?;
    let tables = handle
        .table_names()
        .map_err(|e| format!("Failed to list tables: {e}"))?;
    handle
        .close()
        .map_err(|e| format!("Failed to close database: {e}"))?;
    println!(
        "Created '{}' with tables: {}.",
        args.db.display(),
        tables.join(", ")
    );
    Ok(())
}

fn run_status(args: StatusArgs) -> Result<(), String> {
    let handle = DatabaseHandle::open(&args.db)
        .map_err(|e| format!("Failed to open database '{}': {e}", args.db.display()))?;
    let status = handle
        .status()
        .map_err(|e| format!("Failed to get database status: {e}"))?;
    debug!(?status, "read database status");
    println!("Database Status:");
    println!(
        "  Tables exist: {}",
        if status.tables_exist { "yes" } else { "no" }
    );
    println!("  Country count: {}", status.country_count);
    println!("  City count: {}", status.city_count);
    println!("  Label count: {}", status.label_count);
    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), String> {
    let tables = city_tables();
    let output = match args.format {
        SchemaFormat::Sql => {
            generate_schema_sql(&tables).map_err(|e| format!("Failed to render schema: {e}"))?
        }
        SchemaFormat::Json => serde_json::to_string_pretty(&tables)
            .map_err(|e| format!("Failed to serialize schema: {e}"))?,
    };
    println!("{output}");
    Ok(())
}
