//! schemagen CLI - inspect a schema and derive relationships and rules
//!
//! Usage:
//!   schemagen [--connection <name> | --url <url>] [--database <db>] <command>
//!   schemagen --snapshot <file.json> <command>
//!
//! Examples:
//!   schemagen tables
//!   schemagen relations users --declarations
//!   schemagen rules posts --mode both --json
//!   schemagen snapshot --output shop.json

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schemagen::config::{database_from_url, ConnectionConfig, Settings, SettingsError};
use schemagen::metadata::{
    InformationSchema, MetadataSource, MySqlCatalog, SchemaSnapshot, SnapshotSource,
};
use schemagen::relations::{RelationOptions, RelationshipResolver};
use schemagen::validation::{RuleDeriver, RuleMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(about = "Inspect a database schema and derive relationships and validation rules")]
#[command(version)]
struct Cli {
    /// Named connection from the config file
    #[arg(short, long, global = true)]
    connection: Option<String>,

    /// Connection URL (overrides --connection)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Database to inspect (defaults to the one in the URL)
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Read metadata from a snapshot file instead of a live database
    #[arg(long, global = true, conflicts_with_all = ["connection", "url"])]
    snapshot: Option<PathBuf>,

    /// Log catalog queries
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List base tables
    Tables,

    /// Show columns, keys and indexes of a table
    Describe {
        /// Table name
        table: String,
    },

    /// Show relationships of a table
    Relations {
        /// Table name
        table: String,

        /// Print annotated field declarations
        #[arg(long)]
        declarations: bool,

        /// Print JSON
        #[arg(long, conflicts_with = "declarations")]
        json: bool,
    },

    /// Show validation rules of a table
    Rules {
        /// Table name
        table: String,

        /// Which form to generate rules for
        #[arg(short, long, default_value = "create")]
        mode: ModeArg,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the catalog of the database to a JSON snapshot
    Snapshot {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Create,
    Update,
    Both,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "schemagen=debug" } else { "schemagen=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = Settings::load()?;
    let options = settings.relations.to_options();
    let source = open_source(&cli, &settings)?;

    match cli.command {
        Commands::Tables => cmd_tables(&source),
        Commands::Describe { table } => cmd_describe(&source, &table),
        Commands::Relations {
            table,
            declarations,
            json,
        } => cmd_relations(&source, options, &table, declarations, json),
        Commands::Rules { table, mode, json } => cmd_rules(&source, &table, mode, json),
        Commands::Snapshot { output } => cmd_snapshot(&source, output),
    }
}

/// Pick the metadata source: snapshot file, explicit URL, named or default
/// connection, then `SCHEMAGEN_DB_*` environment variables.
fn open_source(cli: &Cli, settings: &Settings) -> Result<Box<dyn MetadataSource>, Box<dyn Error>> {
    if let Some(path) = &cli.snapshot {
        let snapshot = SchemaSnapshot::load(path)?;
        return Ok(Box::new(SnapshotSource::new(snapshot)));
    }

    let requested = cli.database.as_deref();

    let (url, database) = if let Some(url) = &cli.url {
        let database = requested
            .map(str::to_string)
            .or_else(|| database_from_url(url))
            .ok_or_else(|| SettingsError::MissingDatabase("--url".to_string()))?;
        (url.clone(), database)
    } else if let Some(name) = &cli.connection {
        let conn = settings.get_connection(name)?;
        (conn.resolved_url()?, conn.select_database(name, requested)?)
    } else if let Some((name, conn)) = settings.default_connection() {
        (conn.resolved_url()?, conn.select_database(name, requested)?)
    } else {
        let config = ConnectionConfig::from_env()?;
        let database = requested.map_or_else(|| config.database.clone(), str::to_string);
        (config.to_url()?, database)
    };

    let catalog = MySqlCatalog::connect(&url, &settings.pool)?;
    Ok(Box::new(InformationSchema::new(catalog, database)))
}

fn cmd_tables(source: &dyn MetadataSource) -> Result<(), Box<dyn Error>> {
    for table in source.tables()? {
        println!("{}", table);
    }
    Ok(())
}

fn cmd_describe(source: &dyn MetadataSource, table: &str) -> Result<(), Box<dyn Error>> {
    let meta = source.describe_table(table)?;

    println!("Table: {}", meta.name);
    println!();
    println!("Columns:");
    for column in &meta.columns {
        let mut flags = Vec::new();
        if column.is_nullable() {
            flags.push("nullable".to_string());
        }
        if !column.key.as_str().is_empty() {
            flags.push(column.key.as_str().to_lowercase());
        }
        if column.is_auto_increment() {
            flags.push("auto_increment".to_string());
        }
        println!(
            "  - {} {} ({}){}",
            column.name,
            column.column_type,
            column.value_type(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        );
    }

    if !meta.primary_key.is_empty() {
        println!();
        println!("Primary key: {}", meta.primary_key.join(", "));
    }

    if !meta.foreign_keys.is_empty() {
        println!();
        println!("Foreign keys:");
        for fk in &meta.foreign_keys {
            println!(
                "  - {} -> {}.{} (on update {}, on delete {})",
                fk.column, fk.referenced_table, fk.referenced_column, fk.on_update, fk.on_delete
            );
        }
    }

    if !meta.indexes.is_empty() {
        println!();
        println!("Indexes:");
        for index in &meta.indexes {
            println!(
                "  - {} ({}){}",
                index.name,
                index.columns.join(", "),
                if index.unique { " unique" } else { "" }
            );
        }
    }

    Ok(())
}

fn cmd_relations(
    source: &dyn MetadataSource,
    options: RelationOptions,
    table: &str,
    declarations: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let resolver = RelationshipResolver::with_options(source, options);
    let relations = resolver.resolve(table)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&relations)?);
    } else if declarations {
        println!("{}", relations.declarations());
    } else if relations.is_empty() {
        println!("No relationships found for {}.", table);
    } else {
        for relation in relations.iter() {
            println!("{}", relation);
        }
    }

    Ok(())
}

fn cmd_rules(
    source: &dyn MetadataSource,
    table: &str,
    mode: ModeArg,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let deriver = RuleDeriver::new(source);

    match mode {
        ModeArg::Both => {
            let sets = deriver.generate_rule_sets(table)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sets)?);
            } else {
                println!("Create:");
                print_rules(&sets.create);
                println!();
                println!("Update:");
                print_rules(&sets.update);
            }
        }
        ModeArg::Create | ModeArg::Update => {
            let mode = match mode {
                ModeArg::Update => RuleMode::Update,
                _ => RuleMode::Create,
            };
            let rules = deriver.generate_rules(table, mode)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rules)?);
            } else {
                print_rules(&rules);
            }
        }
    }

    Ok(())
}

fn print_rules(rules: &schemagen::validation::ColumnRules) {
    for (column, set) in rules {
        println!("  {}: {}", column, set);
    }
}

fn cmd_snapshot(source: &dyn MetadataSource, output: PathBuf) -> Result<(), Box<dyn Error>> {
    let snapshot = SchemaSnapshot::capture(&source)?;
    snapshot.save(&output)?;
    println!(
        "Wrote {} tables of {} to {}",
        snapshot.tables.len(),
        snapshot.database,
        output.display()
    );
    Ok(())
}
