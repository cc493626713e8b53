//! dbmeta CLI - table column and index introspection.

use clap::{Parser, Subcommand};
use dbmeta::{Config, Introspector, MetaError, TableInfo};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "dbmeta")]
#[command(about = "Inspect table columns and indexes for code generation")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "dbmeta.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the columns (and index membership) of a table
    Inspect {
        /// Table name
        #[arg(short, long)]
        table: String,

        /// Schema name [default: from config]
        #[arg(short, long)]
        schema: Option<String>,

        /// Skip index metadata
        #[arg(long)]
        no_indexes: bool,

        /// Output JSON instead of a text table
        #[arg(long)]
        output_json: bool,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), MetaError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Inspect {
            table,
            schema,
            no_indexes,
            output_json,
        } => {
            let schema = match schema {
                Some(schema) => schema,
                None => config.database.default_schema()?,
            };
            let include_indexes = config.introspect.include_indexes && !no_indexes;

            let session = dbmeta::connect(&config.database).await?;
            let info = Introspector::new(&*session)
                .with_indexes(include_indexes)
                .table(&schema, &table)
                .await?;

            if output_json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_table(&info);
            }
        }

        Commands::HealthCheck => {
            dbmeta::connect(&config.database).await?;
            let port = config.database.port()?;
            println!(
                "Connection OK ({} at {}:{}/{})",
                config.database.r#type,
                config.database.host,
                port,
                config.database.database
            );
        }
    }

    Ok(())
}

fn print_table(info: &TableInfo) {
    println!("{} ({} columns)", info.full_name(), info.columns.len());
    for col in &info.columns {
        let mut line = format!(
            "  {:<24} {:<20} {}",
            col.name,
            col.column_type,
            if col.is_nullable { "NULL" } else { "NOT NULL" }
        );
        if !col.column_key.is_empty() {
            line.push_str(&format!(" key={}", col.column_key));
        }
        if let Some(default) = &col.default_value {
            line.push_str(&format!(" default={}", default));
        }
        if !col.extra.is_empty() {
            line.push_str(&format!(" {}", col.extra));
        }
        if !col.comment.is_empty() {
            line.push_str(&format!(" -- {}", col.comment));
        }
        println!("{}", line);

        for idx in &col.indexes {
            println!(
                "      index {} (seq {}{})",
                idx.index_name,
                idx.seq_in_index,
                if idx.is_unique() { ", unique" } else { "" }
            );
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
