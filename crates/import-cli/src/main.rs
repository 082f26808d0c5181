//! Contact Import CLI
//!
//! Command-line tool for previewing semicolon-delimited CSV files, mapping
//! their columns to contact fields, and importing the records.

use clap::{Parser, Subcommand};
use import_core::{
    BatchStore, Error, ImportSession, JsonFileRepository, MappingCatalog, MemoryRepository,
    Notifier, Severity,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "import-cli")]
#[command(about = "CSV contact importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and preview a CSV file
    Parse {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the available column mappings
    Mappings,

    /// Import a CSV file with a column mapping assignment
    Import {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Mapping per column, comma-separated (e.g. "First,Last,Ignore,ZIP,Country")
        #[arg(short, long)]
        map: String,

        /// Output JSON file the batch is appended to
        #[arg(short, long, default_value = "contacts.json")]
        output: PathBuf,

        /// Validate and transform without persisting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show previously saved batches
    Show {
        /// Path to the JSON batch file
        #[arg(short, long, default_value = "contacts.json")]
        file: PathBuf,
    },
}

/// Notifier printing to the console; errors go to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => eprintln!("{}", message),
            _ => println!("{}", message),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> import_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Mappings => cmd_mappings(),
        Commands::Import {
            file,
            map,
            output,
            dry_run,
        } => cmd_import(&file, &map, &output, dry_run),
        Commands::Show { file } => cmd_show(&file),
    }
}

fn cmd_parse(file: &PathBuf) -> import_core::Result<()> {
    let doc = import_core::parse_file(file)?;

    println!("File: {}", file.display());
    println!("Columns: {}", doc.column_count());
    println!("Rows: {}", doc.row_count());
    println!();

    println!("{}", doc.headers.join("\t"));
    println!("{}", "-".repeat(doc.headers.len() * 12));

    // Print first 10 rows
    for row in doc.rows.iter().take(10) {
        println!("{}", row.join("\t"));
    }

    if doc.row_count() > 10 {
        println!("... ({} more rows)", doc.row_count() - 10);
    }

    Ok(())
}

fn cmd_mappings() -> import_core::Result<()> {
    let catalog = MappingCatalog::default();

    println!("Available column mappings:");
    for mapping in catalog.all() {
        println!("  {}", mapping.name());
    }
    println!("  {} (may be assigned to any number of columns)", catalog.ignore());

    Ok(())
}

fn cmd_import(file: &PathBuf, map: &str, output: &PathBuf, dry_run: bool) -> import_core::Result<()> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    ImportSession::accept_filename(file_name)?;

    let data = std::fs::read(file).map_err(|e| Error::FileRead {
        path: file.clone(),
        source: e,
    })?;

    let mut session = ImportSession::new(MappingCatalog::default());
    session.load_bytes(&data)?;

    let names: Vec<&str> = map.split(',').map(str::trim).collect();
    import_core::validator::check_assignment_width(
        names.len(),
        session.controller().selector_count(),
    )?;

    // Duplicate non-Ignore names would silently displace each other in the
    // selector model; reject them up front at the CLI boundary.
    for (i, name) in names.iter().enumerate() {
        if *name != import_core::IGNORE && names[..i].contains(name) {
            return Err(Error::InvalidStructure {
                detail: format!("mapping '{}' assigned to more than one column", name),
            });
        }
    }

    for (column, name) in names.iter().enumerate() {
        session.set_mapping(column, name)?;
    }

    let mut notifier = ConsoleNotifier;
    let summary = if dry_run {
        let mut repo = MemoryRepository::new();
        session.save(&mut repo, &mut notifier)?
    } else {
        let mut repo = JsonFileRepository::new(output.clone());
        session.save(&mut repo, &mut notifier)?
    };

    println!(
        "Imported {} record(s), dropped {} unpopulated row(s){}",
        summary.records_saved,
        summary.rows_dropped,
        if dry_run { " (dry run)" } else { "" }
    );
    if !dry_run {
        println!("Batch appended to {}", output.display());
    }

    Ok(())
}

fn cmd_show(file: &PathBuf) -> import_core::Result<()> {
    let store = BatchStore::load(file)?;

    if store.batches.is_empty() {
        println!("No saved batches in {}", file.display());
        return Ok(());
    }

    println!(
        "{} batch(es), {} record(s) total:",
        store.batches.len(),
        store.record_count()
    );
    println!();

    for (i, batch) in store.batches.iter().enumerate() {
        println!(
            "Batch {} ({}, {} record(s)):",
            i + 1,
            batch.saved_at.format("%Y-%m-%d %H:%M:%S UTC"),
            batch.records.len()
        );
        for person in &batch.records {
            let name = [person.first_name.as_deref(), person.last_name.as_deref()]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            let address = [
                person.address.street.as_deref(),
                person.address.postcode.as_deref(),
                person.address.country.as_deref(),
            ]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

            match (name.is_empty(), address.is_empty()) {
                (false, false) => println!("  {} - {}", name, address),
                (false, true) => println!("  {}", name),
                (true, false) => println!("  (no name) - {}", address),
                (true, true) => println!("  (empty record)"),
            }
        }
        println!();
    }

    Ok(())
}
