// sqldump2json: read a SQL dump, parse each table's INSERT statements and
// write one JSON document per table plus extraction_summary.json.

use clap::{CommandFactory, Parser};
use sqldump2json::extractor::{self, ExtractOptions};
use sqldump2json::parser::statement::ExtractMode;
use sqldump2json::{logger, progress, writer};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

// Command-line flags and positional arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the SQL dump.
    sql_file: String,

    /// Output directory for JSON files.
    #[arg(short, long, default_value = "extracted_data")]
    output: PathBuf,

    /// Enable debug logging (disables the progress bar).
    #[arg(long)]
    debug: bool,

    /// Only print warnings and errors.
    #[arg(long, short)]
    quiet: bool,

    /// Worker threads for table parsing (0 = num CPU).
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Find the end of each INSERT by tracking quotes instead of the first ");".
    #[arg(long)]
    scan_statements: bool,

    /// Fail when the dump contains no table headers.
    #[arg(long)]
    require_tables: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if std::env::args().len() == 1 {
        Args::command().print_help()?;
        eprintln!();
        std::process::exit(1);
    }
    let args = Args::parse();
    logger::configure(args.debug, args.quiet);

    let wall_start = Instant::now();
    logger::info(&format!("Reading SQL file: {}", args.sql_file));
    let content = match read_dump(&args.sql_file) {
        Ok(content) => content,
        Err(e) => {
            logger::error(&e);
            std::process::exit(1);
        }
    };
    logger::debug(&format!("main: read {} bytes", content.len()));

    let options = ExtractOptions {
        mode: if args.scan_statements {
            ExtractMode::Scan
        } else {
            ExtractMode::Pattern
        },
        workers: args.workers,
    };
    let progress = progress::ProgressManager::new(!args.debug && !args.quiet);
    let bar = progress.new_table_bar();
    let extraction = extractor::extract_dump(&content, &options, bar.as_ref())?;

    if extraction.has_no_headers() {
        if args.require_tables {
            logger::error(&format!("No table headers found in {}", args.sql_file));
            std::process::exit(1);
        }
        logger::warn(&format!("No table headers found in {}", args.sql_file));
    }

    // One timestamp for every document of this run.
    let extracted_at = logger::timestamp();
    writer::write_extraction(&args.output, &args.sql_file, &extraction, &extracted_at)?;
    logger::debug(&format!("Timing: total wall time {:?}", wall_start.elapsed()));

    let sep = "=".repeat(60);
    let mut stderr = io::stderr();
    writeln!(stderr, "\n{}\nSUMMARY\n{}", sep, sep)?;
    writeln!(stderr, "Tables:   {}", extraction.tables.len())?;
    writeln!(stderr, "Rows:     {}", extraction.total_rows())?;
    writeln!(stderr, "Skipped:  {}", extraction.skipped_rows())?;
    writeln!(stderr, "{}", sep)?;
    Ok(())
}

// The whole dump is read and decoded before any parsing starts.
fn read_dump(path: &str) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("Error: SQL file '{}' not found", path),
        _ => format!("Error: cannot read SQL file '{}': {}", path, e),
    })?;
    String::from_utf8(bytes).map_err(|e| format!("Error: SQL file '{}' is not valid UTF-8: {}", path, e))
}
