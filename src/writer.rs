// Output documents: one pretty-printed JSON file per table plus a summary
// manifest describing every table written.

use crate::extractor::{Extraction, TableData};
use crate::logger;
use crate::parser::Record;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "extraction_summary.json";

type WriteResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Serialize)]
struct TableDocument<'a> {
    table_name: &'a str,
    columns: &'a [String],
    row_count: usize,
    extracted_at: &'a str,
    data: &'a [Record],
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    extraction_info: ExtractionInfo<'a>,
    tables: IndexMap<&'a str, SummaryEntry<'a>>,
}

#[derive(Serialize)]
struct ExtractionInfo<'a> {
    source_file: &'a str,
    extracted_at: &'a str,
    total_tables: usize,
    total_rows: usize,
}

#[derive(Serialize)]
struct SummaryEntry<'a> {
    columns: &'a [String],
    row_count: usize,
    file: String,
}

pub fn table_file_name(table: &str) -> String {
    format!("{}.json", table)
}

pub fn create_output_directory(dir: &Path) -> WriteResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        logger::info(&format!("Created output directory: {}", dir.display()));
    }
    Ok(())
}

// Write `<table>.json` into `dir`.
pub fn write_table(dir: &Path, table: &TableData, extracted_at: &str) -> WriteResult<PathBuf> {
    let path = dir.join(table_file_name(&table.name));
    let doc = TableDocument {
        table_name: &table.name,
        columns: &table.columns,
        row_count: table.row_count(),
        extracted_at,
        data: &table.rows,
    };
    write_json(&path, &doc)?;
    logger::info(&format!(
        "  Saved {} ({} rows)",
        table_file_name(&table.name),
        table.row_count()
    ));
    Ok(path)
}

pub fn write_summary(
    dir: &Path,
    source_file: &str,
    extraction: &Extraction,
    extracted_at: &str,
) -> WriteResult<PathBuf> {
    let path = dir.join(SUMMARY_FILE);
    let tables = extraction
        .tables
        .values()
        .map(|t| {
            let entry = SummaryEntry {
                columns: &t.columns,
                row_count: t.row_count(),
                file: table_file_name(&t.name),
            };
            (t.name.as_str(), entry)
        })
        .collect();
    let doc = SummaryDocument {
        extraction_info: ExtractionInfo {
            source_file,
            extracted_at,
            total_tables: extraction.tables.len(),
            total_rows: extraction.total_rows(),
        },
        tables,
    };
    write_json(&path, &doc)?;
    logger::info(&format!("Generated summary: {}", path.display()));
    Ok(path)
}

// Write every table document and the summary; returns the paths written.
pub fn write_extraction(
    dir: &Path,
    source_file: &str,
    extraction: &Extraction,
    extracted_at: &str,
) -> WriteResult<Vec<PathBuf>> {
    create_output_directory(dir)?;
    logger::info(&format!("Saving tables to JSON files in: {}", dir.display()));
    let mut written = Vec::with_capacity(extraction.tables.len() + 1);
    for table in extraction.tables.values() {
        written.push(write_table(dir, table, extracted_at)?);
    }
    written.push(write_summary(dir, source_file, extraction, extracted_at)?);
    Ok(written)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> WriteResult<()> {
    let file = File::create(path).map_err(|e| format!("create {}: {}", path.display(), e))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}
