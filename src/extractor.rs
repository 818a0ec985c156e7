// Extraction pipeline: split the dump into table blocks, parse each block's
// INSERTs into typed records, and merge the results in header order.
// Blocks are independent, so they are parsed on a rayon pool.

use crate::logger;
use crate::parser::blocks::{BlockSplitter, TableBlock};
use crate::parser::coerce::coerce_literal;
use crate::parser::statement::{column_names, ExtractMode, StatementExtractor};
use crate::parser::tokenizer::Literals;
use crate::parser::{Record, RowDefect, TypedValue};
use indexmap::IndexMap;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    // Worker threads for table parsing (0 = num CPU).
    pub workers: usize,
}

// Parsed contents of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub name: String,
    pub row_count_hint: Option<u64>,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub defects: Vec<RowDefect>,
}

impl TableData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    Parsed(TableData),
    // A header with no INSERT statements for its table.
    Empty { name: String },
}

// Result of a whole dump. Table order follows the first header of each name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub tables: IndexMap<String, TableData>,
    // Tables whose every block had no INSERT statements.
    pub empty_tables: Vec<String>,
    // Table headers seen in the dump, parsed or not.
    pub headers_found: usize,
}

impl Extraction {
    pub fn total_rows(&self) -> usize {
        self.tables.values().map(TableData::row_count).sum()
    }

    pub fn skipped_rows(&self) -> usize {
        self.tables.values().map(|t| t.defects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    // No table headers at all, as opposed to headers without INSERTs.
    pub fn has_no_headers(&self) -> bool {
        self.headers_found == 0
    }
}

// Tokenize and type one VALUES clause.
pub fn parse_values(values: &str) -> Vec<TypedValue> {
    Literals::new(values).map(coerce_literal).collect()
}

// Parse every INSERT of a single table block. Columns come from the first
// statement; rows whose value count differs are recorded as defects.
pub fn extract_table(block: &TableBlock<'_>, mode: ExtractMode) -> TableOutcome {
    let extractor = StatementExtractor::new(block.name, mode);
    let mut statements = extractor.statements(block.text).peekable();

    let columns = match statements.peek() {
        Some(first) => column_names(first.columns),
        None => {
            return TableOutcome::Empty {
                name: block.name.to_string(),
            }
        }
    };

    let mut rows = Vec::new();
    let mut defects = Vec::new();
    for (idx, stmt) in statements.enumerate() {
        let values = parse_values(stmt.values);
        if values.len() != columns.len() {
            defects.push(RowDefect {
                table: block.name.to_string(),
                row: idx + 1,
                actual: values.len(),
                expected: columns.len(),
            });
            continue;
        }
        rows.push(columns.iter().cloned().zip(values).collect::<Record>());
    }

    TableOutcome::Parsed(TableData {
        name: block.name.to_string(),
        row_count_hint: block.row_count_hint,
        columns,
        rows,
        defects,
    })
}

// Run the whole pipeline over a fully read dump.
// A dump without headers yields an empty Extraction; the caller decides
// whether that is fatal.
pub fn extract_dump(
    dump: &str,
    options: &ExtractOptions,
    bar: Option<&ProgressBar>,
) -> Result<Extraction, Box<dyn std::error::Error + Send + Sync>> {
    let splitter = BlockSplitter::new();
    let blocks: Vec<TableBlock<'_>> = splitter.blocks(dump).collect();
    logger::info(&format!("Found {} tables to process", blocks.len()));
    if let Some(b) = bar {
        b.set_length(blocks.len() as u64);
    }

    let worker_count = if options.workers > 0 {
        options.workers
    } else {
        num_cpus::get()
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .build()?;
    logger::debug(&format!("ExtractDump: using {} workers", worker_count));

    let parse_start = Instant::now();
    let outcomes: Vec<TableOutcome> = pool.install(|| {
        blocks
            .par_iter()
            .map(|block| {
                let outcome = extract_table(block, options.mode);
                if let Some(b) = bar {
                    b.inc(1);
                }
                outcome
            })
            .collect()
    });
    if let Some(b) = bar {
        b.finish();
    }
    logger::debug(&format!(
        "Timing: parsing {} tables took {:?}",
        outcomes.len(),
        parse_start.elapsed()
    ));

    let mut extraction = Extraction {
        headers_found: outcomes.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        merge_outcome(&mut extraction, outcome);
    }
    Ok(extraction)
}

// Fold one table into the result. A repeated table name replaces the
// earlier data (keeping its position); a repeated empty block does not.
// A name is listed in `empty_tables` only while no block of it has parsed.
fn merge_outcome(extraction: &mut Extraction, outcome: TableOutcome) {
    match outcome {
        TableOutcome::Parsed(table) => {
            let hint = table
                .row_count_hint
                .map_or_else(|| "?".to_string(), |n| n.to_string());
            logger::info(&format!("Processing table: {} ({} rows)", table.name, hint));
            for defect in &table.defects {
                logger::warn(&format!(
                    "  {} row {}: {}",
                    defect.table, defect.row, defect
                ));
            }
            logger::info(&format!(
                "  Extracted {} rows for {}",
                table.row_count(),
                table.name
            ));
            let was_empty = extraction.empty_tables.contains(&table.name);
            if extraction.tables.contains_key(&table.name) || was_empty {
                logger::warn(&format!(
                    "  Table {} appears more than once; keeping the later block",
                    table.name
                ));
            }
            extraction.empty_tables.retain(|name| name != &table.name);
            extraction.tables.insert(table.name.clone(), table);
        }
        TableOutcome::Empty { name } => {
            logger::warn(&format!("  No INSERT statements found for {}", name));
            if extraction.tables.contains_key(&name) {
                logger::warn(&format!(
                    "  Table {} appears more than once; keeping the earlier parsed block",
                    name
                ));
            } else if !extraction.empty_tables.contains(&name) {
                extraction.empty_tables.push(name);
            }
        }
    }
}
