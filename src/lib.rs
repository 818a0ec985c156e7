//! Extract table data from SQL INSERT dumps into typed records.
//!
//! The dump is split into table blocks by `-- <table> (<n> rows)` headers,
//! each block's `INSERT INTO ... VALUES (...);` statements are tokenized and
//! every literal is typed (`NULL`, booleans, numbers, quoted text, JSON).
//! The binary writes one JSON document per table plus a summary manifest.

pub mod extractor;
pub mod logger;
pub mod parser;
pub mod progress;
pub mod writer;

pub use extractor::{extract_dump, extract_table, ExtractOptions, Extraction, TableData, TableOutcome};
pub use parser::statement::ExtractMode;
pub use parser::{Record, RowDefect, TypedValue};
