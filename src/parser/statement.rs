// INSERT statement extractor for one table block.
// Two strategies: a non-greedy regex (stops at the first ");" even inside a
// quoted string) and a quote-aware scan that finds the real end of VALUES.

use crate::logger;
use crate::parser::tokenizer::{Lexeme, ScanState};
use regex::{CaptureMatches, Regex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    // `INSERT INTO t \((.*?)\) VALUES \((.*?)\);`
    #[default]
    Pattern,
    // Track quotes/parentheses to locate the closing ");".
    Scan,
}

// Column list and VALUES clause of one INSERT, borrowed from the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStatement<'a> {
    pub table: &'a str,
    pub columns: &'a str,
    pub values: &'a str,
}

enum Matcher {
    Pattern(Regex),
    Scan { needle: String },
}

pub struct StatementExtractor<'a> {
    table: &'a str,
    matcher: Matcher,
}

const VALUES_MARKER: &str = ") VALUES (";

impl<'a> StatementExtractor<'a> {
    pub fn new(table: &'a str, mode: ExtractMode) -> Self {
        let matcher = match mode {
            ExtractMode::Pattern => {
                let pattern = format!(
                    r"(?s)INSERT INTO {} \((.*?)\) VALUES \((.*?)\);",
                    regex::escape(table)
                );
                Matcher::Pattern(Regex::new(&pattern).expect("valid insert regex"))
            }
            ExtractMode::Scan => Matcher::Scan {
                needle: format!("INSERT INTO {} (", table),
            },
        };
        Self { table, matcher }
    }

    // Lazily yield every INSERT for this table in `block`, in order.
    pub fn statements<'e>(&'e self, block: &'a str) -> Statements<'e, 'a> {
        match &self.matcher {
            Matcher::Pattern(re) => Statements::Pattern {
                table: self.table,
                captures: re.captures_iter(block),
            },
            Matcher::Scan { needle } => Statements::Scan {
                table: self.table,
                needle,
                text: block,
                pos: 0,
            },
        }
    }
}

pub enum Statements<'e, 'a> {
    Pattern {
        table: &'a str,
        captures: CaptureMatches<'e, 'a>,
    },
    Scan {
        table: &'a str,
        needle: &'e str,
        text: &'a str,
        pos: usize,
    },
}

impl<'e, 'a> Iterator for Statements<'e, 'a> {
    type Item = RawStatement<'a>;

    fn next(&mut self) -> Option<RawStatement<'a>> {
        match self {
            Statements::Pattern { table, captures } => {
                let caps = captures.next()?;
                Some(RawStatement {
                    table: *table,
                    columns: caps.get(1)?.as_str(),
                    values: caps.get(2)?.as_str(),
                })
            }
            Statements::Scan {
                table,
                needle,
                text,
                pos,
            } => loop {
                let (table, needle, text): (&'a str, &'e str, &'a str) = (*table, *needle, *text);
                let start = *pos + text[*pos..].find(needle)?;
                let columns_start = start + needle.len();
                let columns_len = text[columns_start..].find(VALUES_MARKER)?;
                let values_start = columns_start + columns_len + VALUES_MARKER.len();
                // A VALUES body never runs into the next INSERT for this table,
                // so a broken statement does not rescan the rest of the block.
                let body_end = text[values_start..]
                    .find(needle)
                    .map_or(text.len(), |n| values_start + n);

                match find_values_end(&text[values_start..body_end]) {
                    Some(len) => {
                        // Skip past the closing ");".
                        *pos = values_start + len + 2;
                        return Some(RawStatement {
                            table,
                            columns: &text[columns_start..columns_start + columns_len],
                            values: &text[values_start..values_start + len],
                        });
                    }
                    None => {
                        logger::debug(&format!(
                            "Statements: unterminated INSERT for {} at byte {}",
                            table, start
                        ));
                        *pos = columns_start;
                    }
                }
            },
        }
    }
}

// Length of the VALUES body: up to the unquoted ')' that closes the clause
// and is directly followed by ';'.
fn find_values_end(body: &str) -> Option<usize> {
    let mut state = ScanState::new();
    let bytes = body.as_bytes();
    for (i, c) in body.char_indices() {
        if state.feed(c) == Lexeme::Close
            && state.depth() < 0
            && bytes.get(i + 1) == Some(&b';')
        {
            return Some(i);
        }
    }
    None
}

// Canonical column order from a column-list clause: "id, name" -> ["id", "name"].
pub fn column_names(columns: &str) -> Vec<String> {
    columns.split(',').map(|c| c.trim().to_string()).collect()
}
