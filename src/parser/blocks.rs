// Block splitter: finds "-- <table> (<n> rows)" headers followed by a
// "-- ====" separator line and yields the text between consecutive headers.

use regex::{CaptureMatches, Regex};
use std::iter::Peekable;

const HEADER_PATTERN: &str = r"-- (\w+) \((\d+) rows\)\r?\n-- ={44}\r?\n";

// One table section of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBlock<'a> {
    pub name: &'a str,
    // Row count announced by the header. Informational only.
    pub row_count_hint: Option<u64>,
    pub text: &'a str,
}

pub struct BlockSplitter {
    header_re: Regex,
}

impl BlockSplitter {
    pub fn new() -> Self {
        let header_re = Regex::new(HEADER_PATTERN).expect("valid table header regex");
        Self { header_re }
    }

    // Lazily walk the headers of `dump` in order of appearance.
    pub fn blocks<'r, 'a>(&'r self, dump: &'a str) -> TableBlocks<'r, 'a> {
        TableBlocks {
            dump,
            headers: self.header_re.captures_iter(dump).peekable(),
        }
    }
}

impl Default for BlockSplitter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TableBlocks<'r, 'a> {
    dump: &'a str,
    headers: Peekable<CaptureMatches<'r, 'a>>,
}

impl<'r, 'a> Iterator for TableBlocks<'r, 'a> {
    type Item = TableBlock<'a>;

    fn next(&mut self) -> Option<TableBlock<'a>> {
        let caps = self.headers.next()?;
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let row_count_hint = caps.get(2).and_then(|m| m.as_str().parse().ok());

        // The block stops right before the next header, or at end of text.
        let end = match self.headers.peek().and_then(|next| next.get(0)) {
            Some(next) => trim_newline_before(self.dump, next.start()),
            None => self.dump.len(),
        };

        Some(TableBlock {
            name,
            row_count_hint,
            text: &self.dump[whole.end()..end],
        })
    }
}

// The line break ending a block belongs to the next header, not the block.
fn trim_newline_before(dump: &str, pos: usize) -> usize {
    let head = &dump[..pos];
    let head = head.strip_suffix('\n').unwrap_or(head);
    let head = head.strip_suffix('\r').unwrap_or(head);
    head.len()
}
