// VALUES clause tokenizer: splits "1, 'a,b', (2,3)" into top-level literals.
// Single pass over the input; literals are borrowed slices, trimmed.

use std::str::CharIndices;

// What a character meant to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    // Part of the current literal (including quotes and parentheses).
    Content,
    // An unquoted ')'; depth has already been decremented.
    Close,
    // An unquoted ',' at depth 0.
    Separator,
}

/// Quote and parenthesis state shared by the tokenizer and the statement scanner.
///
/// A quote is closed by the same quote character unless the character right
/// before it is a backslash. Doubled quotes (`''`) close and reopen, which
/// leaves the literal intact.
#[derive(Debug, Default, Clone)]
pub struct ScanState {
    quote: Option<char>,
    depth: i32,
    prev: Option<char>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn in_quotes(&self) -> bool {
        self.quote.is_some()
    }

    // Advance by one character.
    pub fn feed(&mut self, c: char) -> Lexeme {
        let escaped = self.prev == Some('\\');
        self.prev = Some(c);
        match self.quote {
            Some(q) => {
                if c == q && !escaped {
                    self.quote = None;
                }
                Lexeme::Content
            }
            None => match c {
                '\'' | '"' => {
                    self.quote = Some(c);
                    Lexeme::Content
                }
                '(' => {
                    self.depth += 1;
                    Lexeme::Content
                }
                ')' => {
                    self.depth -= 1;
                    Lexeme::Close
                }
                ',' if self.depth == 0 => Lexeme::Separator,
                _ => Lexeme::Content,
            },
        }
    }
}

/// Lazy iterator over the top-level literals of a VALUES clause.
///
/// Empty literals between separators are yielded as `""`; a trailing empty
/// literal (e.g. after a trailing comma) is dropped.
pub struct Literals<'a> {
    input: &'a str,
    chars: CharIndices<'a>,
    state: ScanState,
    start: usize,
    done: bool,
}

impl<'a> Literals<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices(),
            state: ScanState::new(),
            start: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Literals<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let input = self.input;
        for (i, c) in self.chars.by_ref() {
            if self.state.feed(c) == Lexeme::Separator {
                let literal = input[self.start..i].trim();
                self.start = i + c.len_utf8();
                return Some(literal);
            }
        }
        self.done = true;
        let last = input[self.start..].trim();
        if last.is_empty() {
            None
        } else {
            Some(last)
        }
    }
}

// Convenience: collect every literal of a VALUES clause.
pub fn split_literals(values: &str) -> Vec<&str> {
    Literals::new(values).collect()
}
