// Author: Dustin Pilgrim
// License: MIT

use crate::ConfigError;

mod classifier;
mod scanner;

pub use classifier::{classify, is_identifier};

/// The shape of one physical line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind<'a> {
    /// Empty, whitespace-only, `#` or `//` comment.
    Blank,
    /// `NAME:` or `NAME IDENTIFIER:`
    Block { name: &'a str, id: Option<&'a str> },
    /// `KEY = VALUE`, with `VALUE` still untrimmed.
    Assign { key: &'a str, value: &'a str },
}

/// A significant (non-blank) line with its position and indentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub number: usize,
    pub indent: usize,
    pub raw: &'a str,
    pub kind: LineKind<'a>,
}

pub struct Lexer<'a> {
    rest: &'a str,
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            rest: input,
            line: 0,
            finished: false,
        }
    }

    /// 1-based number of the last physical line read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next block header or assignment, skipping blanks and comments.
    pub fn next_line(&mut self) -> Result<Option<Line<'a>>, ConfigError> {
        while let Some(raw) = scanner::next_physical(self) {
            let kind = classify(raw).ok_or_else(|| ConfigError::SyntaxError {
                message: "Unrecognized line".into(),
                line: self.line,
                text: raw.to_string(),
                hint: Some("Expected `NAME:`, `NAME IDENTIFIER:` or `key = value`".into()),
                code: Some(101),
            })?;

            if kind == LineKind::Blank {
                continue;
            }

            return Ok(Some(Line {
                number: self.line,
                indent: scanner::indent_width(raw),
                raw,
                kind,
            }));
        }
        Ok(None)
    }
}
