#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::{
    ast::statements::Root,
    config::ParseOptions,
    errors::{errors::ParseError, reporter::Reporter},
    lexer::{lexer::tokenize, stream::TokenStream},
    parser::parser::parse,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A single point in a source text.
///
/// Lines and columns are 1-based, `offset` is the byte offset into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
    pub file: Arc<str>,
}

impl Location {
    pub fn start_of(file: &str) -> Self {
        Location {
            line: 1,
            column: 1,
            offset: 0,
            file: Arc::from(file),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of source text.
///
/// Besides the two locations a span carries the exact text it covers and the
/// full text of the line it starts on, which is what diagnostics render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
    pub text: String,
    pub line_text: Arc<str>,
}

impl Span {
    pub fn new(start: Location, end: Location, text: String, line_text: Arc<str>) -> Self {
        debug_assert!(end.offset >= start.offset);
        Span {
            start,
            end,
            text,
            line_text,
        }
    }

    /// A zero-width span sitting at `location`.
    pub fn empty_at(location: Location, line_text: Arc<str>) -> Self {
        Span {
            start: location.clone(),
            end: location,
            text: String::new(),
            line_text,
        }
    }

    /// Joins two spans into one covering `self.start..other.end`.
    ///
    /// The covered text is rebuilt from the source the spans were cut from.
    pub fn to(&self, other: &Span, source: &str) -> Span {
        let end = if other.end.offset >= self.start.offset {
            other.end.clone()
        } else {
            self.end.clone()
        };
        let text = source
            .get(self.start.offset..end.offset)
            .unwrap_or_default()
            .to_string();

        Span {
            start: self.start.clone(),
            end,
            text,
            line_text: Arc::clone(&self.line_text),
        }
    }

    pub fn width(&self) -> usize {
        self.end.offset - self.start.offset
    }
}

/// Splits a source text into its lines, without line terminators.
///
/// Line `n` (1-based) lives at index `n - 1`.
pub fn split_lines(source: &str) -> Vec<Arc<str>> {
    source
        .split('\n')
        .map(|line| Arc::from(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Runs one complete parse session over `source`.
///
/// The session owns its reporter; it is handed back together with the
/// parse result so the caller can render or inspect the diagnostics.
pub fn parse_source(
    source: &str,
    origin: &str,
    options: &ParseOptions,
) -> (Reporter, Result<Root, ParseError>) {
    let mut reporter = Reporter::with_suppressed(options.suppressed.iter().cloned());

    let (tokens, had_error) = tokenize(source, origin, &mut reporter);
    if had_error && !options.keep_going {
        let errors = reporter.error_count();
        return (reporter, Err(ParseError::Lexical { errors }));
    }

    let stream = TokenStream::new(tokens, source, origin);
    let result = parse(stream, &mut reporter, options);

    (reporter, result)
}
