//! Cursor over an immutable token list.
//!
//! All progress through the tokens is cursor movement, so saving and
//! restoring `position` is all it takes to backtrack.

use std::sync::Arc;

use crate::{
    errors::{errors::ErrorCode, errors::ParseError, reporter::Reporter},
    split_lines, Location, Span, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    source: Arc<str>,
}

impl TokenStream {
    /// Wraps `tokens` and appends the single zero-width EOF token.
    ///
    /// The EOF sits where the last real token ends, or at `1:1` for empty input.
    pub fn new(mut tokens: Vec<Token>, source: &str, origin: &str) -> Self {
        let span = match tokens.last() {
            Some(last) => {
                let end = last.span.end.clone();
                let line_text = split_lines(source)
                    .get(end.line.saturating_sub(1) as usize)
                    .cloned()
                    .unwrap_or_else(|| Arc::clone(&last.span.line_text));
                Span::empty_at(end, line_text)
            }
            None => {
                let line_text = split_lines(source).into_iter().next().unwrap_or_else(|| Arc::from(""));
                Span::empty_at(Location::start_of(origin), line_text)
            }
        };
        tokens.push(MK_TOKEN!(TokenKind::EOF, String::new(), span));

        TokenStream {
            tokens,
            position: 0,
            source: Arc::from(source),
        }
    }

    /// The current token. Past the end this keeps returning EOF.
    pub fn seek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub fn seek_kind(&self) -> TokenKind {
        self.seek().kind
    }

    /// Looks `n` tokens past the current one, clamping at EOF.
    pub fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Consumes the current token and returns it.
    ///
    /// Consuming EOF itself is allowed once; anything after that is an error.
    pub fn next(&mut self) -> Result<&Token, ParseError> {
        if self.position >= self.tokens.len() {
            return Err(ParseError::EndOfStream {
                position: self.position,
                len: self.tokens.len(),
            });
        }

        self.position += 1;
        Ok(&self.tokens[self.position - 1])
    }

    pub fn is_next(&self, kinds: &[TokenKind]) -> bool {
        self.seek().is_one_of_many(kinds)
    }

    pub fn is_next_lexeme(&self, lexemes: &[&str]) -> bool {
        let token = self.seek();
        token.kind != TokenKind::EOF && lexemes.contains(&token.lexeme.as_str())
    }

    pub fn accept_if_next(&mut self, kinds: &[TokenKind]) -> bool {
        if self.is_next(kinds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is one of `kinds`.
    ///
    /// On mismatch `code` is reported and the current token is returned
    /// without being consumed. INVALID tokens are not reported again, the
    /// lexer already did. A missing token at EOF is reported right after
    /// the previous token.
    pub fn accept(&mut self, kinds: &[TokenKind], code: ErrorCode, reporter: &mut Reporter) -> Token {
        if self.is_next(kinds) {
            let token = self.seek().clone();
            self.advance();
            return token;
        }

        self.report_unexpected(code, reporter);
        self.seek().clone()
    }

    /// Reports `code` against the current token, unless it is INVALID.
    pub fn report_unexpected(&self, code: ErrorCode, reporter: &mut Reporter) {
        let current = self.seek();
        match current.kind {
            TokenKind::Invalid => {}
            TokenKind::EOF => reporter.report(code, self.mismatch_span(), "found end of file"),
            _ => reporter.report(code, self.mismatch_span(), format!("found {}", current)),
        }
    }

    /// Where a mismatch on the current token is reported.
    pub fn mismatch_span(&self) -> Span {
        let current = self.seek();
        if current.kind == TokenKind::EOF {
            if let Some(span) = self.previous_end() {
                return span;
            }
        }
        current.span.clone()
    }

    /// Zero-width span right after the previously consumed token.
    pub fn previous_end(&self) -> Option<Span> {
        let index = self.position.min(self.tokens.len()).checked_sub(1)?;
        let previous = self.tokens.get(index)?;
        Some(Span::empty_at(
            previous.span.end.clone(),
            Arc::clone(&previous.span.line_text),
        ))
    }

    /// The token consumed last, if any.
    pub fn previous(&self) -> Option<&Token> {
        let index = self.position.checked_sub(1)?;
        self.tokens.get(index)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor, clamped to `[0, len]`.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    pub fn is_at_end(&self) -> bool {
        self.seek_kind() == TokenKind::EOF
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
