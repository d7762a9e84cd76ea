use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::{errors::ErrorCode, reporter::Reporter},
    split_lines, Location, Span, MK_GREEDY, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref NUMBER: Regex = Regex::new("^[0-9]+(\\.[0-9]+|[lLsS])?").unwrap();
    static ref HEX: Regex = Regex::new("^0[xX][0-9a-fA-F]*").unwrap();
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    file: Arc<str>,
    lines: Vec<Arc<str>>,
    tokens: Vec<Token>,
    reporter: &'a mut Reporter,
    had_error: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, origin: &str, reporter: &'a mut Reporter) -> Self {
        trace!(target: "pretzel::lexer", origin, bytes = source.len(), "creating lexer");

        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: Arc::from(origin),
            lines: split_lines(source),
            tokens: vec![],
            reporter,
            had_error: false,
        }
    }

    /// Looks `n` characters ahead without consuming anything.
    pub fn peek(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    /// Consumes one character, keeping line and column in step.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek(0)?;
        self.pos += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Consumes the next character only if it is `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Whether the upcoming characters spell out `chars` exactly.
    pub fn lookahead_is(&self, chars: &[char]) -> bool {
        chars
            .iter()
            .enumerate()
            .all(|(i, ch)| self.peek(i) == Some(*ch))
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.next();
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
            offset: self.pos,
            file: Arc::clone(&self.file),
        }
    }

    fn line_text(&self, line: u32) -> Arc<str> {
        self.lines
            .get(line.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_else(|| Arc::from(""))
    }

    fn span_from(&self, start: Location) -> Span {
        let text = self.source[start.offset..self.pos].to_string();
        let line_text = self.line_text(start.line);
        Span::new(start, self.location(), text, line_text)
    }

    fn push(&mut self, kind: TokenKind, lexeme: String, start: Location) {
        let span = self.span_from(start);
        self.tokens.push(MK_TOKEN!(kind, lexeme, span));
    }

    fn push_operator(&mut self, kind: TokenKind, start: Location) {
        let lexeme = self.source[start.offset..self.pos].to_string();
        self.push(kind, lexeme, start);
    }

    fn error(&mut self, code: ErrorCode, span: Span, extra: String) {
        self.had_error = true;
        self.reporter.error(code, span, extra);
    }

    fn error_at_eof(&mut self, code: ErrorCode) {
        let here = self.location();
        let span = Span::empty_at(here.clone(), self.line_text(here.line));
        self.error(code, span, String::new());
    }

    fn scan_token(&mut self) {
        let start = self.location();
        let Some(ch) = self.peek(0) else {
            return;
        };

        if ch.is_ascii_digit() {
            return self.number(start);
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.symbol(start);
        }

        self.next();
        let kind = match ch {
            ' ' | '\t' | '\r' | '\n' => return,
            '"' | '\'' => return self.string(start, ch, TokenKind::String),
            '@' => match self.peek(0) {
                Some(quote @ ('"' | '\'')) => {
                    self.next();
                    return self.string(start, quote, TokenKind::TemplateString);
                }
                _ => TokenKind::At,
            },
            '/' => {
                if self.match_char('/') {
                    return self.line_comment();
                }
                if self.match_char('*') {
                    return self.block_comment();
                }
                MK_GREEDY!(self, ['='] => TokenKind::SlashAssign; TokenKind::Slash)
            }
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenCurly,
            '}' => TokenKind::CloseCurly,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            '#' => TokenKind::Hash,
            '+' => MK_GREEDY!(self,
                ['+'] => TokenKind::PlusPlus,
                ['='] => TokenKind::PlusAssign;
                TokenKind::Plus),
            '-' => MK_GREEDY!(self,
                ['-'] => TokenKind::MinusMinus,
                ['='] => TokenKind::MinusAssign,
                ['>'] => TokenKind::Arrow;
                TokenKind::Minus),
            '*' => MK_GREEDY!(self,
                ['*', '='] => TokenKind::PowerAssign,
                ['*'] => TokenKind::Power,
                ['='] => TokenKind::StarAssign;
                TokenKind::Star),
            '%' => MK_GREEDY!(self, ['='] => TokenKind::PercentAssign; TokenKind::Percent),
            '^' => MK_GREEDY!(self, ['='] => TokenKind::CaretAssign; TokenKind::Caret),
            '&' => MK_GREEDY!(self,
                ['&'] => TokenKind::AndAnd,
                ['='] => TokenKind::AmpersandAssign;
                TokenKind::Ampersand),
            '|' => MK_GREEDY!(self,
                ['|'] => TokenKind::OrOr,
                ['='] => TokenKind::PipeAssign;
                TokenKind::Pipe),
            '!' => MK_GREEDY!(self,
                ['!'] => TokenKind::NotNull,
                ['='] => TokenKind::NotEquals;
                TokenKind::Not),
            '=' => MK_GREEDY!(self, ['='] => TokenKind::Equals; TokenKind::Assign),
            '<' => MK_GREEDY!(self,
                ['<', '='] => TokenKind::ShiftLeftAssign,
                ['<'] => TokenKind::ShiftLeft,
                ['='] => TokenKind::LessEquals;
                TokenKind::Less),
            '>' => MK_GREEDY!(self,
                ['>', '>', '='] => TokenKind::UnsignedShiftRightAssign,
                ['>', '>'] => TokenKind::UnsignedShiftRight,
                ['>', '='] => TokenKind::ShiftRightAssign,
                ['>'] => TokenKind::ShiftRight,
                ['='] => TokenKind::GreaterEquals;
                TokenKind::Greater),
            '?' => MK_GREEDY!(self,
                ['?', '='] => TokenKind::CoalesceAssign,
                ['?'] => TokenKind::Coalesce,
                ['.'] => TokenKind::NullSafeDot;
                TokenKind::Question),
            '.' => MK_GREEDY!(self,
                ['.', '.', '='] => TokenKind::EllipsisAssign,
                ['.', '.'] => TokenKind::Ellipsis,
                ['.', '='] => TokenKind::DotDotAssign,
                ['.'] => TokenKind::DotDot;
                TokenKind::Dot),
            other => {
                let span = self.span_from(start.clone());
                self.error(
                    ErrorCode::UnexpectedCharacter,
                    span,
                    format!("`{}`", other.escape_debug()),
                );
                TokenKind::Invalid
            }
        };

        self.push_operator(kind, start);
    }

    fn line_comment(&mut self) {
        while !matches!(self.peek(0), None | Some('\n')) {
            self.next();
        }
    }

    fn block_comment(&mut self) {
        loop {
            if self.lookahead_is(&['*', '/']) {
                self.advance_n(2);
                return;
            }
            if self.next().is_none() {
                return self.error_at_eof(ErrorCode::UnterminatedComment);
            }
        }
    }

    /// Scans string content up to the closing `quote`. The opening quote is already consumed.
    fn string(&mut self, start: Location, quote: char, kind: TokenKind) {
        let content_start = self.pos;

        loop {
            match self.peek(0) {
                None => {
                    let content = self.source[content_start..self.pos].to_string();
                    self.error_at_eof(ErrorCode::UnterminatedString);
                    return self.push(kind, content, start);
                }
                Some(ch) if ch == quote => {
                    let content = self.source[content_start..self.pos].to_string();
                    self.next();
                    return self.push(kind, content, start);
                }
                Some(_) => {
                    self.next();
                }
            }
        }
    }

    fn number(&mut self, start: Location) {
        let rest = self.remainder();

        if let Some(hex) = HEX.find(rest) {
            let text = hex.as_str().to_string();
            self.advance_n(text.len());

            if text.len() == 2 {
                let span = self.span_from(start.clone());
                self.error(ErrorCode::InvalidHexLiteral, span, format!("`{}`", text));
                return self.push(TokenKind::Invalid, text, start);
            }
            return self.push(TokenKind::Hex, text, start);
        }

        let Some(captures) = NUMBER.captures(rest) else {
            return;
        };
        let matched = captures.get(0).map_or("", |m| m.as_str());
        let suffix = captures.get(1).map_or("", |m| m.as_str());

        let (kind, lexeme) = match suffix {
            "" => (TokenKind::Integer, matched),
            "l" | "L" => (TokenKind::Long, &matched[..matched.len() - 1]),
            "s" | "S" => (TokenKind::Short, &matched[..matched.len() - 1]),
            _ => (TokenKind::Float, matched),
        };

        let lexeme = lexeme.to_string();
        self.advance_n(matched.len());
        self.push(kind, lexeme, start);
    }

    fn symbol(&mut self, start: Location) {
        let Some(value) = IDENTIFIER.find(self.remainder()) else {
            return;
        };
        let value = value.as_str();
        let kind = RESERVED_LOOKUP
            .get(value)
            .copied()
            .unwrap_or(TokenKind::Identifier);

        self.advance_n(value.len());
        self.push(kind, value.to_string(), start);
    }
}

/// Scans `source` into tokens, reporting lexical errors to `reporter`.
///
/// The returned list has no EOF token; `TokenStream::new` appends it.
/// The flag tells whether any lexical error was reported.
pub fn tokenize(source: &str, origin: &str, reporter: &mut Reporter) -> (Vec<Token>, bool) {
    let mut lex = Lexer::new(source, origin, reporter);

    while !lex.at_eof() {
        let before = lex.pos;
        lex.scan_token();

        // Every scan step eats at least one character
        if lex.pos == before {
            lex.next();
        }
    }

    debug!(
        target: "pretzel::lexer",
        origin,
        tokens = lex.tokens.len(),
        had_error = lex.had_error,
        "tokenized"
    );

    (lex.tokens, lex.had_error)
}
