//! Parser state and the entry points for building the tree.
//!
//! This module contains the main Parser struct: the token cursor, the
//! session's reporter and options, and the lookup tables that
//! `create_token_lookups` fills in. It also owns error recovery:
//!
//! - `expect` reports a missing token and synchronizes
//! - `require_semi` reports a missing `;` softly when parsing can resume in place
//! - `accept_asserted` turns a broken parser guarantee into a fatal error
//!
//! Handlers return [`PResult`]. `Unwind::Synced` means an error was reported
//! and the cursor now rests on a synchronization token; the nearest
//! statement loop picks up from there. `Unwind::Abort` ends the session.

use std::collections::HashMap;

use tracing::{debug, error, trace};

use crate::{
    ast::{
        ast::{Expr, Node},
        statements::{Block, Root},
    },
    config::ParseOptions,
    errors::{
        errors::{ErrorCode, ParseError},
        reporter::Reporter,
    },
    lexer::{
        stream::TokenStream,
        tokens::{Token, TokenKind},
    },
    Span,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stack::ensure_sufficient_stack,
    stmt::parse_stmt,
};

/// Deepest nesting of expressions and blocks the parser descends into.
pub const MAX_NESTING_DEPTH: usize = 256;

/// How a grammar rule stopped short.
#[derive(Debug)]
pub enum Unwind {
    /// An error was reported and the cursor sits on a synchronization token.
    Synced,
    /// The session is over.
    Abort(ParseError),
}

impl From<ParseError> for Unwind {
    fn from(error: ParseError) -> Self {
        Unwind::Abort(error)
    }
}

pub type PResult<T> = Result<T, Unwind>;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The token cursor
    stream: TokenStream,
    /// Where diagnostics go
    reporter: &'a mut Reporter,
    options: &'a ParseOptions,
    /// Cursor position the current statement started at
    statement_start: usize,
    /// Code and span of the last error that triggered synchronization
    last_failure: Option<(ErrorCode, Span)>,
    /// Expressions and blocks currently being parsed
    nesting_depth: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance with empty lookup tables.
    ///
    /// # Arguments
    ///
    /// * `stream` - The tokens to parse, EOF included
    /// * `reporter` - The session's diagnostic sink
    /// * `options` - Recovery policy and synchronization tokens
    pub fn new(stream: TokenStream, reporter: &'a mut Reporter, options: &'a ParseOptions) -> Self {
        Parser {
            stream,
            reporter,
            options,
            statement_start: 0,
            last_failure: None,
            nesting_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.stream.seek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.stream.seek_kind()
    }

    /// Returns the kind of the token `n` places after the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.stream.peek(n).kind
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.stream.seek().clone();
        self.stream.advance();
        token
    }

    pub fn is_next(&self, kinds: &[TokenKind]) -> bool {
        self.stream.is_next(kinds)
    }

    pub fn accept_if_next(&mut self, kinds: &[TokenKind]) -> bool {
        self.stream.accept_if_next(kinds)
    }

    pub fn position(&self) -> usize {
        self.stream.position()
    }

    /// Moves the cursor back (or forward) for rollback lookahead.
    pub fn set_position(&mut self, position: usize) {
        self.stream.set_position(position);
    }

    pub fn options(&self) -> &ParseOptions {
        self.options
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `code` - What to report if the current token is something else
    ///
    /// # Returns
    ///
    /// The consumed token, or the unwind produced by error recovery.
    pub fn expect(&mut self, expected_kind: TokenKind, code: ErrorCode) -> PResult<Token> {
        let token = self.stream.accept(&[expected_kind], code, self.reporter);
        if token.kind == expected_kind {
            return Ok(token);
        }

        let span = self.stream.mismatch_span();
        Err(self.recover(code, span))
    }

    /// Reports the current token as unexpected and synchronizes.
    pub fn fail(&mut self, code: ErrorCode) -> Unwind {
        self.stream.report_unexpected(code, self.reporter);
        let span = self.stream.mismatch_span();
        self.recover(code, span)
    }

    /// Consumes a token the caller already checked for.
    ///
    /// A mismatch here is a bug in the parser, never bad input.
    pub fn accept_asserted(&mut self, expected_kind: TokenKind) -> PResult<Token> {
        if self.is_next(&[expected_kind]) {
            return Ok(self.advance());
        }

        Err(self.asserted(format!("expected {} here", expected_kind)))
    }

    /// Reports a fatal `ASSERTED` error with a dump of the parser state.
    pub fn asserted(&mut self, detail: String) -> Unwind {
        let span = self.stream.seek().span.clone();
        let state = self.dump_state(&detail);

        error!(target: "pretzel::parser", %state, "parser assertion failed");
        self.reporter.fatal(ErrorCode::Asserted, span.clone(), detail);

        Unwind::Abort(ParseError::Internal {
            code: ErrorCode::Asserted,
            span,
            state,
        })
    }

    /// Requires a statement-terminating `;`.
    ///
    /// When the `;` is missing but the next token already starts something
    /// new (a synchronization token, `}` or EOF) the error is reported right
    /// after the previous token and parsing resumes in place.
    pub fn require_semi(&mut self) -> PResult<()> {
        if self.accept_if_next(&[TokenKind::Semicolon]) {
            return Ok(());
        }

        let kind = self.current_token_kind();
        if kind == TokenKind::CloseCurly || kind == TokenKind::EOF || self.options.is_sync_point(kind) {
            let span = self
                .stream
                .previous_end()
                .unwrap_or_else(|| self.stream.mismatch_span());
            let extra = format!("found {}", self.current_token());
            return self.soft_error(ErrorCode::ExpectedSemi, span, extra);
        }

        Err(self.fail(ErrorCode::ExpectedSemi))
    }

    /// Reports an error that needs no synchronization.
    ///
    /// Still aborts when the session does not keep going after errors.
    pub fn soft_error(&mut self, code: ErrorCode, span: Span, extra: String) -> PResult<()> {
        self.reporter.report(code, span.clone(), extra);

        if !self.options.keep_going {
            return Err(Unwind::Abort(ParseError::Aborted {
                code,
                span,
                consumed: self.statement_start..self.stream.position(),
            }));
        }

        Ok(())
    }

    /// Reports a warning. Warnings never stop the parse.
    pub fn warn(&mut self, code: ErrorCode, span: Span) {
        self.reporter.warning(code, span, String::new());
    }

    /// Counts one more level of nesting before a recursive rule descends.
    ///
    /// Past [`MAX_NESTING_DEPTH`] the current token is reported, the
    /// bracketed region it opens is skipped and the parser synchronizes.
    /// Every `Ok` must be paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> PResult<()> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            let span = self.stream.mismatch_span();
            self.stream.report_unexpected(ErrorCode::NestingTooDeep, self.reporter);
            self.skip_nested();
            return Err(self.recover(ErrorCode::NestingTooDeep, span));
        }

        self.nesting_depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Skips past the bracket the current token opens and everything up to
    /// its match. Does nothing if the current token opens no bracket.
    fn skip_nested(&mut self) {
        let mut open = 0usize;
        loop {
            match self.current_token_kind() {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly => open += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly if open > 0 => {
                    open -= 1
                }
                _ if open == 0 => return,
                _ => {}
            }

            if self.stream.is_at_end() {
                return;
            }
            self.stream.advance();
            if open == 0 {
                return;
            }
        }
    }

    /// Skips tokens until a synchronization token is current.
    ///
    /// The error itself has already been reported.
    fn recover(&mut self, code: ErrorCode, span: Span) -> Unwind {
        self.last_failure = Some((code, span.clone()));

        if !self.options.keep_going {
            return Unwind::Abort(ParseError::Aborted {
                code,
                span,
                consumed: self.statement_start..self.stream.position(),
            });
        }

        let from = self.stream.position();
        while !self.options.is_sync_point(self.current_token_kind()) {
            if self.stream.is_at_end() {
                return Unwind::Abort(ParseError::CannotSync {
                    code,
                    span,
                    consumed: self.statement_start..self.stream.position(),
                });
            }
            self.stream.advance();
        }

        debug!(
            target: "pretzel::parser",
            code = code.name(),
            skipped = self.stream.position() - from,
            stopped_at = %self.current_token_kind(),
            "synchronized"
        );
        Unwind::Synced
    }

    fn dump_state(&self, detail: &str) -> String {
        let position = self.stream.position();
        let tokens = self.stream.tokens();
        let from = position.saturating_sub(3).min(tokens.len());
        let to = (position + 3).min(tokens.len());
        let window = tokens[from..to]
            .iter()
            .map(|token| format!("{:?} {:?}", token.kind, token.lexeme))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{}\n  cursor: {} of {}\n  statement start: {}\n  current: {}\n  window: [{}]",
            detail,
            position,
            tokens.len(),
            self.statement_start,
            self.current_token(),
            window
        )
    }

    /// Span from `start` up to the end of the last consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        match self.stream.previous() {
            Some(previous) => start.to(&previous.span, self.stream.source()),
            None => start.clone(),
        }
    }

    pub fn span_since(&self, start: Option<&Span>) -> Option<Span> {
        start.map(|start| self.span_from(start))
    }

    /// Parses statements until EOF or, inside a block, until `terminator`.
    ///
    /// This is where synchronized errors come to rest. Every iteration
    /// moves the cursor: a recovered statement that consumed nothing gets
    /// one token skipped, a successful one that consumed nothing is a
    /// parser defect.
    pub fn parse_statements(&mut self, terminator: Option<TokenKind>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = vec![];
        let outer_start = self.statement_start;

        while !self.stream.is_at_end() && Some(self.current_token_kind()) != terminator {
            let start = self.stream.position();
            self.statement_start = start;

            match parse_stmt(self) {
                Ok(node) => {
                    if self.stream.position() == start {
                        let detail = format!("statement at {} consumed no tokens", self.current_token());
                        return Err(unwind_to_error(self.asserted(detail), self));
                    }
                    nodes.extend(node);
                }
                Err(Unwind::Synced) => {
                    if self.stream.position() == start {
                        trace!(target: "pretzel::parser", skipped = %self.current_token(), "no progress after recovery");
                        self.stream.advance();
                    }
                }
                Err(Unwind::Abort(error)) => return Err(error),
            }
        }

        self.statement_start = outer_start;
        Ok(nodes)
    }

    /// Parses `{ statement* }`.
    pub fn parse_block(&mut self) -> PResult<Block> {
        ensure_sufficient_stack(|| {
            self.enter_nesting()?;
            let block = self.parse_block_body();
            self.leave_nesting();
            block
        })
    }

    fn parse_block_body(&mut self) -> PResult<Block> {
        let open = self.expect(TokenKind::OpenCurly, ErrorCode::ExpectedBlockStart)?;
        let nodes = self.parse_statements(Some(TokenKind::CloseCurly))?;
        self.expect(TokenKind::CloseCurly, ErrorCode::ExpectedBlockEnd)?;

        Ok(Block {
            nodes,
            source_range: Some(self.span_from(&open.span)),
        })
    }

    fn whole_span(&self) -> Span {
        let tokens = self.stream.tokens();
        let first = &tokens[0].span;
        let last = &tokens[tokens.len() - 1].span;
        first.to(last, self.stream.source())
    }

    /// Registers a left denotation (infix or postfix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - How tightly the operator binds
    /// * `led_fn` - The handler function for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (primary or prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` if it is no operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

/// Turns an unwind that escaped to the top into the session's failure.
fn unwind_to_error(unwind: Unwind, parser: &Parser) -> ParseError {
    match unwind {
        Unwind::Abort(error) => error,
        Unwind::Synced => {
            let (code, span) = parser
                .last_failure
                .clone()
                .unwrap_or_else(|| (ErrorCode::UnexpectedToken, parser.stream.mismatch_span()));
            ParseError::Aborted {
                code,
                span,
                consumed: 0..parser.stream.position(),
            }
        }
    }
}

/// Parses a token stream into the tree of a whole source file.
///
/// # Arguments
///
/// * `stream` - The tokens, EOF included
/// * `reporter` - Receives every diagnostic
/// * `options` - Recovery policy
///
/// # Returns
///
/// The root node, or the failure that ended the session. With
/// `keep_going` the root holds whatever was recovered around the errors.
pub fn parse(stream: TokenStream, reporter: &mut Reporter, options: &ParseOptions) -> Result<Root, ParseError> {
    let mut parser = Parser::new(stream, reporter, options);
    create_token_lookups(&mut parser);

    let nodes = parser.parse_statements(None)?;

    Ok(Root {
        nodes,
        source_range: Some(parser.whole_span()),
    })
}

/// Parses a token stream holding exactly one expression.
///
/// Here `{` opens a dict literal, never a block.
pub fn parse_expression(
    stream: TokenStream,
    reporter: &mut Reporter,
    options: &ParseOptions,
) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(stream, reporter, options);
    create_token_lookups(&mut parser);

    let expr = match parse_expr(&mut parser, BindingPower::Default) {
        Ok(expr) => expr,
        Err(unwind) => return Err(unwind_to_error(unwind, &parser)),
    };

    if !parser.stream.is_at_end() {
        let span = parser.stream.mismatch_span();
        let extra = format!("found {}", parser.current_token());
        if let Err(unwind) = parser.soft_error(ErrorCode::UnexpectedToken, span, extra) {
            return Err(unwind_to_error(unwind, &parser));
        }
    }

    Ok(expr)
}
