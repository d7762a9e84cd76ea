//! Type and symbol path parsing.
//!
//! Types are a dotted symbol path followed by any number of `[]` array
//! dimensions. Symbol paths are shared with `mod`, `use` and `new`, the
//! only place a trailing `.*` may appear is a `use` target.

use tracing::trace;

use crate::{
    ast::{expressions::SymbolReference, statements::Symbol, types::TypeReference},
    errors::errors::ErrorCode,
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::{PResult, Parser};

/// Parses `IDENT ("." IDENT)*` with an optional trailing `.*`.
///
/// # Arguments
///
/// * `parser` - The parser, positioned on the first identifier
/// * `first_code` - Reported when the first identifier is missing
///
/// # Returns
///
/// The symbol and, if the path ended in `.*`, the span of the `*`. The
/// symbol's own range never covers the wildcard.
pub fn parse_symbol_path(parser: &mut Parser, first_code: ErrorCode) -> PResult<(Symbol, Option<Span>)> {
    let first = parser.expect(TokenKind::Identifier, first_code)?;
    let start = first.span.clone();
    let mut parts = vec![SymbolReference {
        name: first.lexeme,
        source_range: Some(first.span),
    }];

    loop {
        if parser.is_next(&[TokenKind::Dot]) && parser.peek_kind(1) == TokenKind::Star {
            let source_range = Some(parser.span_from(&start));
            parser.advance();
            let star = parser.advance();
            return Ok((Symbol { parts, source_range }, Some(star.span)));
        }

        if !parser.accept_if_next(&[TokenKind::Dot]) {
            break;
        }

        let part = parser.expect(TokenKind::Identifier, ErrorCode::ExpectedNsName)?;
        parts.push(SymbolReference {
            name: part.lexeme,
            source_range: Some(part.span),
        });
    }

    Ok((
        Symbol {
            parts,
            source_range: Some(parser.span_from(&start)),
        },
        None,
    ))
}

/// Parses a type annotation such as `std.List[][]`.
pub fn parse_type(parser: &mut Parser) -> PResult<TypeReference> {
    let start = parser.current_token().span.clone();

    let (path, wildcard) = parse_symbol_path(parser, ErrorCode::ExpectedType)?;
    if let Some(star) = wildcard {
        parser.soft_error(ErrorCode::WildcardNotAllowed, star, String::new())?;
    }

    let mut dimensions = 0;
    while parser.accept_if_next(&[TokenKind::OpenBracket]) {
        parser.expect(TokenKind::CloseBracket, ErrorCode::ExpectedListEnd)?;
        dimensions += 1;
    }

    Ok(TypeReference {
        path,
        dimensions,
        source_range: Some(parser.span_from(&start)),
    })
}

/// Moves the cursor past something shaped like a type, reporting nothing.
///
/// Only for lookahead; the caller restores the position.
pub fn skip_type(parser: &mut Parser) -> bool {
    if !parser.accept_if_next(&[TokenKind::Identifier]) {
        return false;
    }

    while parser.is_next(&[TokenKind::Dot]) && parser.peek_kind(1) == TokenKind::Identifier {
        parser.advance();
        parser.advance();
    }

    while parser.is_next(&[TokenKind::OpenBracket]) && parser.peek_kind(1) == TokenKind::CloseBracket {
        parser.advance();
        parser.advance();
    }

    trace!(target: "pretzel::parser", position = parser.position(), "skipped type");
    true
}
