use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::SymbolReference,
        statements::{
            ConditionalBranch, IfStatement, LocalVariableDeclaration, ModuleDeclaration,
            UseStatement, UseTarget, VariableAssignment, WildcardSymbol,
        },
    },
    errors::errors::ErrorCode,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{
    parser::{PResult, Parser, Unwind},
    types::{parse_symbol_path, parse_type, skip_type},
};

/// Parses one statement.
///
/// Tokens with a registered statement handler dispatch to it, anything
/// else is an expression statement terminated by `;`.
pub fn parse_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let kind = parser.current_token_kind();
    trace!(target: "pretzel::parser", %kind, position = parser.position(), "statement");

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.require_semi()?;

    Ok(Some(Node::Expression(expr)))
}

pub fn parse_module_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let start = parser.accept_asserted(TokenKind::Mod)?;

    let (name, wildcard) = parse_symbol_path(parser, ErrorCode::ExpectedNsName)?;
    if let Some(star) = wildcard {
        parser.soft_error(ErrorCode::WildcardNotAllowed, star, String::new())?;
    }
    parser.require_semi()?;

    Ok(Some(Node::Module(ModuleDeclaration {
        name,
        source_range: Some(parser.span_from(&start.span)),
    })))
}

pub fn parse_use_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let start = parser.accept_asserted(TokenKind::Use)?;

    let (symbol, wildcard) = parse_symbol_path(parser, ErrorCode::ExpectedNsName)?;
    let target = match wildcard {
        Some(_) => UseTarget::Wildcard(WildcardSymbol {
            source_range: parser.span_since(symbol.source_range.as_ref()),
            base: symbol,
        }),
        None => UseTarget::Symbol(symbol),
    };
    parser.require_semi()?;

    Ok(Some(Node::Use(UseStatement {
        target,
        source_range: Some(parser.span_from(&start.span)),
    })))
}

/// Looks past `let IDENT (":" type)?` for a `=` without consuming anything.
fn is_declaration_assignment(parser: &mut Parser) -> bool {
    let start = parser.position();

    let assigned = parser.accept_if_next(&[TokenKind::Let])
        && parser.accept_if_next(&[TokenKind::Identifier])
        && (!parser.accept_if_next(&[TokenKind::Colon]) || skip_type(parser))
        && parser.is_next(&[TokenKind::Assign]);
    parser.set_position(start);

    trace!(target: "pretzel::parser", position = start, assigned, "declaration lookahead");
    assigned
}

/// `let name (: type)? (= value)? ;`
///
/// A broken initializer still yields the declaration, without its value.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let has_assignment = is_declaration_assignment(parser);

    let start = parser.accept_asserted(TokenKind::Let)?;
    let name_token = parser.expect(TokenKind::Identifier, ErrorCode::ExpectedId)?;
    let name = SymbolReference {
        name: name_token.lexeme,
        source_range: Some(name_token.span),
    };

    let type_annotation = if parser.accept_if_next(&[TokenKind::Colon]) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let mut assignment = None;
    if has_assignment {
        let assign = parser.accept_asserted(TokenKind::Assign)?;

        match parse_expr(parser, BindingPower::Default) {
            Ok(value) => {
                assignment = Some(VariableAssignment {
                    target: name.clone(),
                    value,
                    source_range: Some(parser.span_from(&assign.span)),
                });
            }
            Err(Unwind::Synced) => {
                return Ok(Some(Node::LocalVariable(LocalVariableDeclaration {
                    name,
                    type_annotation,
                    assignment: None,
                    source_range: Some(parser.span_from(&start.span)),
                })));
            }
            Err(abort) => return Err(abort),
        }
    }

    parser.require_semi()?;

    Ok(Some(Node::LocalVariable(LocalVariableDeclaration {
        name,
        type_annotation,
        assignment,
        source_range: Some(parser.span_from(&start.span)),
    })))
}

fn parse_conditional_branch(parser: &mut Parser, start: &Span) -> PResult<ConditionalBranch> {
    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parser.parse_block()?;

    Ok(ConditionalBranch {
        condition,
        body,
        source_range: Some(parser.span_from(start)),
    })
}

/// `if cond { } (elif cond { })* (else { })?`
pub fn parse_if_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let start = parser.accept_asserted(TokenKind::If)?;
    let mut branches = vec![parse_conditional_branch(parser, &start.span)?];

    while parser.is_next(&[TokenKind::Elif]) {
        let elif = parser.advance();
        branches.push(parse_conditional_branch(parser, &elif.span)?);
    }

    let otherwise = if parser.accept_if_next(&[TokenKind::Else]) {
        Some(parser.parse_block()?)
    } else {
        None
    };

    Ok(Some(Node::If(IfStatement {
        branches,
        otherwise,
        source_range: Some(parser.span_from(&start.span)),
    })))
}

pub fn parse_block_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    Ok(Some(Node::Block(parser.parse_block()?)))
}

/// A stray `;` is only worth a warning.
pub fn parse_empty_stmt(parser: &mut Parser) -> PResult<Option<Node>> {
    let semi = parser.advance();
    parser.warn(ErrorCode::UnnecessarySemi, semi.span);
    Ok(None)
}
