use tracing::trace;

use crate::{
    ast::{
        ast::{CodeNode, Expr},
        expressions::{
            BooleanLiteral, CallArgument, CastExpression, CastOperator, DecimalLiteral, DictLiteral,
            DictPair, FunctionCall, InfixExpression, InfixOperator, IntegerWidth, IntegralLiteral,
            LambdaBody, LambdaExpression, LambdaParameter, ListLiteral, MemberAccess,
            MemberOperator, ObjectCreation, ParenthesizedExpression, PostfixExpression,
            PostfixOperator, PrefixExpression, PrefixOperator, StringLiteral, SymbolReference,
        },
    },
    errors::errors::ErrorCode,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    lookups::BindingPower,
    parser::{PResult, Parser},
    stack::ensure_sufficient_stack,
    types::{parse_symbol_path, parse_type},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> PResult<Expr> {
    ensure_sufficient_stack(|| {
        parser.enter_nesting()?;
        let expr = parse_operators(parser, bp);
        parser.leave_nesting();
        expr
    })
}

fn parse_operators(parser: &mut Parser, bp: BindingPower) -> PResult<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let code = if token_kind == TokenKind::EOF {
            ErrorCode::UnexpectedEof
        } else {
            ErrorCode::ExpectedValue
        };
        return Err(parser.fail(code));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep folding it into lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        let power = parser.current_binding_power();
        left = led(parser, left, power)?;
    }

    Ok(left)
}

fn symbol_reference(token: Token) -> SymbolReference {
    SymbolReference {
        name: token.lexeme,
        source_range: Some(token.span),
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let operator = match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Percent => InfixOperator::Mod,
        TokenKind::Star => InfixOperator::Mul,
        TokenKind::Slash => InfixOperator::Div,
        TokenKind::AndAnd => InfixOperator::And,
        TokenKind::Ampersand => InfixOperator::BitAnd,
        TokenKind::OrOr => InfixOperator::Or,
        TokenKind::Pipe => InfixOperator::BitOr,
        TokenKind::Caret => InfixOperator::Xor,
        TokenKind::Power => InfixOperator::Pow,
        TokenKind::Coalesce => InfixOperator::Coalesce,
        TokenKind::Ellipsis => InfixOperator::Concat,
        TokenKind::ShiftLeft => InfixOperator::ShiftLeft,
        TokenKind::ShiftRight => InfixOperator::ShiftRight,
        TokenKind::UnsignedShiftRight => InfixOperator::UnsignedShiftRight,
        TokenKind::Less => InfixOperator::Less,
        TokenKind::Greater => InfixOperator::Greater,
        TokenKind::LessEquals => InfixOperator::LessEquals,
        TokenKind::GreaterEquals => InfixOperator::GreaterEquals,
        TokenKind::Equals => InfixOperator::Equals,
        TokenKind::NotEquals => InfixOperator::NotEquals,
        TokenKind::Assign => InfixOperator::Assign,
        TokenKind::PlusAssign => InfixOperator::PlusAssign,
        TokenKind::MinusAssign => InfixOperator::MinusAssign,
        TokenKind::PercentAssign => InfixOperator::ModAssign,
        TokenKind::StarAssign => InfixOperator::MulAssign,
        TokenKind::SlashAssign => InfixOperator::DivAssign,
        TokenKind::AmpersandAssign => InfixOperator::BitAndAssign,
        TokenKind::PipeAssign => InfixOperator::BitOrAssign,
        TokenKind::CaretAssign => InfixOperator::XorAssign,
        TokenKind::PowerAssign => InfixOperator::PowAssign,
        TokenKind::CoalesceAssign => InfixOperator::CoalesceAssign,
        TokenKind::EllipsisAssign => InfixOperator::ConcatAssign,
        TokenKind::ShiftLeftAssign => InfixOperator::ShiftLeftAssign,
        TokenKind::ShiftRightAssign => InfixOperator::ShiftRightAssign,
        TokenKind::UnsignedShiftRightAssign => InfixOperator::UnsignedShiftRightAssign,
        _ => return None,
    };

    Some(operator)
}

fn fold_infix(parser: &mut Parser, left: Expr, operator: InfixOperator, right_bp: BindingPower) -> PResult<Expr> {
    let right = parse_expr(parser, right_bp)?;
    let source_range = parser.span_since(left.source_range());

    Ok(Expr::Infix(InfixExpression {
        left: Box::new(left),
        right: Box::new(right),
        operator,
        source_range,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> PResult<Expr> {
    let operator_token = parser.advance();
    let Some(operator) = infix_operator(operator_token.kind) else {
        return Err(parser.asserted(format!("{} is registered as a binary operator", operator_token)));
    };

    // `**` is the only right associative binary operator
    let right_bp = if operator == InfixOperator::Pow { bp.lower() } else { bp };
    fold_infix(parser, left, operator, right_bp)
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> PResult<Expr> {
    let operator_token = parser.advance();
    let Some(operator) = infix_operator(operator_token.kind).filter(InfixOperator::is_assignment) else {
        return Err(parser.asserted(format!("{} is registered as an assignment", operator_token)));
    };

    fold_infix(parser, left, operator, bp.lower())
}

pub fn parse_cast_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> PResult<Expr> {
    let operator = match parser.advance().kind {
        TokenKind::To => CastOperator::To,
        _ => CastOperator::As,
    };
    let target = parse_type(parser)?;

    Ok(Expr::Cast(CastExpression {
        source_range: parser.span_since(left.source_range()),
        source: Box::new(left),
        target,
        operator,
    }))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> PResult<Expr> {
    let operator = match parser.advance().kind {
        TokenKind::PlusPlus => PostfixOperator::Increment,
        TokenKind::MinusMinus => PostfixOperator::Decrement,
        _ => PostfixOperator::NotNull,
    };

    Ok(Expr::Postfix(PostfixExpression {
        source_range: parser.span_since(left.source_range()),
        target: Box::new(left),
        operator,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> PResult<Expr> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::PlusPlus => PrefixOperator::Increment,
        TokenKind::MinusMinus => PrefixOperator::Decrement,
        TokenKind::Plus => PrefixOperator::Plus,
        TokenKind::Minus => PrefixOperator::Minus,
        TokenKind::Not => PrefixOperator::Not,
        TokenKind::NotNull => PrefixOperator::DoubleNot,
        _ => PrefixOperator::Complement,
    };
    let target = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpression {
        target: Box::new(target),
        operator,
        source_range: Some(parser.span_from(&operator_token.span)),
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> PResult<Expr> {
    let operator = match parser.advance().kind {
        TokenKind::DotDot => MemberOperator::Chaining,
        TokenKind::NullSafeDot => MemberOperator::NullSafe,
        _ => MemberOperator::Classic,
    };
    let accessor = symbol_reference(parser.expect(TokenKind::Identifier, ErrorCode::ExpectedId)?);

    Ok(Expr::MemberAccess(MemberAccess {
        source_range: parser.span_since(left.source_range()),
        source: Box::new(left),
        accessor,
        operator,
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> PResult<Expr> {
    parser.advance();
    let arguments = parse_arguments(parser)?;

    Ok(Expr::FunctionCall(FunctionCall {
        source_range: parser.span_since(left.source_range()),
        callable: Box::new(left),
        arguments,
    }))
}

/// Parses a comma separated argument list. The `(` is already consumed.
fn parse_arguments(parser: &mut Parser) -> PResult<Vec<CallArgument>> {
    let mut arguments = vec![];

    if parser.accept_if_next(&[TokenKind::CloseParen]) {
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_call_argument(parser)?);

        if !parser.accept_if_next(&[TokenKind::Comma]) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, ErrorCode::ExpectedClosingParen)?;
    Ok(arguments)
}

/// Probes for `IDENT ":"` and rolls the cursor back either way.
fn is_named_argument(parser: &mut Parser) -> bool {
    let start = parser.position();
    let named = parser.accept_if_next(&[TokenKind::Identifier]) && parser.is_next(&[TokenKind::Colon]);
    parser.set_position(start);

    trace!(target: "pretzel::parser", position = start, named, "named argument lookahead");
    named
}

fn parse_call_argument(parser: &mut Parser) -> PResult<CallArgument> {
    let start = parser.current_token().span.clone();

    let name = if is_named_argument(parser) {
        let name = parser.accept_asserted(TokenKind::Identifier)?;
        parser.accept_asserted(TokenKind::Colon)?;
        Some(symbol_reference(name))
    } else {
        None
    };
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(CallArgument {
        value,
        name,
        source_range: Some(parser.span_from(&start)),
    })
}

pub fn parse_integral_expr(parser: &mut Parser) -> PResult<Expr> {
    let token = parser.advance();

    let (parsed, width, radix) = match token.kind {
        TokenKind::Short => (token.lexeme.parse::<i16>().ok().map(i64::from), IntegerWidth::Short, 10),
        TokenKind::Long => (token.lexeme.parse::<i64>().ok(), IntegerWidth::Long, 10),
        TokenKind::Hex => {
            let digits = token.lexeme.get(2..).unwrap_or_default();
            let parsed = i64::from_str_radix(digits, 16).ok();
            let width = match parsed {
                Some(value) if i32::try_from(value).is_err() => IntegerWidth::Long,
                _ => IntegerWidth::Int,
            };
            (parsed, width, 16)
        }
        _ => (token.lexeme.parse::<i32>().ok().map(i64::from), IntegerWidth::Int, 10),
    };

    let value = match parsed {
        Some(value) => value,
        None => {
            parser.soft_error(
                ErrorCode::IntegerOutOfRange,
                token.span.clone(),
                format!("`{}`", token.span.text),
            )?;
            0
        }
    };

    Ok(Expr::IntegralLiteral(IntegralLiteral {
        value,
        width,
        radix,
        source_range: Some(token.span),
    }))
}

pub fn parse_primary_expr(parser: &mut Parser) -> PResult<Expr> {
    let token = parser.advance();
    let source_range = Some(token.span);

    match token.kind {
        TokenKind::Float => Ok(Expr::DecimalLiteral(DecimalLiteral {
            value: token.lexeme.parse().unwrap_or_default(),
            source_range,
        })),
        TokenKind::String | TokenKind::TemplateString => Ok(Expr::StringLiteral(StringLiteral {
            template: token.kind == TokenKind::TemplateString,
            value: token.lexeme.into_bytes(),
            source_range,
        })),
        TokenKind::BoolYes | TokenKind::BoolNo => Ok(Expr::BooleanLiteral(BooleanLiteral {
            value: token.kind == TokenKind::BoolYes,
            source_range,
        })),
        kind => Err(parser.asserted(format!("{} has no literal form", kind))),
    }
}

pub fn parse_symbol_expr(parser: &mut Parser) -> PResult<Expr> {
    if parser.current_token().lexeme == "dict" && parser.peek_kind(1) == TokenKind::OpenCurly {
        let start = parser.advance().span;
        return parse_dict_body(parser, start);
    }

    let token = parser.accept_asserted(TokenKind::Identifier)?;
    Ok(Expr::SymbolReference(symbol_reference(token)))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> PResult<Expr> {
    let open = parser.advance();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, ErrorCode::ExpectedClosingParen)?;

    Ok(Expr::Parenthesized(ParenthesizedExpression {
        inner: Box::new(inner),
        source_range: Some(parser.span_from(&open.span)),
    }))
}

pub fn parse_list_expr(parser: &mut Parser) -> PResult<Expr> {
    let open = parser.advance();
    let mut items = vec![];

    while !parser.is_next(&[TokenKind::CloseBracket]) {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if !parser.accept_if_next(&[TokenKind::Comma]) {
            break;
        }
    }

    parser.expect(TokenKind::CloseBracket, ErrorCode::ExpectedListEnd)?;

    Ok(Expr::List(ListLiteral {
        items,
        source_range: Some(parser.span_from(&open.span)),
    }))
}

/// `{` in expression position always opens a dict, `{}` included.
pub fn parse_dict_expr(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.current_token().span.clone();
    parse_dict_body(parser, start)
}

fn parse_dict_body(parser: &mut Parser, start: Span) -> PResult<Expr> {
    parser.expect(TokenKind::OpenCurly, ErrorCode::ExpectedDictBrace)?;
    let mut pairs = vec![];

    while !parser.is_next(&[TokenKind::CloseCurly]) {
        let key = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Colon, ErrorCode::ExpectedDictColon)?;
        let value = parse_expr(parser, BindingPower::Default)?;

        pairs.push(DictPair {
            source_range: parser.span_since(key.source_range()),
            key,
            value,
        });

        if !parser.accept_if_next(&[TokenKind::Comma]) {
            break;
        }
    }

    parser.expect(TokenKind::CloseCurly, ErrorCode::ExpectedBlockEnd)?;

    Ok(Expr::Dict(DictLiteral {
        pairs,
        source_range: Some(parser.span_from(&start)),
    }))
}

/// `: a, b int -> body`
pub fn parse_lambda_expr(parser: &mut Parser) -> PResult<Expr> {
    let colon = parser.advance();
    let mut parameters = vec![];

    if !parser.is_next(&[TokenKind::Arrow]) {
        loop {
            parameters.push(parse_lambda_parameter(parser)?);

            if !parser.accept_if_next(&[TokenKind::Comma]) {
                break;
            }
        }
    }

    parser.expect(TokenKind::Arrow, ErrorCode::ExpectedLambdaArrow)?;

    let body = if parser.is_next(&[TokenKind::OpenCurly]) {
        LambdaBody::Block(parser.parse_block()?)
    } else {
        LambdaBody::Expression(Box::new(parse_expr(parser, BindingPower::Default)?))
    };

    Ok(Expr::Lambda(LambdaExpression {
        parameters,
        body,
        source_range: Some(parser.span_from(&colon.span)),
    }))
}

fn parse_lambda_parameter(parser: &mut Parser) -> PResult<LambdaParameter> {
    let name = parser.expect(TokenKind::Identifier, ErrorCode::ExpectedLambdaParameter)?;

    let type_annotation = if parser.is_next(&[TokenKind::Colon]) {
        let colon = parser.advance();
        parser.warn(ErrorCode::UnnecessaryColonInParameter, colon.span);
        Some(parse_type(parser)?)
    } else if parser.is_next(&[TokenKind::Identifier]) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    Ok(LambdaParameter {
        source_range: Some(parser.span_from(&name.span)),
        name: symbol_reference(name),
        type_annotation,
    })
}

pub fn parse_object_creation_expr(parser: &mut Parser) -> PResult<Expr> {
    let start = parser.advance();

    let (class, wildcard) = parse_symbol_path(parser, ErrorCode::ExpectedId)?;
    if let Some(star) = wildcard {
        parser.soft_error(ErrorCode::WildcardNotAllowed, star, String::new())?;
    }

    parser.expect(TokenKind::OpenParen, ErrorCode::UnexpectedToken)?;
    let arguments = parse_arguments(parser)?;

    Ok(Expr::ObjectCreation(ObjectCreation {
        class,
        arguments,
        source_range: Some(parser.span_from(&start.span)),
    }))
}
