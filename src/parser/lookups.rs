use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Node},
    lexer::tokens::TokenKind,
};

use super::{
    expr::*,
    parser::{PResult, Parser},
    stmt::*,
};

/// Operator precedence, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Power,
    Cast,
    Prefix,
    Postfix,
    Call,
    Member,
    Primary,
}

impl BindingPower {
    /// The level just below this one. Right-associative operators parse
    /// their right operand at this level so an equal operator still binds.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Default | BindingPower::Assignment => BindingPower::Default,
            BindingPower::Coalesce => BindingPower::Assignment,
            BindingPower::LogicalOr => BindingPower::Coalesce,
            BindingPower::LogicalAnd => BindingPower::LogicalOr,
            BindingPower::BitwiseOr => BindingPower::LogicalAnd,
            BindingPower::BitwiseXor => BindingPower::BitwiseOr,
            BindingPower::BitwiseAnd => BindingPower::BitwiseXor,
            BindingPower::Equality => BindingPower::BitwiseAnd,
            BindingPower::Relational => BindingPower::Equality,
            BindingPower::Shift => BindingPower::Relational,
            BindingPower::Additive => BindingPower::Shift,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Power => BindingPower::Multiplicative,
            BindingPower::Cast => BindingPower::Power,
            BindingPower::Prefix => BindingPower::Cast,
            BindingPower::Postfix => BindingPower::Prefix,
            BindingPower::Call => BindingPower::Postfix,
            BindingPower::Member => BindingPower::Call,
            BindingPower::Primary => BindingPower::Member,
        }
    }
}

/// `None` means the statement produced no node, as for a stray `;`.
pub type StmtHandler = fn(&mut Parser<'_>) -> PResult<Option<Node>>;
pub type NUDHandler = fn(&mut Parser<'_>) -> PResult<Expr>;
pub type LEDHandler = fn(&mut Parser<'_>, Expr, BindingPower) -> PResult<Expr>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Assignment, right associative
    for kind in [
        TokenKind::Assign,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::PercentAssign,
        TokenKind::StarAssign,
        TokenKind::SlashAssign,
        TokenKind::AmpersandAssign,
        TokenKind::PipeAssign,
        TokenKind::CaretAssign,
        TokenKind::PowerAssign,
        TokenKind::CoalesceAssign,
        TokenKind::EllipsisAssign,
        TokenKind::ShiftLeftAssign,
        TokenKind::ShiftRightAssign,
        TokenKind::UnsignedShiftRightAssign,
    ] {
        parser.led(kind, BindingPower::Assignment, parse_assignment_expr);
    }

    parser.led(TokenKind::Coalesce, BindingPower::Coalesce, parse_binary_expr);

    // Logical
    parser.led(TokenKind::OrOr, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::AndAnd, BindingPower::LogicalAnd, parse_binary_expr);

    // Bitwise
    parser.led(TokenKind::Pipe, BindingPower::BitwiseOr, parse_binary_expr);
    parser.led(TokenKind::Caret, BindingPower::BitwiseXor, parse_binary_expr);
    parser.led(TokenKind::Ampersand, BindingPower::BitwiseAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Shift
    parser.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);
    parser.led(TokenKind::UnsignedShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Minus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Ellipsis, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Power, BindingPower::Power, parse_binary_expr);

    parser.led(TokenKind::As, BindingPower::Cast, parse_cast_expr);
    parser.led(TokenKind::To, BindingPower::Cast, parse_cast_expr);

    // Postfix, call and member chain
    parser.led(TokenKind::PlusPlus, BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::MinusMinus, BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::NotNull, BindingPower::Postfix, parse_postfix_expr);
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::DotDot, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::NullSafeDot, BindingPower::Member, parse_member_expr);

    // Literals and symbols
    for kind in [TokenKind::Integer, TokenKind::Short, TokenKind::Long, TokenKind::Hex] {
        parser.nud(kind, parse_integral_expr);
    }
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::TemplateString, parse_primary_expr);
    parser.nud(TokenKind::BoolYes, parse_primary_expr);
    parser.nud(TokenKind::BoolNo, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_list_expr);
    parser.nud(TokenKind::OpenCurly, parse_dict_expr);
    parser.nud(TokenKind::Colon, parse_lambda_expr);
    parser.nud(TokenKind::New, parse_object_creation_expr);

    // Prefix
    for kind in [
        TokenKind::PlusPlus,
        TokenKind::MinusMinus,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Not,
        TokenKind::NotNull,
        TokenKind::Tilde,
    ] {
        parser.nud(kind, parse_prefix_expr);
    }

    // Statements
    parser.stmt(TokenKind::Mod, parse_module_stmt);
    parser.stmt(TokenKind::Use, parse_use_stmt);
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
