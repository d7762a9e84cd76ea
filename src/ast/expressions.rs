use crate::Span;

use super::{
    ast::{impl_code_node, Expr},
    statements::{Block, Symbol},
    types::TypeReference,
};

/// Width an integral literal was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerWidth {
    Short,
    Int,
    Long,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegralLiteral {
    pub value: i64,
    pub width: IntegerWidth,
    /// 10 or 16, depending on how the literal was spelled.
    pub radix: u32,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecimalLiteral {
    pub value: f64,
    pub source_range: Option<Span>,
}

/// String or template literal, stored verbatim without escape processing.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: Vec<u8>,
    pub template: bool,
    pub source_range: Option<Span>,
}

impl StringLiteral {
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolReference {
    pub name: String,
    pub source_range: Option<Span>,
}

impl SymbolReference {
    /// A reference the compiler made up rather than read from source.
    pub fn synthesized(name: impl Into<String>) -> Self {
        SymbolReference {
            name: name.into(),
            source_range: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOperator {
    Classic,  // .
    Chaining, // ..
    NullSafe, // ?.
}

impl MemberOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberOperator::Classic => ".",
            MemberOperator::Chaining => "..",
            MemberOperator::NullSafe => "?.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub source: Box<Expr>,
    pub accessor: SymbolReference,
    pub operator: MemberOperator,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallArgument {
    pub value: Expr,
    pub name: Option<SymbolReference>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callable: Box<Expr>,
    pub arguments: Vec<CallArgument>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Plus,
    Minus,
    Mod,
    Mul,
    Div,
    And,
    BitAnd,
    Or,
    BitOr,
    Xor,
    Pow,
    Coalesce,
    Concat,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,

    Assign,
    PlusAssign,
    MinusAssign,
    ModAssign,
    MulAssign,
    DivAssign,
    BitAndAssign,
    BitOrAssign,
    XorAssign,
    PowAssign,
    CoalesceAssign,
    ConcatAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    UnsignedShiftRightAssign,
}

impl InfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Mod => "%",
            InfixOperator::Mul => "*",
            InfixOperator::Div => "/",
            InfixOperator::And => "&&",
            InfixOperator::BitAnd => "&",
            InfixOperator::Or => "||",
            InfixOperator::BitOr => "|",
            InfixOperator::Xor => "^",
            InfixOperator::Pow => "**",
            InfixOperator::Coalesce => "??",
            InfixOperator::Concat => "...",
            InfixOperator::ShiftLeft => "<<",
            InfixOperator::ShiftRight => ">>",
            InfixOperator::UnsignedShiftRight => ">>>",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::LessEquals => "<=",
            InfixOperator::GreaterEquals => ">=",
            InfixOperator::Equals => "==",
            InfixOperator::NotEquals => "!=",
            InfixOperator::Assign => "=",
            InfixOperator::PlusAssign => "+=",
            InfixOperator::MinusAssign => "-=",
            InfixOperator::ModAssign => "%=",
            InfixOperator::MulAssign => "*=",
            InfixOperator::DivAssign => "/=",
            InfixOperator::BitAndAssign => "&=",
            InfixOperator::BitOrAssign => "|=",
            InfixOperator::XorAssign => "^=",
            InfixOperator::PowAssign => "**=",
            InfixOperator::CoalesceAssign => "??=",
            InfixOperator::ConcatAssign => "...=",
            InfixOperator::ShiftLeftAssign => "<<=",
            InfixOperator::ShiftRightAssign => ">>=",
            InfixOperator::UnsignedShiftRightAssign => ">>>=",
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            InfixOperator::Assign
                | InfixOperator::PlusAssign
                | InfixOperator::MinusAssign
                | InfixOperator::ModAssign
                | InfixOperator::MulAssign
                | InfixOperator::DivAssign
                | InfixOperator::BitAndAssign
                | InfixOperator::BitOrAssign
                | InfixOperator::XorAssign
                | InfixOperator::PowAssign
                | InfixOperator::CoalesceAssign
                | InfixOperator::ConcatAssign
                | InfixOperator::ShiftLeftAssign
                | InfixOperator::ShiftRightAssign
                | InfixOperator::UnsignedShiftRightAssign
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub operator: InfixOperator,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Increment,  // ++
    Decrement,  // --
    Plus,       // +
    Minus,      // -
    Not,        // !
    DoubleNot,  // !!
    Complement, // ~
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Increment => "++",
            PrefixOperator::Decrement => "--",
            PrefixOperator::Plus => "+",
            PrefixOperator::Minus => "-",
            PrefixOperator::Not => "!",
            PrefixOperator::DoubleNot => "!!",
            PrefixOperator::Complement => "~",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub target: Box<Expr>,
    pub operator: PrefixOperator,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment, // ++
    Decrement, // --
    NotNull,   // !!
}

impl PostfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
            PostfixOperator::NotNull => "!!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpression {
    pub target: Box<Expr>,
    pub operator: PostfixOperator,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOperator {
    As,
    To,
}

impl CastOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            CastOperator::As => "as",
            CastOperator::To => "to",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
    pub source: Box<Expr>,
    pub target: TypeReference,
    pub operator: CastOperator,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression {
    pub inner: Box<Expr>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListLiteral {
    pub items: Vec<Expr>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictPair {
    pub key: Expr,
    pub value: Expr,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictLiteral {
    pub pairs: Vec<DictPair>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaParameter {
    pub name: SymbolReference,
    pub type_annotation: Option<TypeReference>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Block(Block),
    Expression(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    pub parameters: Vec<LambdaParameter>,
    pub body: LambdaBody,
    pub source_range: Option<Span>,
}

/// `new some.Class(args)`. Only the shape is recorded, nothing is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreation {
    pub class: Symbol,
    pub arguments: Vec<CallArgument>,
    pub source_range: Option<Span>,
}

impl_code_node!(
    IntegralLiteral,
    DecimalLiteral,
    StringLiteral,
    BooleanLiteral,
    SymbolReference,
    MemberAccess,
    CallArgument,
    FunctionCall,
    InfixExpression,
    PrefixExpression,
    PostfixExpression,
    CastExpression,
    ParenthesizedExpression,
    ListLiteral,
    DictPair,
    DictLiteral,
    LambdaParameter,
    LambdaExpression,
    ObjectCreation,
);
