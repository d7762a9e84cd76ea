use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("let", TokenKind::Let);
        map.insert("mod", TokenKind::Mod);
        map.insert("use", TokenKind::Use);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("func", TokenKind::Func);
        map.insert("class", TokenKind::Class);
        map.insert("new", TokenKind::New);
        map.insert("for", TokenKind::For);
        map.insert("foreach", TokenKind::Foreach);
        map.insert("while", TokenKind::While);
        map.insert("when", TokenKind::When);
        map.insert("break", TokenKind::Break);
        map.insert("from", TokenKind::From);
        map.insert("in", TokenKind::In);
        map.insert("is", TokenKind::Is);
        map.insert("nothing", TokenKind::Nothing);
        map.insert("as", TokenKind::As);
        map.insert("to", TokenKind::To);
        map.insert("yes", TokenKind::BoolYes);
        map.insert("no", TokenKind::BoolNo);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Invalid,
    Identifier,

    // Literals
    Integer,
    Float,
    Short,
    Long,
    Hex,
    String,
    TemplateString,
    BoolYes,
    BoolNo,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Comma,
    Colon,
    Semicolon,
    Tilde,
    Hash,
    At,
    Question,
    Arrow, // ->

    Assign,    // =
    Equals,    // ==
    Not,       // !
    NotEquals, // !=
    NotNull,   // !!

    Less,
    LessEquals,
    ShiftLeft,
    ShiftLeftAssign,
    Greater,
    GreaterEquals,
    ShiftRight,
    ShiftRightAssign,
    UnsignedShiftRight,
    UnsignedShiftRightAssign,

    Plus,
    PlusPlus,
    PlusAssign,
    Minus,
    MinusMinus,
    MinusAssign,
    Star,
    StarAssign,
    Power,       // **
    PowerAssign, // **=
    Slash,
    SlashAssign,
    Percent,
    PercentAssign,
    Caret,
    CaretAssign,
    Ampersand,
    AmpersandAssign,
    AndAnd,
    Pipe,
    PipeAssign,
    OrOr,

    Coalesce,       // ??
    CoalesceAssign, // ??=
    NullSafeDot,    // ?.

    Dot,
    DotDot,         // ..
    DotDotAssign,   // ..=
    Ellipsis,       // ...
    EllipsisAssign, // ...=

    // Reserved
    Let,
    Mod,
    Use,
    If,
    Elif,
    Else,
    Func,
    Class,
    New,
    For,
    Foreach,
    While,
    When,
    Break,
    From,
    In,
    Is,
    Nothing,
    As,
    To,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
            && !matches!(self, TokenKind::BoolYes | TokenKind::BoolNo)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Short
                | TokenKind::Long
                | TokenKind::Hex
                | TokenKind::String
                | TokenKind::TemplateString
                | TokenKind::BoolYes
                | TokenKind::BoolNo
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of file"),
            _ => write!(f, "`{}` ({})", self.lexeme, self.kind),
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
