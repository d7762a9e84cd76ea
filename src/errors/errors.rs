use std::{fmt::Display, ops::Range};

use thiserror::Error;

use crate::Span;

/// How bad a diagnostic is. Ordered from harmless to parse-ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Letter used in the `PZ?0000` code of a rendered diagnostic.
    pub fn letter(&self) -> char {
        match self {
            Severity::Note => 'N',
            Severity::Warning => 'W',
            Severity::Error | Severity::Fatal => 'E',
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ParserUnexpected,
    LexerUnexpected,
    MissingSeparator,
    Unnecessary,
    Internal,
}

impl ErrorCategory {
    /// Name used to silence the category, as in `-Wno-parser.unnecessary`.
    pub fn machine_name(&self) -> &'static str {
        match self {
            ErrorCategory::ParserUnexpected => "parser.unexpected",
            ErrorCategory::LexerUnexpected => "lexer.unexpected",
            ErrorCategory::MissingSeparator => "parser.missingSeparator",
            ErrorCategory::Unnecessary => "parser.unnecessary",
            ErrorCategory::Internal => "pretzel.internal",
        }
    }

    pub fn suppressable(&self) -> bool {
        matches!(self, ErrorCategory::Unnecessary)
    }
}

/// Every diagnostic the front end can emit.
///
/// The numeric code of a diagnostic is its declaration order, so new codes
/// go right before `Asserted`, which stays last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ExpectedNsName,
    ExpectedId,
    ExpectedSemi,
    UnexpectedEof,
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
    InvalidHexLiteral,
    ExpectedValue,
    ExpectedClosingParen,
    ExpectedListEnd,
    ExpectedBlockStart,
    ExpectedBlockEnd,
    ExpectedDictBrace,
    ExpectedDictColon,
    ExpectedLambdaParameter,
    ExpectedLambdaArrow,
    ExpectedType,
    WildcardNotAllowed,
    IntegerOutOfRange,
    UnexpectedToken,
    UnnecessarySemi,
    UnnecessaryColonInParameter,
    NestingTooDeep,
    Asserted,
}

impl ErrorCode {
    pub fn number(&self) -> u16 {
        *self as u16
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ExpectedNsName => "expected a namespace name",
            ErrorCode::ExpectedId => "expected an identifier",
            ErrorCode::ExpectedSemi => "expected ';' after statement",
            ErrorCode::UnexpectedEof => "unexpected end of file",
            ErrorCode::UnexpectedCharacter => "unexpected character",
            ErrorCode::UnterminatedString => "unterminated string literal",
            ErrorCode::UnterminatedComment => "unterminated block comment",
            ErrorCode::InvalidHexLiteral => "hex literal has no digits",
            ErrorCode::ExpectedValue => "expected a value",
            ErrorCode::ExpectedClosingParen => "expected ')'",
            ErrorCode::ExpectedListEnd => "expected ']' to close the list",
            ErrorCode::ExpectedBlockStart => "expected '{' to open a block",
            ErrorCode::ExpectedBlockEnd => "expected '}' to close the block",
            ErrorCode::ExpectedDictBrace => "expected '{' after 'dict'",
            ErrorCode::ExpectedDictColon => "expected ':' between dict key and value",
            ErrorCode::ExpectedLambdaParameter => "expected a lambda parameter name",
            ErrorCode::ExpectedLambdaArrow => "expected '->' after lambda parameters",
            ErrorCode::ExpectedType => "expected a type",
            ErrorCode::WildcardNotAllowed => "a wildcard is not allowed here",
            ErrorCode::IntegerOutOfRange => "integer literal does not fit its type",
            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::UnnecessarySemi => "unnecessary ';'",
            ErrorCode::UnnecessaryColonInParameter => "unnecessary ':' between parameter name and type",
            ErrorCode::NestingTooDeep => "nesting is too deep",
            ErrorCode::Asserted => "internal parser error",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::UnexpectedCharacter
            | ErrorCode::UnterminatedString
            | ErrorCode::UnterminatedComment
            | ErrorCode::InvalidHexLiteral => ErrorCategory::LexerUnexpected,
            ErrorCode::ExpectedSemi
            | ErrorCode::ExpectedClosingParen
            | ErrorCode::ExpectedListEnd
            | ErrorCode::ExpectedBlockEnd
            | ErrorCode::ExpectedDictColon
            | ErrorCode::ExpectedLambdaArrow => ErrorCategory::MissingSeparator,
            ErrorCode::UnnecessarySemi | ErrorCode::UnnecessaryColonInParameter => {
                ErrorCategory::Unnecessary
            }
            ErrorCode::Asserted => ErrorCategory::Internal,
            _ => ErrorCategory::ParserUnexpected,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::UnnecessarySemi | ErrorCode::UnnecessaryColonInParameter => {
                Severity::Warning
            }
            ErrorCode::Asserted => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Mnemonic for the code, e.g. `EXPECTED_SEMI`.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::ExpectedNsName => "EXPECTED_NSNAME",
            ErrorCode::ExpectedId => "EXPECTED_ID",
            ErrorCode::ExpectedSemi => "EXPECTED_SEMI",
            ErrorCode::UnexpectedEof => "UNEXPECTED_EOF",
            ErrorCode::UnexpectedCharacter => "UNEXPECTED_CHARACTER",
            ErrorCode::UnterminatedString => "UNTERMINATED_STRING",
            ErrorCode::UnterminatedComment => "UNTERMINATED_COMMENT",
            ErrorCode::InvalidHexLiteral => "INVALID_HEX_LITERAL",
            ErrorCode::ExpectedValue => "EXPECTED_VALUE",
            ErrorCode::ExpectedClosingParen => "EXPECTED_CLOSING_PAREN",
            ErrorCode::ExpectedListEnd => "EXPECTED_LIST_END",
            ErrorCode::ExpectedBlockStart => "EXPECTED_BLOCK_START",
            ErrorCode::ExpectedBlockEnd => "EXPECTED_BLOCK_END",
            ErrorCode::ExpectedDictBrace => "EXPECTED_DICT_BRACE",
            ErrorCode::ExpectedDictColon => "EXPECTED_DICT_COLON",
            ErrorCode::ExpectedLambdaParameter => "EXPECTED_LAMBDA_PARAMETER",
            ErrorCode::ExpectedLambdaArrow => "EXPECTED_LAMBDA_ARROW",
            ErrorCode::ExpectedType => "EXPECTED_TYPE",
            ErrorCode::WildcardNotAllowed => "WILDCARD_NOT_ALLOWED",
            ErrorCode::IntegerOutOfRange => "INTEGER_OUT_OF_RANGE",
            ErrorCode::UnexpectedToken => "UNEXPECTED_TOKEN",
            ErrorCode::UnnecessarySemi => "UNNECESSARY_SEMI",
            ErrorCode::UnnecessaryColonInParameter => "UNNECESSARY_COLON_IN_PARAMETER",
            ErrorCode::NestingTooDeep => "NESTING_TOO_DEEP",
            ErrorCode::Asserted => "ASSERTED",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Why a parse session ended without producing a tree.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("tokenization reported {errors} error(s)")]
    Lexical { errors: usize },
    #[error("parse aborted on {code} at {}:{}", .span.start.file, .span.start)]
    Aborted {
        code: ErrorCode,
        span: Span,
        consumed: Range<usize>,
    },
    #[error("could not synchronize after {code} at {}:{}", .span.start.file, .span.start)]
    CannotSync {
        code: ErrorCode,
        span: Span,
        consumed: Range<usize>,
    },
    #[error("internal parser error {code} at {}:{}\n{state}", .span.start.file, .span.start)]
    Internal {
        code: ErrorCode,
        span: Span,
        state: String,
    },
    #[error("token stream exhausted: position {position} of {len}")]
    EndOfStream { position: usize, len: usize },
}

impl ParseError {
    /// The diagnostic that caused the failure, if there was a single one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ParseError::Aborted { code, .. }
            | ParseError::CannotSync { code, .. }
            | ParseError::Internal { code, .. } => Some(*code),
            ParseError::Lexical { .. } | ParseError::EndOfStream { .. } => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::Internal { .. } | ParseError::EndOfStream { .. }
        )
    }
}
