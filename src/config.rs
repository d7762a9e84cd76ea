//! Parse session configuration.

use crate::lexer::tokens::TokenKind;

/// Tokens synchronization stops at unless the caller supplies its own set.
pub const DEFAULT_SYNC_POINTS: &[TokenKind] = &[
    TokenKind::Func,
    TokenKind::If,
    TokenKind::Elif,
    TokenKind::Else,
    TokenKind::For,
    TokenKind::Foreach,
    TokenKind::From,
    TokenKind::Mod,
    TokenKind::Use,
    TokenKind::While,
    TokenKind::Let,
    TokenKind::When,
    TokenKind::Class,
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
    TokenKind::EOF,
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Resynchronize and continue after recoverable errors instead of aborting.
    pub keep_going: bool,
    pub sync_points: Vec<TokenKind>,
    /// Machine names of diagnostic categories to silence.
    pub suppressed: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            keep_going: true,
            sync_points: DEFAULT_SYNC_POINTS.to_vec(),
            suppressed: vec![],
        }
    }
}

impl ParseOptions {
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn with_sync_points(mut self, sync_points: Vec<TokenKind>) -> Self {
        self.sync_points = sync_points;
        self
    }

    pub fn with_suppressed(mut self, machine_name: impl Into<String>) -> Self {
        self.suppressed.push(machine_name.into());
        self
    }

    pub fn is_sync_point(&self, kind: TokenKind) -> bool {
        self.sync_points.contains(&kind)
    }
}
