//! Lexical analysis.
//!
//! This module turns source text into tokens and wraps them for parsing:
//!
//! - Tokenization with greedy operator matching and line/column tracking
//! - Keyword, identifier, numeric and string literal recognition
//! - The `TokenStream` cursor used by the parser for lookahead and rollback

pub mod lexer;
pub mod stream;
pub mod tokens;
