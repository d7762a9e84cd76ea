//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a token stream into
//! the tree rooted at [`Root`](crate::ast::statements::Root). It uses a
//! Pratt parser for expressions with operator precedence and handles:
//!
//! - Statement parsing (`mod`, `use`, `let`, `if`, blocks)
//! - Expression parsing (operators, calls, member chains, literals, lambdas)
//! - Type parsing for annotations and casts
//! - Error recovery by synchronization
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
mod stack;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
