//! Diagnostics for the front end.
//!
//! This module defines:
//!
//! - The fixed taxonomy of error codes, categories and severities
//! - `ParseError`, the typed failure a parse session can end with
//! - The `Reporter` that counts, orders and renders diagnostics

pub mod errors;
pub mod reporter;
