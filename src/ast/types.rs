use std::fmt::Display;

use crate::Span;

use super::{ast::impl_code_node, statements::Symbol};

/// A type as written in source: a symbol path plus `[]` array dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub path: Symbol,
    pub dimensions: usize,
    pub source_range: Option<Span>,
}

impl TypeReference {
    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }
}

impl Display for TypeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.path.path(), "[]".repeat(self.dimensions))
    }
}

impl_code_node!(TypeReference);
