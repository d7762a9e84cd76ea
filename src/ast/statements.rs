use crate::Span;

use super::{
    ast::{impl_code_node, Expr, Node},
    expressions::SymbolReference,
    types::TypeReference,
};

/// The whole parsed source.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub nodes: Vec<Node>,
    pub source_range: Option<Span>,
}

/// A dotted path such as `std.io.File`.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub parts: Vec<SymbolReference>,
    pub source_range: Option<Span>,
}

impl Symbol {
    /// The path joined back with dots.
    pub fn path(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A path ending in `.*`, only legal as a `use` target.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardSymbol {
    pub base: Symbol,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDeclaration {
    pub name: Symbol,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UseTarget {
    Symbol(Symbol),
    Wildcard(WildcardSymbol),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseStatement {
    pub target: UseTarget,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableAssignment {
    pub target: SymbolReference,
    pub value: Expr,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableDeclaration {
    pub name: SymbolReference,
    pub type_annotation: Option<TypeReference>,
    pub assignment: Option<VariableAssignment>,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub nodes: Vec<Node>,
    pub source_range: Option<Span>,
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body: Block,
    pub source_range: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub branches: Vec<ConditionalBranch>,
    pub otherwise: Option<Block>,
    pub source_range: Option<Span>,
}

impl_code_node!(
    Root,
    Symbol,
    WildcardSymbol,
    ModuleDeclaration,
    UseStatement,
    VariableAssignment,
    LocalVariableDeclaration,
    Block,
    ConditionalBranch,
    IfStatement,
);
