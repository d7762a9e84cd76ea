use crate::Span;

use super::{
    expressions::{
        BooleanLiteral, CastExpression, DecimalLiteral, DictLiteral, FunctionCall, InfixExpression,
        IntegralLiteral, LambdaExpression, ListLiteral, MemberAccess, ObjectCreation,
        ParenthesizedExpression, PostfixExpression, PrefixExpression, StringLiteral,
        SymbolReference,
    },
    statements::{Block, IfStatement, LocalVariableDeclaration, ModuleDeclaration, UseStatement},
};

/// Node Kinds
///
/// One tag per concrete node type.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Root,
    ModuleDeclaration,
    UseStatement,
    LocalVariableDeclaration,
    VariableAssignment,
    Block,
    IfStatement,
    ConditionalBranch,
    Symbol,
    WildcardSymbol,
    TypeReference,

    IntegralLiteral,
    DecimalLiteral,
    StringLiteral,
    BooleanLiteral,
    SymbolReference,
    MemberAccess,
    FunctionCall,
    CallArgument,
    InfixExpression,
    PrefixExpression,
    PostfixExpression,
    CastExpression,
    ParenthesizedExpression,
    ListLiteral,
    DictLiteral,
    DictPair,
    LambdaExpression,
    LambdaParameter,
    ObjectCreation,
}

/// Behaviour shared by every node of the tree.
pub trait CodeNode {
    /// Returns the kind tag of the node.
    fn kind(&self) -> NodeKind;
    /// Returns the source range, `None` for synthesized nodes.
    fn source_range(&self) -> Option<&Span>;
    /// Whether the user actually wrote this node.
    fn is_visible_in_source(&self) -> bool {
        self.source_range().is_some()
    }
}

/// Implements `CodeNode` for structs carrying a `source_range` field.
macro_rules! impl_code_node {
    ($($node:ident),* $(,)?) => {
        $(
            impl $crate::ast::ast::CodeNode for $node {
                fn kind(&self) -> $crate::ast::ast::NodeKind {
                    $crate::ast::ast::NodeKind::$node
                }

                fn source_range(&self) -> Option<&$crate::Span> {
                    self.source_range.as_ref()
                }
            }
        )*
    };
}

pub(crate) use impl_code_node;

/// Anything that can appear in a statement list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Module(ModuleDeclaration),
    Use(UseStatement),
    LocalVariable(LocalVariableDeclaration),
    Block(Block),
    If(IfStatement),
    Expression(Expr),
}

impl CodeNode for Node {
    fn kind(&self) -> NodeKind {
        match self {
            Node::Module(node) => node.kind(),
            Node::Use(node) => node.kind(),
            Node::LocalVariable(node) => node.kind(),
            Node::Block(node) => node.kind(),
            Node::If(node) => node.kind(),
            Node::Expression(expr) => expr.kind(),
        }
    }

    fn source_range(&self) -> Option<&Span> {
        match self {
            Node::Module(node) => node.source_range(),
            Node::Use(node) => node.source_range(),
            Node::LocalVariable(node) => node.source_range(),
            Node::Block(node) => node.source_range(),
            Node::If(node) => node.source_range(),
            Node::Expression(expr) => expr.source_range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegralLiteral(IntegralLiteral),
    DecimalLiteral(DecimalLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    SymbolReference(SymbolReference),
    MemberAccess(MemberAccess),
    FunctionCall(FunctionCall),
    Infix(InfixExpression),
    Prefix(PrefixExpression),
    Postfix(PostfixExpression),
    Cast(CastExpression),
    Parenthesized(ParenthesizedExpression),
    List(ListLiteral),
    Dict(DictLiteral),
    Lambda(LambdaExpression),
    ObjectCreation(ObjectCreation),
}

impl Expr {
    fn as_code_node(&self) -> &dyn CodeNode {
        match self {
            Expr::IntegralLiteral(node) => node,
            Expr::DecimalLiteral(node) => node,
            Expr::StringLiteral(node) => node,
            Expr::BooleanLiteral(node) => node,
            Expr::SymbolReference(node) => node,
            Expr::MemberAccess(node) => node,
            Expr::FunctionCall(node) => node,
            Expr::Infix(node) => node,
            Expr::Prefix(node) => node,
            Expr::Postfix(node) => node,
            Expr::Cast(node) => node,
            Expr::Parenthesized(node) => node,
            Expr::List(node) => node,
            Expr::Dict(node) => node,
            Expr::Lambda(node) => node,
            Expr::ObjectCreation(node) => node,
        }
    }
}

impl CodeNode for Expr {
    fn kind(&self) -> NodeKind {
        self.as_code_node().kind()
    }

    fn source_range(&self) -> Option<&Span> {
        self.as_code_node().source_range()
    }
}
