/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds, the CodeNode trait and the Node/Expr sum types
/// - expressions: Definitions for the expression nodes and their operators
/// - statements: Definitions for declarations, statements and symbol paths
/// - types: Type references as written in source
/// - visit: Visitor trait with default traversal
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visit;
