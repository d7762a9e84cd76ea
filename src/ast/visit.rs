//! AST Visitor Pattern
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! descends into the children. Override a `visit_*` method to act on one
//! node kind and call the `walk_*` function to keep descending.
//!
//! Dispatch over `Node` and `Expr` is an exhaustive `match`, so adding a
//! node kind fails to compile until every walker handles it.
//!
//! # Example
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_function_call(&mut self, call: &'ast FunctionCall) {
//!         self.0 += 1;
//!         walk_function_call(self, call);
//!     }
//! }
//! ```

use super::{
    ast::{Expr, Node},
    expressions::{
        CallArgument, CastExpression, DictLiteral, FunctionCall, InfixExpression, LambdaBody,
        LambdaExpression, ListLiteral, MemberAccess, ObjectCreation, PostfixExpression,
        PrefixExpression, SymbolReference,
    },
    statements::{
        Block, IfStatement, LocalVariableDeclaration, ModuleDeclaration, Root, Symbol,
        UseStatement, UseTarget,
    },
    types::TypeReference,
};

pub trait Visitor<'ast> {
    fn visit_root(&mut self, root: &'ast Root) {
        walk_root(self, root);
    }

    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }

    fn visit_module(&mut self, module: &'ast ModuleDeclaration) {
        self.visit_symbol(&module.name);
    }

    fn visit_use(&mut self, use_stmt: &'ast UseStatement) {
        match &use_stmt.target {
            UseTarget::Symbol(symbol) => self.visit_symbol(symbol),
            UseTarget::Wildcard(wildcard) => self.visit_symbol(&wildcard.base),
        }
    }

    fn visit_local_variable(&mut self, decl: &'ast LocalVariableDeclaration) {
        walk_local_variable(self, decl);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_if(&mut self, if_stmt: &'ast IfStatement) {
        walk_if(self, if_stmt);
    }

    fn visit_symbol(&mut self, symbol: &'ast Symbol) {
        for part in &symbol.parts {
            self.visit_symbol_reference(part);
        }
    }

    fn visit_type(&mut self, type_ref: &'ast TypeReference) {
        self.visit_symbol(&type_ref.path);
    }

    /// Visit an expression.
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    fn visit_symbol_reference(&mut self, _symbol: &'ast SymbolReference) {}

    fn visit_member_access(&mut self, access: &'ast MemberAccess) {
        self.visit_expr(&access.source);
        self.visit_symbol_reference(&access.accessor);
    }

    fn visit_function_call(&mut self, call: &'ast FunctionCall) {
        walk_function_call(self, call);
    }

    fn visit_call_argument(&mut self, argument: &'ast CallArgument) {
        if let Some(name) = &argument.name {
            self.visit_symbol_reference(name);
        }
        self.visit_expr(&argument.value);
    }

    fn visit_infix(&mut self, infix: &'ast InfixExpression) {
        self.visit_expr(&infix.left);
        self.visit_expr(&infix.right);
    }

    fn visit_prefix(&mut self, prefix: &'ast PrefixExpression) {
        self.visit_expr(&prefix.target);
    }

    fn visit_postfix(&mut self, postfix: &'ast PostfixExpression) {
        self.visit_expr(&postfix.target);
    }

    fn visit_cast(&mut self, cast: &'ast CastExpression) {
        self.visit_expr(&cast.source);
        self.visit_type(&cast.target);
    }

    fn visit_list(&mut self, list: &'ast ListLiteral) {
        for item in &list.items {
            self.visit_expr(item);
        }
    }

    fn visit_dict(&mut self, dict: &'ast DictLiteral) {
        for pair in &dict.pairs {
            self.visit_expr(&pair.key);
            self.visit_expr(&pair.value);
        }
    }

    fn visit_lambda(&mut self, lambda: &'ast LambdaExpression) {
        walk_lambda(self, lambda);
    }

    fn visit_object_creation(&mut self, creation: &'ast ObjectCreation) {
        self.visit_symbol(&creation.class);
        for argument in &creation.arguments {
            self.visit_call_argument(argument);
        }
    }
}

pub fn walk_root<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, root: &'ast Root) {
    for node in &root.nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    match node {
        Node::Module(module) => visitor.visit_module(module),
        Node::Use(use_stmt) => visitor.visit_use(use_stmt),
        Node::LocalVariable(decl) => visitor.visit_local_variable(decl),
        Node::Block(block) => visitor.visit_block(block),
        Node::If(if_stmt) => visitor.visit_if(if_stmt),
        Node::Expression(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_local_variable<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    decl: &'ast LocalVariableDeclaration,
) {
    visitor.visit_symbol_reference(&decl.name);
    if let Some(type_ref) = &decl.type_annotation {
        visitor.visit_type(type_ref);
    }
    if let Some(assignment) = &decl.assignment {
        visitor.visit_expr(&assignment.value);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for node in &block.nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_if<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, if_stmt: &'ast IfStatement) {
    for branch in &if_stmt.branches {
        visitor.visit_expr(&branch.condition);
        visitor.visit_block(&branch.body);
    }
    if let Some(otherwise) = &if_stmt.otherwise {
        visitor.visit_block(otherwise);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::IntegralLiteral(_)
        | Expr::DecimalLiteral(_)
        | Expr::StringLiteral(_)
        | Expr::BooleanLiteral(_) => {}
        Expr::SymbolReference(symbol) => visitor.visit_symbol_reference(symbol),
        Expr::MemberAccess(access) => visitor.visit_member_access(access),
        Expr::FunctionCall(call) => visitor.visit_function_call(call),
        Expr::Infix(infix) => visitor.visit_infix(infix),
        Expr::Prefix(prefix) => visitor.visit_prefix(prefix),
        Expr::Postfix(postfix) => visitor.visit_postfix(postfix),
        Expr::Cast(cast) => visitor.visit_cast(cast),
        Expr::Parenthesized(paren) => visitor.visit_expr(&paren.inner),
        Expr::List(list) => visitor.visit_list(list),
        Expr::Dict(dict) => visitor.visit_dict(dict),
        Expr::Lambda(lambda) => visitor.visit_lambda(lambda),
        Expr::ObjectCreation(creation) => visitor.visit_object_creation(creation),
    }
}

pub fn walk_function_call<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    call: &'ast FunctionCall,
) {
    visitor.visit_expr(&call.callable);
    for argument in &call.arguments {
        visitor.visit_call_argument(argument);
    }
}

pub fn walk_lambda<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, lambda: &'ast LambdaExpression) {
    for parameter in &lambda.parameters {
        visitor.visit_symbol_reference(&parameter.name);
        if let Some(type_ref) = &parameter.type_annotation {
            visitor.visit_type(type_ref);
        }
    }
    match &lambda.body {
        LambdaBody::Block(block) => visitor.visit_block(block),
        LambdaBody::Expression(expr) => visitor.visit_expr(expr),
    }
}
