//! Integration tests for end-to-end parse sessions.
//!
//! These tests drive complete sources through tokenization, the token
//! stream and the parser, and check both the resulting tree and the
//! rendered diagnostics.

use pretty_assertions::assert_eq;
use pretzel::{
    ast::{
        ast::{CodeNode, Expr, Node, NodeKind},
        expressions::{FunctionCall, LambdaExpression},
        statements::UseTarget,
        visit::{walk_function_call, walk_lambda, Visitor},
    },
    config::ParseOptions,
    errors::errors::{ErrorCode, ParseError, Severity},
    parse_source,
};

const PROGRAM: &str = r#"mod app.main;
use std.io.*;
use std.collections.List;

let greeting: String = @"hello {name}";
let numbers: Int[] = [1, 2, 3];
let lookup = dict{"a": 1, "b": 2};
let total = 0L;

numbers.forEach(: n -> { total += n as Long; });

if total > 5L {
    io.println(greeting);
} elif total == 0L {
    io.println(message: "empty");
} else {
    let point = new geometry.Point(x: 1, y: 2);
    point?.move(1, 1)..scale(2 ** 2);
}
"#;

#[derive(Default)]
struct Census {
    calls: usize,
    lambdas: usize,
}

impl<'ast> Visitor<'ast> for Census {
    fn visit_function_call(&mut self, call: &'ast FunctionCall) {
        self.calls += 1;
        walk_function_call(self, call);
    }

    fn visit_lambda(&mut self, lambda: &'ast LambdaExpression) {
        self.lambdas += 1;
        walk_lambda(self, lambda);
    }
}

#[test]
fn test_parse_complete_program() {
    let (reporter, result) = parse_source(PROGRAM, "main.pz", &ParseOptions::default());
    assert!(reporter.diagnostics().is_empty(), "{}", reporter.render());

    let root = result.unwrap();
    let kinds: Vec<NodeKind> = root.nodes.iter().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ModuleDeclaration,
            NodeKind::UseStatement,
            NodeKind::UseStatement,
            NodeKind::LocalVariableDeclaration,
            NodeKind::LocalVariableDeclaration,
            NodeKind::LocalVariableDeclaration,
            NodeKind::LocalVariableDeclaration,
            NodeKind::FunctionCall,
            NodeKind::IfStatement,
        ]
    );

    let Node::Use(use_stmt) = &root.nodes[1] else { panic!("expected a use") };
    assert!(matches!(&use_stmt.target, UseTarget::Wildcard(target) if target.base.path() == "std.io"));

    let Node::LocalVariable(greeting) = &root.nodes[3] else { panic!("expected a declaration") };
    let value = &greeting.assignment.as_ref().unwrap().value;
    assert!(matches!(value, Expr::StringLiteral(literal) if literal.template));

    let Node::If(if_stmt) = &root.nodes[8] else { panic!("expected an if") };
    assert_eq!(if_stmt.branches.len(), 2);
    assert_eq!(if_stmt.otherwise.as_ref().unwrap().nodes.len(), 2);

    let mut census = Census::default();
    census.visit_root(&root);
    assert_eq!(census.calls, 5);
    assert_eq!(census.lambdas, 1);
}

#[test]
fn test_root_span_covers_the_source() {
    let source = "let a = 1;\nlet b = a;";
    let (_, result) = parse_source(source, "span.pz", &ParseOptions::default());

    let root = result.unwrap();
    let span = root.source_range().unwrap();
    assert_eq!(span.text, source);
    assert_eq!(span.end.line, 2);

    let second = root.nodes[1].source_range().unwrap();
    assert_eq!(second.text, "let b = a;");
    assert_eq!(&*second.start.file, "span.pz");
}

#[test]
fn test_rendered_diagnostics_in_source_order() {
    let source = "let = 1;\nlet y = (2;\n;";
    let (reporter, result) = parse_source(source, "broken.pz", &ParseOptions::default());
    assert!(result.is_ok());

    let codes: Vec<ErrorCode> = reporter.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::ExpectedId,
            ErrorCode::ExpectedClosingParen,
        ]
    );
    assert_eq!(reporter.count(Severity::Error), 2);

    let expected = [
        "error at broken.pz 1:5 - 1:6",
        "PZE0001: expected an identifier: found `=` (Assign)",
        "> let = 1;",
        "      ^",
        "",
        "error at broken.pz 2:11 - 2:12",
        "PZE0009: expected ')': found `;` (Semicolon)",
        "> let y = (2;",
        "            ^",
    ]
    .join("\n");
    assert_eq!(reporter.render(), expected);
}

#[test]
fn test_strict_session_stops_at_first_error() {
    let options = ParseOptions::default().with_keep_going(false);
    let (reporter, result) = parse_source("let a = ;\nlet = 2;", "strict.pz", &options);

    assert_eq!(reporter.error_count(), 1);
    let error = result.unwrap_err();
    assert!(matches!(error, ParseError::Aborted { .. }));
    assert_eq!(error.code(), Some(ErrorCode::ExpectedValue));
    assert!(!error.is_fatal());
}

#[test]
fn test_sessions_do_not_share_diagnostics() {
    let options = ParseOptions::default();
    let (first, _) = parse_source("let = 1;", "one.pz", &options);
    let (second, _) = parse_source("let b = 1;", "two.pz", &options);

    assert_eq!(first.error_count(), 1);
    assert_eq!(second.error_count(), 0);
}

#[test]
fn test_sessions_run_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("let v{} = {} * 2;", i, i);
                let (reporter, result) = parse_source(&source, "thread.pz", &ParseOptions::default());
                (reporter.error_count(), result.map(|root| root.nodes.len()))
            })
        })
        .collect();

    for handle in handles {
        let (errors, nodes) = handle.join().unwrap();
        assert_eq!(errors, 0);
        assert_eq!(nodes.unwrap(), 1);
    }
}
