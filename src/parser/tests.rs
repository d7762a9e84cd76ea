//! Unit tests for the parser module.
//!
//! This module contains tests for parsing language constructs including:
//! - Operator precedence and associativity
//! - Calls, member chains, casts and literals
//! - Lambdas, dicts and object creation
//! - Statements and blocks
//! - Error recovery and synchronization

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{CodeNode, Expr, Node, NodeKind},
        expressions::{IntegerWidth, LambdaBody},
        statements::{Root, UseTarget},
    },
    config::ParseOptions,
    errors::{
        errors::{ErrorCode, ParseError, Severity},
        reporter::Reporter,
    },
    lexer::{lexer::tokenize, stream::TokenStream, tokens::TokenKind},
    parse_source,
};

use super::parser::{parse_expression, Parser, Unwind, MAX_NESTING_DEPTH};

/// Renders an expression as a compact s-expression.
fn sexpr(expr: &Expr) -> String {
    fn args(arguments: &[crate::ast::expressions::CallArgument]) -> String {
        arguments
            .iter()
            .map(|argument| match &argument.name {
                Some(name) => format!(" {}:{}", name.name, sexpr(&argument.value)),
                None => format!(" {}", sexpr(&argument.value)),
            })
            .collect()
    }

    match expr {
        Expr::IntegralLiteral(literal) => literal.value.to_string(),
        Expr::DecimalLiteral(literal) => literal.value.to_string(),
        Expr::StringLiteral(literal) => format!("{:?}", literal.as_str().unwrap_or_default()),
        Expr::BooleanLiteral(literal) => if literal.value { "yes" } else { "no" }.to_string(),
        Expr::SymbolReference(symbol) => symbol.name.clone(),
        Expr::MemberAccess(access) => format!(
            "({} {} {})",
            access.operator.as_str(),
            sexpr(&access.source),
            access.accessor.name
        ),
        Expr::FunctionCall(call) => format!("(call {}{})", sexpr(&call.callable), args(&call.arguments)),
        Expr::Infix(infix) => format!(
            "({} {} {})",
            infix.operator.as_str(),
            sexpr(&infix.left),
            sexpr(&infix.right)
        ),
        Expr::Prefix(prefix) => format!("({} {})", prefix.operator.as_str(), sexpr(&prefix.target)),
        Expr::Postfix(postfix) => format!("({} {})", sexpr(&postfix.target), postfix.operator.as_str()),
        Expr::Cast(cast) => format!("({} {} {})", cast.operator.as_str(), sexpr(&cast.source), cast.target),
        Expr::Parenthesized(paren) => format!("(paren {})", sexpr(&paren.inner)),
        Expr::List(list) => {
            let items: String = list.items.iter().map(|item| format!(" {}", sexpr(item))).collect();
            format!("(list{})", items)
        }
        Expr::Dict(dict) => {
            let pairs: String = dict
                .pairs
                .iter()
                .map(|pair| format!(" {}:{}", sexpr(&pair.key), sexpr(&pair.value)))
                .collect();
            format!("(dict{})", pairs)
        }
        Expr::Lambda(lambda) => {
            let parameters = lambda
                .parameters
                .iter()
                .map(|parameter| match &parameter.type_annotation {
                    Some(type_ref) => format!("{}:{}", parameter.name.name, type_ref),
                    None => parameter.name.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            let body = match &lambda.body {
                LambdaBody::Block(block) => format!("{{{}}}", block.nodes.len()),
                LambdaBody::Expression(expr) => sexpr(expr),
            };
            format!("(lambda ({}) {})", parameters, body)
        }
        Expr::ObjectCreation(creation) => {
            format!("(new {}{})", creation.class.path(), args(&creation.arguments))
        }
    }
}

fn parse_expr_source(source: &str, options: &ParseOptions) -> (Reporter, Result<Expr, ParseError>) {
    let mut reporter = Reporter::new();
    let (tokens, _) = tokenize(source, "test.pz", &mut reporter);
    let stream = TokenStream::new(tokens, source, "test.pz");
    let result = parse_expression(stream, &mut reporter, options);
    (reporter, result)
}

/// Parses a single expression that must come out clean.
fn sx(source: &str) -> String {
    let (reporter, result) = parse_expr_source(source, &ParseOptions::default());
    assert!(!reporter.has_errors(), "{}", reporter.render());
    sexpr(&result.unwrap())
}

fn parse_clean(source: &str) -> Root {
    let (reporter, result) = parse_source(source, "test.pz", &ParseOptions::default());
    assert!(!reporter.has_errors(), "{}", reporter.render());
    result.unwrap()
}

fn codes(reporter: &Reporter) -> Vec<ErrorCode> {
    reporter.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(sx("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(sx("1 * 2 + 3"), "(+ (* 1 2) 3)");
    assert_eq!(sx("a - b - c"), "(- (- a b) c)");
    assert_eq!(sx("a / b % c"), "(% (/ a b) c)");
    assert_eq!(sx("(1 + 2) * 3"), "(* (paren (+ 1 2)) 3)");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(sx("2 ** 3 ** 2"), "(** 2 (** 3 2))");
    assert_eq!(sx("2 * 3 ** 2"), "(* 2 (** 3 2))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(sx("a = b = c"), "(= a (= b c))");
    assert_eq!(sx("a += 1 + 2"), "(+= a (+ 1 2))");
    assert_eq!(sx("a ??= b ?? c"), "(??= a (?? b c))");
    assert_eq!(sx("s ...= t"), "(...= s t)");
}

#[test]
fn test_logical_bitwise_and_comparison_levels() {
    assert_eq!(sx("a || b && c == d"), "(|| a (&& b (== c d)))");
    assert_eq!(sx("a ?? b || c"), "(?? a (|| b c))");
    assert_eq!(sx("a | b ^ c & d"), "(| a (^ b (& c d)))");
    assert_eq!(sx("a < b == c"), "(== (< a b) c)");
    assert_eq!(sx("1 << 2 + 3"), "(<< 1 (+ 2 3))");
    assert_eq!(sx("a >>> b >= c"), "(>= (>>> a b) c)");
    assert_eq!(sx("a ... b + c"), "(+ (... a b) c)");
}

#[test]
fn test_prefix_and_postfix() {
    assert_eq!(sx("-a * b"), "(* (- a) b)");
    assert_eq!(sx("-a.b"), "(- (. a b))");
    assert_eq!(sx("!!a"), "(!! a)");
    assert_eq!(sx("~x"), "(~ x)");
    assert_eq!(sx("++i"), "(++ i)");
    assert_eq!(sx("a!!"), "(a !!)");
    assert_eq!(sx("i++ + 1"), "(+ (i ++) 1)");
}

#[test]
fn test_casts() {
    assert_eq!(sx("x as Int + 1"), "(+ (as x Int) 1)");
    assert_eq!(sx("x to std.List[]"), "(to x std.List[])");
}

#[test]
fn test_member_chains_are_left_associative() {
    assert_eq!(sx("a.b.c"), "(. (. a b) c)");
    assert_eq!(sx("a?.b..c"), "(.. (?. a b) c)");
    assert_eq!(sx("foo.bar(1,2)"), "(call (. foo bar) 1 2)");
    assert_eq!(sx("f(1, 2)(3)"), "(call (call f 1 2) 3)");
    assert_eq!(sx("f()"), "(call f)");
}

#[test]
fn test_named_arguments() {
    assert_eq!(sx("f(x: 1, y)"), "(call f x:1 y)");
    assert_eq!(sx("f(a)"), "(call f a)");
}

#[test]
fn test_literals() {
    assert_eq!(sx("\"s\""), "\"s\"");
    assert_eq!(sx("yes"), "yes");
    assert_eq!(sx("no"), "no");
    assert_eq!(sx("3.5"), "3.5");
    assert_eq!(sx("0xFF"), "255");
}

#[test]
fn test_integer_widths() {
    let width = |source: &str| match parse_expr_source(source, &ParseOptions::default()).1 {
        Ok(Expr::IntegralLiteral(literal)) => (literal.width, literal.radix),
        other => panic!("not an integer: {:?}", other),
    };

    assert_eq!(width("1"), (IntegerWidth::Int, 10));
    assert_eq!(width("1s"), (IntegerWidth::Short, 10));
    assert_eq!(width("1L"), (IntegerWidth::Long, 10));
    assert_eq!(width("0xFF"), (IntegerWidth::Int, 16));
    assert_eq!(width("0xFFFFFFFFF"), (IntegerWidth::Long, 16));
}

#[test]
fn test_integer_out_of_range() {
    let (reporter, result) = parse_expr_source("70000s", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::IntegerOutOfRange]);
    assert_eq!(sexpr(&result.unwrap()), "0");

    let (reporter, _) = parse_expr_source("2147483648", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::IntegerOutOfRange]);

    let (reporter, _) = parse_expr_source("2147483648L", &ParseOptions::default());
    assert!(!reporter.has_errors());

    let strict = ParseOptions::default().with_keep_going(false);
    let (_, result) = parse_expr_source("70000s", &strict);
    assert_eq!(result.unwrap_err().code(), Some(ErrorCode::IntegerOutOfRange));
}

#[test]
fn test_negative_literals_are_range_checked_without_sign() {
    // The literal is checked before the prefix `-` applies to it
    let (reporter, result) = parse_expr_source("-2147483648", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::IntegerOutOfRange]);
    assert_eq!(sexpr(&result.unwrap()), "(- 0)");

    assert_eq!(sx("-2147483647"), "(- 2147483647)");
    assert_eq!(sx("-2147483648L"), "(- 2147483648)");
}

#[test]
fn test_list_literals() {
    assert_eq!(sx("[]"), "(list)");
    assert_eq!(sx("[1, 2, 3,]"), "(list 1 2 3)");
    assert_eq!(sx("[[a], b]"), "(list (list a) b)");
}

#[test]
fn test_dict_literals() {
    assert_eq!(sx("{}"), "(dict)");
    assert_eq!(sx("{a: 1, 'b': 2,}"), "(dict a:1 \"b\":2)");
    assert_eq!(sx("dict{a: 1}"), "(dict a:1)");
    assert_eq!(sx("dict"), "dict");
}

#[test]
fn test_dict_missing_colon() {
    let (reporter, result) = parse_expr_source("{a 1}", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedDictColon]);
    assert!(result.is_err());
}

#[test]
fn test_lambdas() {
    assert_eq!(sx(": a, b -> a + b"), "(lambda (a b) (+ a b))");
    assert_eq!(sx(": -> 1"), "(lambda () 1)");
    assert_eq!(sx(": x Int -> x"), "(lambda (x:Int) x)");
    assert_eq!(sx(": x -> { x; }"), "(lambda (x) {1})");
    assert_eq!(sx("f(: a -> a, 2)"), "(call f (lambda (a) a) 2)");
}

#[test]
fn test_lambda_parameter_colon_is_a_warning() {
    let (reporter, result) = parse_expr_source(": x: Int -> x", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::UnnecessaryColonInParameter]);
    assert!(!reporter.has_errors());
    assert_eq!(sexpr(&result.unwrap()), "(lambda (x:Int) x)");
}

#[test]
fn test_lambda_missing_arrow() {
    let (reporter, result) = parse_expr_source(": a 1", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedLambdaArrow]);
    assert_eq!(result.unwrap_err().code(), Some(ErrorCode::ExpectedLambdaArrow));
}

#[test]
fn test_object_creation() {
    assert_eq!(sx("new a.B(1, name: 2)"), "(new a.B 1 name:2)");
    assert_eq!(sx("new Point()"), "(new Point)");
}

#[test]
fn test_leftover_tokens_after_expression() {
    let (reporter, result) = parse_expr_source("1 2", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::UnexpectedToken]);
    assert_eq!(sexpr(&result.unwrap()), "1");
}

#[test]
fn test_expression_span() {
    let root = parse_clean("foo.bar(1,2);");

    let span = root.nodes[0].source_range().unwrap();
    assert_eq!(span.text, "foo.bar(1,2)");
    assert_eq!(span.start.column, 1);
    assert_eq!(span.end.column, 13);
}

#[test]
fn test_variable_declarations() {
    let root = parse_clean("let x; let y: Int; let xs: std.List[][] = []; let z = 1 + 2;");
    assert_eq!(root.nodes.len(), 4);

    let Node::LocalVariable(x) = &root.nodes[0] else { panic!("expected a declaration") };
    assert_eq!(x.name.name, "x");
    assert!(x.type_annotation.is_none());
    assert!(x.assignment.is_none());

    let Node::LocalVariable(y) = &root.nodes[1] else { panic!("expected a declaration") };
    assert_eq!(y.type_annotation.as_ref().unwrap().to_string(), "Int");
    assert!(y.assignment.is_none());

    let Node::LocalVariable(xs) = &root.nodes[2] else { panic!("expected a declaration") };
    let type_ref = xs.type_annotation.as_ref().unwrap();
    assert_eq!(type_ref.to_string(), "std.List[][]");
    assert_eq!(type_ref.dimensions, 2);
    assert_eq!(sexpr(&xs.assignment.as_ref().unwrap().value), "(list)");

    let Node::LocalVariable(z) = &root.nodes[3] else { panic!("expected a declaration") };
    let assignment = z.assignment.as_ref().unwrap();
    assert_eq!(assignment.target.name, "z");
    assert_eq!(sexpr(&assignment.value), "(+ 1 2)");
    assert_eq!(assignment.source_range.as_ref().unwrap().text, "= 1 + 2");
    assert_eq!(root.nodes[3].kind(), NodeKind::LocalVariableDeclaration);
}

#[test]
fn test_module_and_use() {
    let root = parse_clean("mod app.main; use std.io; use std.io.*;");

    let Node::Module(module) = &root.nodes[0] else { panic!("expected a module") };
    assert_eq!(module.name.path(), "app.main");

    let Node::Use(plain) = &root.nodes[1] else { panic!("expected a use") };
    assert!(matches!(&plain.target, UseTarget::Symbol(symbol) if symbol.path() == "std.io"));

    let Node::Use(wildcard) = &root.nodes[2] else { panic!("expected a use") };
    let UseTarget::Wildcard(target) = &wildcard.target else { panic!("expected a wildcard") };
    assert_eq!(target.base.path(), "std.io");
    assert_eq!(target.source_range.as_ref().unwrap().text, "std.io.*");
    assert_eq!(target.base.source_range.as_ref().unwrap().text, "std.io");
}

#[test]
fn test_module_wildcard_is_rejected() {
    let (reporter, result) = parse_source("mod a.*;", "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::WildcardNotAllowed]);
    let root = result.unwrap();
    let Node::Module(module) = &root.nodes[0] else { panic!("expected a module") };
    assert_eq!(module.name.path(), "a");
}

#[test]
fn test_use_missing_name() {
    let (reporter, _) = parse_source("use std.;", "test.pz", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedNsName]);
}

#[test]
fn test_if_elif_else() {
    let root = parse_clean("if a { b; } elif c { d; } elif e { } else { f; g; }");

    let Node::If(if_stmt) = &root.nodes[0] else { panic!("expected an if") };
    assert_eq!(if_stmt.branches.len(), 3);
    assert_eq!(sexpr(&if_stmt.branches[1].condition), "c");
    assert!(if_stmt.branches[2].body.nodes.is_empty());
    assert_eq!(if_stmt.otherwise.as_ref().unwrap().nodes.len(), 2);
}

#[test]
fn test_nested_blocks() {
    let root = parse_clean("{ let x = 1; { x; } }");

    let Node::Block(outer) = &root.nodes[0] else { panic!("expected a block") };
    assert_eq!(outer.nodes.len(), 2);
    assert!(matches!(&outer.nodes[1], Node::Block(inner) if inner.nodes.len() == 1));
}

#[test]
fn test_stray_semicolon_is_a_warning() {
    let (reporter, result) = parse_source("a;;", "test.pz", &ParseOptions::default());

    assert_eq!(result.unwrap().nodes.len(), 1);
    assert!(!reporter.has_errors());
    assert_eq!(codes(&reporter), vec![ErrorCode::UnnecessarySemi]);

    let options = ParseOptions::default().with_suppressed("parser.unnecessary");
    let (reporter, _) = parse_source("a;;", "test.pz", &options);
    assert!(reporter.diagnostics().is_empty());
    assert_eq!(reporter.suppressed_count(), 1);
}

#[test]
fn test_missing_semicolon_before_statement_is_soft() {
    let (reporter, result) = parse_source("let x = 1 let y = 2;", "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedSemi]);
    assert_eq!(reporter.diagnostics()[0].span.start.column, 10);
    assert_eq!(result.unwrap().nodes.len(), 2);
}

#[test]
fn test_recovery_reports_every_error() {
    let (reporter, result) = parse_source("let ; let x = ;", "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedId, ErrorCode::ExpectedValue]);

    // The broken initializer still leaves the declaration behind
    let root = result.unwrap();
    assert_eq!(root.nodes.len(), 1);
    let Node::LocalVariable(decl) = &root.nodes[0] else { panic!("expected a declaration") };
    assert_eq!(decl.name.name, "x");
    assert!(decl.assignment.is_none());
}

#[test]
fn test_recovery_skips_to_next_statement() {
    let (reporter, result) = parse_source("foo bar; let y = 2;", "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedSemi]);
    let root = result.unwrap();
    assert_eq!(root.nodes.len(), 1);
    assert_eq!(root.nodes[0].kind(), NodeKind::LocalVariableDeclaration);
}

#[test]
fn test_abort_without_keep_going() {
    let options = ParseOptions::default().with_keep_going(false);
    let (reporter, result) = parse_source("let ; let x = ;", "test.pz", &options);

    assert_eq!(reporter.error_count(), 1);
    match result {
        Err(ParseError::Aborted { code, .. }) => assert_eq!(code, ErrorCode::ExpectedId),
        other => panic!("expected an abort, got {:?}", other),
    }
}

#[test]
fn test_cannot_sync_without_eof_sync_point() {
    let options = ParseOptions::default().with_sync_points(vec![TokenKind::Let]);
    let (_, result) = parse_source("let ; x", "test.pz", &options);

    match result {
        Err(ParseError::CannotSync { code, .. }) => assert_eq!(code, ErrorCode::ExpectedId),
        other => panic!("expected a sync failure, got {:?}", other),
    }
}

#[test]
fn test_unclosed_constructs() {
    let (reporter, _) = parse_source("f(1, 2;", "test.pz", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedClosingParen]);

    let (reporter, _) = parse_source("if a { b;", "test.pz", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedBlockEnd]);
    assert_eq!(reporter.diagnostics()[0].extra, "found end of file");

    let (reporter, _) = parse_source("let a = [1, 2;", "test.pz", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::ExpectedListEnd]);
}

#[test]
fn test_expression_at_end_of_file() {
    let (reporter, _) = parse_source("let a = 1 +", "test.pz", &ParseOptions::default());
    assert_eq!(codes(&reporter), vec![ErrorCode::UnexpectedEof]);
}

#[test]
fn test_invalid_tokens_are_reported_once() {
    let (reporter, result) = parse_source("let x = $;", "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::UnexpectedCharacter]);
    assert_eq!(result.unwrap().nodes.len(), 1);
}

#[test]
fn test_lexical_errors_stop_a_strict_session() {
    let options = ParseOptions::default().with_keep_going(false);
    let (_, result) = parse_source("let $ = 1;", "test.pz", &options);

    assert!(matches!(result, Err(ParseError::Lexical { errors: 1 })));
}

#[test]
fn test_garbage_input_terminates() {
    let source = ") ) ] } ( [ , elif } else : -> { ;";
    let (reporter, result) = parse_source(source, "test.pz", &ParseOptions::default());

    assert!(result.is_ok());
    assert!(reporter.has_errors());
}

#[test]
fn test_diagnostics_are_bounded_by_token_count() {
    let sources = [
        ") ) ] } ( [ , elif } else : -> { ;",
        "{{{{",
        "}}}}",
        "let let let",
        "if if if",
        "mod a.*",
        "\"",
        "/*",
        "(((( [[ ,, ;; let = = if",
    ];

    for source in sources {
        let mut lex_reporter = Reporter::new();
        let (tokens, _) = tokenize(source, "test.pz", &mut lex_reporter);
        let (reporter, _) = parse_source(source, "test.pz", &ParseOptions::default());

        // One extra slot for the EOF token the stream appends
        assert!(
            reporter.diagnostics().len() <= tokens.len() + 1,
            "{:?} produced {} diagnostics for {} tokens:\n{}",
            source,
            reporter.diagnostics().len(),
            tokens.len(),
            reporter.render()
        );
        assert!(reporter.has_errors(), "{:?} parsed clean", source);
    }
}

#[test]
fn test_asserted_unwinds_with_state_dump() {
    let source = "a b";
    let mut reporter = Reporter::new();
    let (tokens, _) = tokenize(source, "test.pz", &mut reporter);
    let stream = TokenStream::new(tokens, source, "test.pz");
    let options = ParseOptions::default();
    assert!(options.keep_going);

    let unwind = {
        let mut parser = Parser::new(stream, &mut reporter, &options);
        parser.accept_asserted(TokenKind::Semicolon).unwrap_err()
    };

    let Unwind::Abort(ParseError::Internal { code, span, state }) = unwind else {
        panic!("expected an internal error");
    };
    assert_eq!(code, ErrorCode::Asserted);
    assert_eq!(span.text, "a");
    assert!(state.starts_with("expected Semicolon here"), "{}", state);
    assert!(state.contains("cursor: 0 of 3"), "{}", state);
    assert!(state.contains("current: `a` (Identifier)"), "{}", state);
    assert!(state.contains("window: [Identifier \"a\", Identifier \"b\""), "{}", state);

    assert_eq!(reporter.count(Severity::Fatal), 1);
    assert_eq!(codes(&reporter), vec![ErrorCode::Asserted]);
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 10_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let (reporter, result) = parse_source(&source, "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::NestingTooDeep]);
    assert_eq!(
        reporter.diagnostics()[0].span.start.column as usize,
        MAX_NESTING_DEPTH + 1
    );
    assert!(result.unwrap().nodes.is_empty());

    let strict = ParseOptions::default().with_keep_going(false);
    let (_, result) = parse_source(&source, "test.pz", &strict);
    assert_eq!(result.unwrap_err().code(), Some(ErrorCode::NestingTooDeep));
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let depth = MAX_NESTING_DEPTH - 1;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let expected = format!("{}1{}", "(paren ".repeat(depth), ")".repeat(depth));
    assert_eq!(sx(&source), expected);
}

#[test]
fn test_deeply_nested_blocks() {
    let depth = 10_000;
    let source = format!("{}{}let x = 1;", "{".repeat(depth), "}".repeat(depth));
    let (reporter, result) = parse_source(&source, "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::NestingTooDeep]);

    // The blocks inside the limit are kept and parsing carries on after them
    let root = result.unwrap();
    assert_eq!(
        root.nodes.iter().map(|node| node.kind()).collect::<Vec<_>>(),
        vec![NodeKind::Block, NodeKind::LocalVariableDeclaration]
    );
}

#[test]
fn test_deep_prefix_chains() {
    let source = format!("{}1;\nlet y = 2;", "- ".repeat(10_000));
    let (reporter, result) = parse_source(&source, "test.pz", &ParseOptions::default());

    assert_eq!(codes(&reporter), vec![ErrorCode::NestingTooDeep]);
    assert_eq!(result.unwrap().nodes.len(), 1);
}

#[test]
fn test_deep_nesting_on_a_spawned_thread() {
    let handle = std::thread::spawn(|| {
        let source = format!("let v = {}1{};", "[".repeat(5_000), "]".repeat(5_000));
        let (reporter, result) = parse_source(&source, "thread.pz", &ParseOptions::default());
        (codes(&reporter), result.is_ok())
    });

    let (codes, parsed) = handle.join().unwrap();
    assert_eq!(codes, vec![ErrorCode::NestingTooDeep]);
    assert!(parsed);
}

#[test]
fn test_empty_source() {
    let root = parse_clean("");
    assert!(root.nodes.is_empty());

    let root = parse_clean("// nothing but a comment\n");
    assert!(root.nodes.is_empty());
}
