use protoget_parser::parser::syntax_kind_ext::*;
use protoget_parser::parser::{NodeArena, NodeIndex, ParserState, preorder};
use protoget_parser::{RenderError, render};

/// Parse `expr` as the only statement of a function body and return the
/// statement's expression node.
fn parse_expression(expr: &str) -> (NodeArena, NodeIndex) {
    let source = format!("package p\nfunc f() {{\n\t{expr}\n}}\n");
    let mut parser = ParserState::new("expr.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let statement = preorder(&arena, root)
        .find(|&idx| arena.kind_of(idx) == Some(EXPRESSION_STATEMENT))
        .expect("expression statement");
    let expression = arena
        .get_expr_statement(arena.get(statement).unwrap())
        .unwrap()
        .expression;
    (arena, expression)
}

fn round_trip(expr: &str) -> String {
    let (arena, idx) = parse_expression(expr);
    render(&arena, idx).expect("render")
}

#[test]
fn renders_selectors_and_calls() {
    assert_eq!(round_trip("m.Name"), "m.Name");
    assert_eq!(round_trip("m.Name.Length()"), "m.Name.Length()");
    assert_eq!(round_trip("fmt.Println(m.Name, 1)"), "fmt.Println(m.Name, 1)");
}

#[test]
fn normalises_spacing() {
    assert_eq!(round_trip("f( a ,b )"), "f(a, b)");
    assert_eq!(round_trip("g(a+b*c)"), "g(a + b * c)");
    assert_eq!(round_trip("g(& x)"), "g(&x)");
    assert_eq!(round_trip("g(!ok, -n, *p)"), "g(!ok, -n, *p)");
}

#[test]
fn keeps_literals_and_parentheses_as_written() {
    assert_eq!(round_trip("g(\"a\\tb\", `raw`, 0x1F)"), "g(\"a\\tb\", `raw`, 0x1F)");
    assert_eq!(round_trip("(m).Items[i].Name"), "(m).Items[i].Name");
}

#[test]
fn renders_literals_conversions_and_assertions() {
    assert_eq!(
        round_trip("g([]byte(s), map[string]int{}, xs[1:n], ys...)"),
        "g([]byte(s), map[string]int{}, xs[1:n], ys...)"
    );
    assert_eq!(round_trip("x.(*pb.Msg).Name"), "x.(*pb.Msg).Name");
    assert_eq!(
        round_trip("use(&pb.Msg{Name: \"a\", Tags: []string{\"b\"}})"),
        "use(&pb.Msg{Name: \"a\", Tags: []string{\"b\"}})"
    );
    assert_eq!(round_trip("use(<-ch, 1.5, 'x')"), "use(<-ch, 1.5, 'x')");
}

#[test]
fn function_literal_bodies_are_elided() {
    assert_eq!(
        round_trip("g(func(a, b int) string { return \"\" })"),
        "g(func(a, b int) string {...})"
    );
    assert_eq!(
        round_trip("run(func() (int, error) {\n\t\treturn 0, nil\n\t}).Name"),
        "run(func() (int, error) {...}).Name"
    );
}

#[test]
fn renders_type_nodes() {
    let source = "package p\ntype T struct {\n\tA, B []*pb.Msg\n\tC\n}\n";
    let mut parser = ParserState::new("types.go".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let struct_type = preorder(&arena, root)
        .find(|&idx| arena.kind_of(idx) == Some(STRUCT_TYPE))
        .unwrap();
    assert_eq!(
        render(&arena, struct_type).unwrap(),
        "struct{ A, B []*pb.Msg; C }"
    );
}

#[test]
fn statements_are_not_renderable() {
    let source = "package p\nfunc f() {\n\tx = 1\n}\n";
    let mut parser = ParserState::new("stmt.go".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let assignment = preorder(&arena, root)
        .find(|&idx| arena.kind_of(idx) == Some(ASSIGNMENT_STATEMENT))
        .unwrap();
    assert_eq!(
        render(&arena, assignment),
        Err(RenderError::UnsupportedNode {
            kind: "AssignmentStatement"
        })
    );
}

#[test]
fn missing_nodes_are_errors() {
    let arena = NodeArena::new();
    assert_eq!(
        render(&arena, NodeIndex(7)),
        Err(RenderError::MissingNode(NodeIndex(7)))
    );
    assert_eq!(
        render(&arena, NodeIndex::NONE),
        Err(RenderError::MissingNode(NodeIndex::NONE))
    );
}
