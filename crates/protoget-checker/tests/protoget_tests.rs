use protoget_checker::{CheckerOptions, CheckerState, DIAGNOSTIC_SOURCE, FIX_MESSAGE};
use protoget_common::{Diagnostic, TextEdit};
use protoget_parser::parser::{NodeArena, NodeIndex, ParserState};
use protoget_types::{PackageInput, SourceUnit, resolve_file, resolve_program};

struct Parsed {
    arena: NodeArena,
    root: NodeIndex,
}

fn parse(name: &str, source: &str) -> Parsed {
    let mut parser = ParserState::new(name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    Parsed {
        arena: parser.into_arena(),
        root,
    }
}

fn check_with(source: &str, options: &CheckerOptions) -> Vec<Diagnostic> {
    let parsed = parse("test.go", source);
    let mut types = resolve_file(&parsed.arena, parsed.root);
    let marker = options.marker_interface(&mut types.interner);
    let info = types.type_info(0, 0).expect("single file program");
    CheckerState::new(&parsed.arena, info, "test.go", marker)
        .check_source_file(parsed.root)
        .expect("render")
}

fn check(source: &str) -> Vec<Diagnostic> {
    check_with(source, &CheckerOptions::default())
}

/// Message fixture followed by `body` as the body of `func use(m *Person)`.
fn with_body(body: &str) -> String {
    format!("{MESSAGES}\nfunc use(m *Person) {{\n{body}\n}}\n")
}

fn edits(diagnostic: &Diagnostic) -> &[TextEdit] {
    assert_eq!(diagnostic.suggested_fixes.len(), 1);
    &diagnostic.suggested_fixes[0].text_edits
}

/// Apply every fix, last edit first so earlier offsets stay valid.
fn apply_fixes(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut all: Vec<&TextEdit> = diagnostics.iter().flat_map(|d| edits(d).iter()).collect();
    all.sort_by_key(|edit| std::cmp::Reverse(edit.start));
    let mut out = source.to_string();
    for edit in all {
        out.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
    }
    out
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message_text.as_str()).collect()
}

const MESSAGES: &str = r#"package pb

import "fmt"

type Person struct {
	Name  string
	Count int
	Inner *Inner
	Tags  []string
}

func (x *Person) ProtoMessage() {}

func (x *Person) GetName() string {
	if x != nil {
		return x.Name
	}
	return ""
}

type Inner struct {
	X int
}

func (x *Inner) ProtoMessage() {}

type Plain struct {
	Name string
}

func lookup(key string) *Person { return nil }
"#;

#[test]
fn test_field_read_is_reported_with_getter_fix() {
    let source = with_body("\tfmt.Println(m.Name)");
    let diagnostics = check(&source);

    // The getter's own `x.Name` is a read too.
    let in_use: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.start as usize > source.find("func use").unwrap())
        .collect();
    assert_eq!(in_use.len(), 1);
    let diagnostic = in_use[0];

    assert_eq!(diagnostic.message_text, "protoget: \"m.Name\"");
    assert_eq!(diagnostic.source, DIAGNOSTIC_SOURCE);
    assert_eq!(diagnostic.file, "test.go");
    let start = source.rfind("m.Name").unwrap();
    assert_eq!(diagnostic.start as usize, start);
    assert_eq!(diagnostic.length as usize, "m.Name".len());

    let fix = &diagnostic.suggested_fixes[0];
    assert_eq!(fix.message, FIX_MESSAGE);
    assert_eq!(
        fix.text_edits,
        vec![TextEdit {
            start: (start + 2) as u32,
            end: (start + 6) as u32,
            new_text: "GetName()".to_string(),
        }]
    );
}

#[test]
fn test_receiver_reads_inside_methods_are_reported() {
    let diagnostics = check(MESSAGES);
    assert_eq!(messages(&diagnostics), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_assignment_targets_are_not_reported() {
    let source = with_body("\tm.Name = \"a\"\n\tm.Count += 2\n\tm.Count++\n\tm.Count--");
    let diagnostics = check(&source);
    assert_eq!(messages(&diagnostics), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_write_then_read_reports_only_the_read() {
    let source = with_body("\tm.Name = \"a\"\n\tfmt.Println(m.Name)");
    let diagnostics = check(&source);
    let reported: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.message_text == "protoget: \"m.Name\"")
        .collect();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].start as usize, source.rfind("m.Name").unwrap());
}

#[test]
fn test_address_of_field_is_not_reported() {
    let source = with_body("\tp := &m.Name\n\tq := &(m.Count)\n\tfmt.Println(p, q)");
    assert_eq!(messages(&check(&source)), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_parenthesized_assignment_target_is_not_reported() {
    let source = with_body("\t(m.Name) = \"a\"\n\t((m.Count))++");
    assert_eq!(messages(&check(&source)), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_short_variable_declaration_reads_the_field() {
    let source = with_body("\tn := m.Name\n\tfmt.Println(n)");
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
}

#[test]
fn test_method_call_on_field_is_a_read() {
    let source = with_body("\tm.Name.Length()");
    let diagnostics = check(&source);
    assert_eq!(
        messages(&diagnostics),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
    let fixed = apply_fixes(&source, &diagnostics);
    assert!(fixed.contains("m.GetName().Length()"), "{fixed}");
}

#[test]
fn test_nested_reads_report_outer_access_first() {
    let source = with_body("\tfmt.Println(m.Inner.X)");
    let diagnostics = check(&source);
    assert_eq!(
        messages(&diagnostics),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Inner.X\"",
            "protoget: \"m.Inner\""
        ]
    );
    let fixed = apply_fixes(&source, &diagnostics);
    assert!(fixed.contains("fmt.Println(m.GetInner().GetX())"), "{fixed}");
}

#[test]
fn test_write_through_nested_access_is_not_reported() {
    let source = with_body("\tm.Inner.X = 5");
    assert_eq!(messages(&check(&source)), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_indexed_assignment_reads_the_slice_field() {
    let source = with_body("\tm.Tags[0] = \"a\"");
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Tags\""]
    );
}

#[test]
fn test_methods_and_non_messages_are_not_reported() {
    let source = with_body(
        "\tfmt.Println(m.GetName())\n\tm.ProtoMessage()\n\tp := new(Plain)\n\tfmt.Println(p.Name)",
    );
    assert_eq!(messages(&check(&source)), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_message_values_are_not_reported() {
    let source = format!("{MESSAGES}\nfunc byValue(v Person) {{\n\tfmt.Println(v.Name)\n}}\n");
    assert_eq!(messages(&check(&source)), vec!["protoget: \"x.Name\""]);
}

#[test]
fn test_rendered_text_is_quoted() {
    let source = with_body("\tfmt.Println(lookup(\"k\").Name)");
    let diagnostics = check(&source);
    assert_eq!(
        messages(&diagnostics),
        vec!["protoget: \"x.Name\"", r#"protoget: "lookup(\"k\").Name""#]
    );
}

#[test]
fn test_applying_fixes_is_idempotent() {
    let source = with_body(
        "\tfmt.Println(m.Name, m.Count)\n\tif m.Inner.X > 0 {\n\t\tm.Count = len(m.Tags)\n\t}",
    );
    let diagnostics = check(&source);
    assert_eq!(diagnostics.len(), 6);

    let fixed = apply_fixes(&source, &diagnostics);
    assert!(check(&fixed).is_empty(), "second pass reported on:\n{fixed}");
}

#[test]
fn test_custom_marker_method() {
    let options = CheckerOptions {
        marker_method: "Reset".to_string(),
    };
    let source = with_body("\tfmt.Println(m.Name)");
    assert!(check_with(&source, &options).is_empty());

    let source = source.replace("ProtoMessage", "Reset");
    assert_eq!(check_with(&source, &options).len(), 2);
}

#[test]
fn test_files_with_syntax_errors_are_still_checked() {
    let source = with_body("\tfmt.Println(m.Name") + "\nfunc other(m *Person) {\n\tfmt.Println(m.Count)\n}\n";
    let texts: Vec<_> = check(&source)
        .into_iter()
        .map(|d| d.message_text)
        .collect();
    assert!(texts.contains(&"protoget: \"m.Count\"".to_string()), "{texts:?}");
}

#[test]
fn test_scan_is_lazy_and_matches_full_check() {
    let source = with_body("\tfmt.Println(m.Name, m.Count)");
    let parsed = parse("test.go", &source);
    let mut types = resolve_file(&parsed.arena, parsed.root);
    let marker = CheckerOptions::default().marker_interface(&mut types.interner);
    let state = CheckerState::new(
        &parsed.arena,
        types.type_info(0, 0).unwrap(),
        "test.go",
        marker,
    );

    let first = state.scan(parsed.root).next().unwrap().unwrap();
    assert_eq!(first.message_text, "protoget: \"x.Name\"");

    let all = state.check_source_file(parsed.root).unwrap();
    let mut scan = state.scan(parsed.root);
    let collected: Vec<_> = scan.by_ref().map(Result::unwrap).collect();
    assert_eq!(collected, all);
    assert!(scan.next().is_none());
}

#[test]
fn test_imported_messages_are_checked_across_packages() {
    let pb = parse("gen/pb/person.pb.go", MESSAGES);
    let app = parse(
        "app/main.go",
        r#"package main

import (
	"fmt"

	"example.com/project/gen/pb"
)

func show(m *pb.Person) {
	fmt.Println(m.Name)
	m.Count = 1
}
"#,
    );
    let program = [
        PackageInput {
            path: "gen/pb".to_string(),
            files: vec![SourceUnit {
                arena: &pb.arena,
                root: pb.root,
            }],
        },
        PackageInput {
            path: "app".to_string(),
            files: vec![SourceUnit {
                arena: &app.arena,
                root: app.root,
            }],
        },
    ];
    let mut types = resolve_program(&program);
    let marker = CheckerOptions::default().marker_interface(&mut types.interner);
    let state = CheckerState::new(
        &app.arena,
        types.type_info(1, 0).unwrap(),
        "app/main.go",
        marker,
    );
    let diagnostics = state.check_source_file(app.root).unwrap();
    assert_eq!(messages(&diagnostics), vec!["protoget: \"m.Name\""]);
    assert_eq!(diagnostics[0].file, "app/main.go");
}

// =============================================================================
// Reads inside control flow, literals and closures
// =============================================================================

#[test]
fn test_read_after_infinite_for_is_reported() {
    let source = with_body("\tfor {\n\t}\n\tfmt.Println(m.Name)");
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
}

#[test]
fn test_reads_in_three_clause_for_are_reported() {
    let source = with_body("\tfor i := 0; i < m.Count; i++ {\n\t\tfmt.Println(m.Name, i)\n\t}");
    assert_eq!(
        messages(&check(&source)),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Count\"",
            "protoget: \"m.Name\""
        ]
    );
}

#[test]
fn test_reads_in_range_body_are_reported() {
    let source = with_body("\tfor _, tag := range m.Tags {\n\t\tfmt.Println(tag, m.Name)\n\t}");
    assert_eq!(
        messages(&check(&source)),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Tags\"",
            "protoget: \"m.Name\""
        ]
    );
}

#[test]
fn test_range_values_over_message_slices_are_typed() {
    let source = with_body(
        "\tpeople := []*Person{m}\n\tfor i, p := range people {\n\t\tfmt.Println(i, p.Count)\n\t}",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"p.Count\""]
    );
}

#[test]
fn test_range_assignment_target_is_not_reported() {
    let source = with_body("\tfor _, m.Name = range m.Tags {\n\t}");
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Tags\""]
    );
}

#[test]
fn test_read_after_composite_literal_construction_is_reported() {
    let source = with_body("\tp := &Person{Name: \"a\"}\n\tfmt.Println(p.Name)");
    let diagnostics = check(&source);
    assert_eq!(
        messages(&diagnostics),
        vec!["protoget: \"x.Name\"", "protoget: \"p.Name\""]
    );
    // The key `Name:` is a field name, not an access.
    assert_eq!(
        diagnostics[1].start as usize,
        source.rfind("p.Name").unwrap()
    );
}

#[test]
fn test_elided_element_literals_take_the_element_type() {
    let source = with_body(
        "\tpeople := []*Person{{Name: \"a\"}, {Count: 2}}\n\tfmt.Println(people[1].Count)",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"people[1].Count\""]
    );
}

#[test]
fn test_map_index_with_comma_ok_is_typed() {
    let source = with_body(
        "\tbyName := map[string]*Person{\"a\": m}\n\tif p, ok := byName[\"a\"]; ok {\n\t\tfmt.Println(p.Name)\n\t}",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"p.Name\""]
    );
}

#[test]
fn test_reads_in_switch_are_reported() {
    let source = with_body(
        "\tswitch m.Count {\n\tcase 1:\n\t\tfmt.Println(m.Name)\n\tdefault:\n\t}",
    );
    assert_eq!(
        messages(&check(&source)),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Count\"",
            "protoget: \"m.Name\""
        ]
    );
}

#[test]
fn test_type_switch_binding_takes_the_case_type() {
    let source = with_body(
        "\tvar v interface{} = m\n\tswitch p := v.(type) {\n\tcase *Person:\n\t\tfmt.Println(p.Name)\n\tcase *Inner, nil:\n\t\tfmt.Println(p)\n\t}",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"p.Name\""]
    );
}

#[test]
fn test_defer_and_go_calls_are_checked() {
    let source = with_body("\tdefer fmt.Println(m.Name)\n\tgo fmt.Println(m.Count)");
    assert_eq!(
        messages(&check(&source)),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Name\"",
            "protoget: \"m.Count\""
        ]
    );
}

#[test]
fn test_reads_in_function_literals_are_reported() {
    let source = with_body(
        "\tf := func() string { return m.Name }\n\tshow := func(p *Person) {\n\t\tfmt.Println(p.Count)\n\t}\n\tshow(m)\n\tfmt.Println(f())",
    );
    assert_eq!(
        messages(&check(&source)),
        vec![
            "protoget: \"x.Name\"",
            "protoget: \"m.Name\"",
            "protoget: \"p.Count\""
        ]
    );
}

#[test]
fn test_select_receive_binding_is_typed() {
    let source = with_body(
        "\tch := make(chan *Person, 1)\n\tch <- m\n\tselect {\n\tcase p := <-ch:\n\t\tfmt.Println(p.Name)\n\tdefault:\n\t}",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"p.Name\""]
    );
}

#[test]
fn test_read_after_const_declaration_is_reported() {
    let source = with_body("\tconst k = 1\n\tfmt.Println(m.Name, k)");
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
}

#[test]
fn test_statements_after_braced_constructs_are_checked() {
    let source = with_body(
        "\tif m == nil {\n\t\treturn\n\t}\n\tfor i := 0; i < 2; i++ {\n\t}\n\tswitch {\n\t}\n\tfmt.Println(m.Name)",
    );
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
}

#[test]
fn test_syntax_error_inside_a_block_keeps_the_function_open() {
    let source = with_body("\tfor {\n\t\tx := )\n\t}\n\tfmt.Println(m.Name)");
    let mut parser = ParserState::new("test.go".to_string(), source.clone());
    parser.parse_source_file();
    assert_eq!(parser.get_diagnostics().len(), 1, "{:?}", parser.get_diagnostics());
    assert_eq!(
        messages(&check(&source)),
        vec!["protoget: \"x.Name\"", "protoget: \"m.Name\""]
    );
}
