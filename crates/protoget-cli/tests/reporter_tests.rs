use protoget_common::{Diagnostic, Span, TextEdit};
use protoget_cli::reporter::Reporter;

const FILE: &str = "app/main.go";
const SOURCE: &str = "package main\n\nfunc show(m *pb.Person) {\n\tfmt.Println(m.Name)\n}\n";

fn finding() -> Diagnostic {
    let start = SOURCE.find("m.Name").unwrap() as u32;
    Diagnostic::error(
        FILE,
        Span::new(start, start + 6),
        "protoget: \"m.Name\"",
        "protoget",
    )
    .with_fix(
        "Use the getter instead",
        vec![TextEdit::replace(
            Span::new(start + 2, start + 6),
            "GetName()",
        )],
    )
}

fn reporter() -> Reporter {
    let mut reporter = Reporter::new(false);
    reporter.add_source(FILE, SOURCE);
    reporter
}

#[test]
fn text_output_has_location_snippet_and_fix() {
    let output = reporter().render(&[finding()]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "app/main.go:4:14 - error protoget: protoget: \"m.Name\"");
    assert_eq!(lines[1], "    4       fmt.Println(m.Name)");
    assert_eq!(lines[2], format!("{}~~~~~~", " ".repeat(24)));
    assert_eq!(lines[3], "        Use the getter instead: m.GetName()");
    assert_eq!(lines[4], "Found 1 problem.");
}

#[test]
fn diagnostics_without_fixes_or_sources() {
    let parse_error = Diagnostic::error("missing.go", Span::new(3, 4), "'(' expected", "parser");
    let output = reporter().render(&[parse_error]);
    assert_eq!(output, "missing.go - error parser: '(' expected\nFound 1 problem.\n");
}

#[test]
fn empty_report_is_empty() {
    assert_eq!(reporter().render(&[]), "");
}

#[test]
fn json_output_has_one_based_positions() {
    let json = reporter().render_json(&[finding()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let entry = &value[0];
    assert_eq!(entry["file"], FILE);
    assert_eq!(entry["category"], "error");
    assert_eq!(entry["source"], "protoget");
    assert_eq!(entry["message"], "protoget: \"m.Name\"");
    assert_eq!(entry["start"]["line"], 4);
    assert_eq!(entry["start"]["column"], 14);
    assert_eq!(entry["end"]["column"], 20);

    let edit = &entry["fixes"][0]["edits"][0];
    assert_eq!(entry["fixes"][0]["message"], "Use the getter instead");
    assert_eq!(edit["newText"], "GetName()");
    assert_eq!(edit["start"]["column"], 16);
}
