use protoget_common::diagnostics::quote;
use protoget_common::{Diagnostic, DiagnosticCategory, Span, TextEdit};

#[test]
fn error_diagnostic_records_span() {
    let diag = Diagnostic::error("a.go", Span::new(10, 16), "protoget: \"m.Name\"", "protoget");

    assert_eq!(diag.start, 10);
    assert_eq!(diag.length, 6);
    assert_eq!(diag.end(), 16);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert!(diag.suggested_fixes.is_empty());
}

#[test]
fn with_fix_appends_single_fix() {
    let diag = Diagnostic::error("a.go", Span::new(10, 16), "msg", "protoget").with_fix(
        "Use the getter instead",
        vec![TextEdit::replace(Span::new(12, 16), "GetName()")],
    );

    assert_eq!(diag.suggested_fixes.len(), 1);
    let edit = &diag.suggested_fixes[0].text_edits[0];
    assert_eq!(edit.span(), Span::new(12, 16));
    assert_eq!(edit.new_text, "GetName()");
}

#[test]
fn quote_escapes_like_go() {
    assert_eq!(quote("m.Name"), "\"m.Name\"");
    assert_eq!(quote("f(\"a\").Name"), "\"f(\\\"a\\\").Name\"");
    assert_eq!(quote("a\\b\n"), "\"a\\\\b\\n\"");
    assert_eq!(quote("\u{1}"), "\"\\x01\"");
    assert_eq!(quote("héllo"), "\"héllo\"");
}

#[test]
fn quote_uses_named_escapes() {
    assert_eq!(quote("\u{7}\u{8}\u{c}\u{b}"), r#""\a\b\f\v""#);
    assert_eq!(quote("\r\t"), r#""\r\t""#);
    assert_eq!(quote("\u{7f}"), r#""\x7f""#);
}

#[test]
fn quote_escapes_invisible_unicode() {
    assert_eq!(quote("a\u{200b}b"), r#""a\u200bb""#);
    assert_eq!(quote("\u{feff}"), r#""\ufeff""#);
    assert_eq!(quote("\u{85}"), r#""\u0085""#);
    assert_eq!(quote("a\u{a0}b"), r#""a\u00a0b""#);
    assert_eq!(quote("\u{2028}"), r#""\u2028""#);
    assert_eq!(quote("\u{e000}"), r#""\ue000""#);
    assert_eq!(quote("\u{e0001}"), r#""\U000e0001""#);
    // Printable text outside ASCII stays as is.
    assert_eq!(quote("日本 ✓ 😀"), "\"日本 ✓ 😀\"");
}

#[test]
fn serializes_without_empty_fixes() {
    let diag = Diagnostic::error("a.go", Span::new(0, 1), "oops", "parser");
    let json = serde_json::to_value(&diag).unwrap();

    assert_eq!(json["category"], "error");
    assert_eq!(json["source"], "parser");
    assert!(json.get("suggested_fixes").is_none());
}
