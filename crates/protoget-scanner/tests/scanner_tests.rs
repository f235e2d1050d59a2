use protoget_scanner::{Scanner, SyntaxKind};

fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn scans_selector_assignment() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("m.Name = \"a\""),
        vec![
            Identifier,
            DotToken,
            Identifier,
            EqualsToken,
            StringLiteral,
            SemicolonToken
        ]
    );
}

#[test]
fn inserts_semicolon_after_statement_ending_tokens() {
    use SyntaxKind::*;
    let tokens = kinds("x := f()\ny++\nreturn\n}");
    assert_eq!(
        tokens,
        vec![
            Identifier,
            ColonEqualsToken,
            Identifier,
            OpenParenToken,
            CloseParenToken,
            SemicolonToken,
            Identifier,
            PlusPlusToken,
            SemicolonToken,
            ReturnKeyword,
            SemicolonToken,
            CloseBraceToken,
            SemicolonToken,
        ]
    );
}

#[test]
fn no_semicolon_after_operator_or_open_brace() {
    use SyntaxKind::*;
    let tokens = kinds("func f() {\n\ta := 1 +\n\t\t2\n}");
    assert_eq!(
        tokens,
        vec![
            FuncKeyword,
            Identifier,
            OpenParenToken,
            CloseParenToken,
            OpenBraceToken,
            Identifier,
            ColonEqualsToken,
            IntLiteral,
            PlusToken,
            IntLiteral,
            SemicolonToken,
            CloseBraceToken,
            SemicolonToken,
        ]
    );
}

#[test]
fn inserted_semicolon_is_zero_width() {
    let mut scanner = Scanner::new("a\nb");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
    assert_eq!(scanner.token_pos(), 1);
    assert_eq!(scanner.token_end(), 1);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_pos(), 2);
}

#[test]
fn comments_are_trivia() {
    use SyntaxKind::*;
    let tokens = kinds("a // trailing\n/* block\n */ b");
    assert_eq!(
        tokens,
        vec![Identifier, SemicolonToken, Identifier, SemicolonToken]
    );
}

#[test]
fn decodes_string_literals() {
    let tokens = scan_all(r#""a\"b\n" `raw\n`"#);
    assert_eq!(tokens[0], (SyntaxKind::StringLiteral, "a\"b\n".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::StringLiteral, "raw\\n".to_string()));
}

#[test]
fn keywords_are_recognised() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("package import type func var struct if else"),
        vec![
            PackageKeyword,
            ImportKeyword,
            TypeKeyword,
            FuncKeyword,
            VarKeyword,
            StructKeyword,
            IfKeyword,
            ElseKeyword
        ]
    );
}

#[test]
fn reports_invalid_characters() {
    let mut scanner = Scanner::new("a @ b");
    while scanner.scan() != SyntaxKind::EndOfFileToken {}
    let diags = scanner.get_scanner_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].pos, 2);
    assert_eq!(diags[0].message, "invalid character");
}

#[test]
fn token_kind_round_trips_through_u16() {
    for kind in [
        SyntaxKind::Identifier,
        SyntaxKind::ColonEqualsToken,
        SyntaxKind::ElseKeyword,
    ] {
        assert_eq!(SyntaxKind::from_u16(kind as u16), Some(kind));
    }
    assert_eq!(SyntaxKind::from_u16(SyntaxKind::LAST_TOKEN as u16 + 1), None);
}

#[test]
fn classifies_number_literals() {
    use SyntaxKind::*;
    let tokens = scan_all("1 2.5 .5 1e3 0x1F 0x1p-2 2i 1_000");
    let numbers: Vec<_> = tokens.iter().filter(|(k, _)| *k != SemicolonToken).cloned().collect();
    assert_eq!(
        numbers,
        vec![
            (IntLiteral, "1".to_string()),
            (FloatLiteral, "2.5".to_string()),
            (FloatLiteral, ".5".to_string()),
            (FloatLiteral, "1e3".to_string()),
            (IntLiteral, "0x1F".to_string()),
            (FloatLiteral, "0x1p-2".to_string()),
            (FloatLiteral, "2i".to_string()),
            (IntLiteral, "1_000".to_string()),
        ]
    );
}

#[test]
fn decodes_rune_literals() {
    let tokens = scan_all(r"'a' '\n' '\x41' 'é' '\''");
    let runes: Vec<_> = tokens
        .into_iter()
        .filter(|(k, _)| *k == SyntaxKind::RuneLiteral)
        .map(|(_, v)| v)
        .collect();
    assert_eq!(runes, vec!["a", "\n", "A", "\u{e9}", "'"]);
}

#[test]
fn rejects_empty_and_overlong_runes() {
    let mut scanner = Scanner::new("'' 'ab'");
    while scanner.scan() != SyntaxKind::EndOfFileToken {}
    let messages: Vec<_> = scanner
        .get_scanner_diagnostics()
        .iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(messages, vec!["invalid rune literal", "invalid rune literal"]);
}

#[test]
fn scans_channel_and_compound_operators() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("ch <- x &^= y <<= z ... &^"),
        vec![
            Identifier,
            LessThanMinusToken,
            Identifier,
            AmpersandCaretEqualsToken,
            Identifier,
            LessThanLessThanEqualsToken,
            Identifier,
            DotDotDotToken,
            AmpersandCaretToken
        ]
    );
}

#[test]
fn control_flow_keywords_are_recognised() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("for range switch case default defer go select const map chan goto"),
        vec![
            ForKeyword,
            RangeKeyword,
            SwitchKeyword,
            CaseKeyword,
            DefaultKeyword,
            DeferKeyword,
            GoKeyword,
            SelectKeyword,
            ConstKeyword,
            MapKeyword,
            ChanKeyword,
            GotoKeyword
        ]
    );
}
