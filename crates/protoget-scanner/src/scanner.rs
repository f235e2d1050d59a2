//! On-demand tokenizer.
//!
//! The parser pulls one token at a time with `scan()`. Comments and
//! whitespace are skipped; a newline after a statement-ending token is turned
//! into a `SemicolonToken` whose text is empty.

use std::sync::Arc;

use crate::SyntaxKind;

/// A lexical error (unterminated literal, stray character).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
}

pub struct Scanner {
    text: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    /// Previous significant token, for semicolon insertion.
    last_significant: SyntaxKind,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl Scanner {
    pub fn new(text: impl Into<Arc<str>>) -> Scanner {
        Scanner {
            text: text.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            last_significant: SyntaxKind::Unknown,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        if self.token == SyntaxKind::SemicolonToken && self.token_value.is_empty() {
            // Inserted semicolons are zero-width.
            self.token_start
        } else {
            self.pos
        }
    }

    /// Identifier name or decoded literal value of the current token.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value.clear();

        if self.skip_trivia() && self.last_significant.ends_statement_at_newline() {
            return self.finish_implicit_semicolon();
        }

        self.token_start = self.pos;
        let Some(ch) = self.peek_char() else {
            if self.last_significant.ends_statement_at_newline() {
                return self.finish_implicit_semicolon();
            }
            return self.finish(SyntaxKind::EndOfFileToken);
        };

        let kind = match ch {
            c if is_identifier_start(c) => self.scan_identifier(),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_leading_dot_number()
            }
            '"' => self.scan_interpreted_string(),
            '\'' => self.scan_rune(),
            '`' => self.scan_raw_string(),
            _ => self.scan_punctuation(ch),
        };
        self.finish(kind)
    }

    fn finish(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.token = kind;
        self.last_significant = kind;
        kind
    }

    fn finish_implicit_semicolon(&mut self) -> SyntaxKind {
        self.token_start = self.pos;
        self.token = SyntaxKind::SemicolonToken;
        self.last_significant = SyntaxKind::SemicolonToken;
        SyntaxKind::SemicolonToken
    }

    /// Skip whitespace and comments. Returns true when a line break was
    /// crossed (including one inside a block comment).
    fn skip_trivia(&mut self) -> bool {
        let mut saw_newline = false;
        while let Some(ch) = self.peek_char() {
            match ch {
                '\n' => {
                    // Stop at the newline so the inserted semicolon sits at
                    // the end of the line that needs it.
                    if self.last_significant.ends_statement_at_newline() {
                        return true;
                    }
                    saw_newline = true;
                    self.pos += 1;
                }
                ' ' | '\t' | '\r' => self.pos += 1,
                '/' if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += c.len_utf8();
                    }
                }
                '/' if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    let mut closed = false;
                    while let Some(c) = self.peek_char() {
                        if c == '*' && self.peek_at(1) == Some('/') {
                            self.pos += 2;
                            closed = true;
                            break;
                        }
                        if c == '\n' {
                            saw_newline = true;
                        }
                        self.pos += c.len_utf8();
                    }
                    if !closed {
                        self.error(start, self.pos - start, "comment not terminated");
                    }
                }
                _ => break,
            }
        }
        if saw_newline && self.last_significant.ends_statement_at_newline() {
            return true;
        }
        saw_newline
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let text = &self.text[start..self.pos];
        if let Some(keyword) = SyntaxKind::from_keyword(text) {
            return keyword;
        }
        self.token_value.push_str(text);
        SyntaxKind::Identifier
    }

    /// Integer or floating-point literal. Hex, octal and binary prefixes,
    /// digit separators and exponents are accepted; the value keeps the
    /// source spelling.
    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let hex = self.peek_char() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        if hex {
            self.pos += 2;
        }
        let is_digit = |c: char| {
            if hex {
                c.is_ascii_hexdigit() || c == '_'
            } else {
                c.is_ascii_alphanumeric() && !matches!(c, 'e' | 'E' | 'i') || c == '_'
            }
        };
        self.eat_while(is_digit);
        if self.peek_char() == Some('.') {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            self.eat_while(is_digit);
        }
        let exponent: &[char] = if hex { &['p', 'P'] } else { &['e', 'E'] };
        if self.peek_char().is_some_and(|c| exponent.contains(&c)) {
            kind = SyntaxKind::FloatLiteral;
            self.pos += 1;
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.pos += 1;
            }
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        // Imaginary suffix.
        if self.peek_char() == Some('i') {
            self.pos += 1;
            kind = SyntaxKind::FloatLiteral;
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        kind
    }

    /// Float literal written with a leading dot, such as `.5`.
    fn scan_leading_dot_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        self.eat_while(|c| c.is_ascii_digit() || c == '_');
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.pos += 1;
            }
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        if self.peek_char() == Some('i') {
            self.pos += 1;
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::FloatLiteral
    }

    fn eat_while(&mut self, mut accept: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !accept(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn scan_interpreted_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                self.error(start, self.pos - start, "string literal not terminated");
                break;
            };
            if c == '\n' {
                self.error(start, self.pos - start, "string literal not terminated");
                break;
            }
            self.pos += c.len_utf8();
            match c {
                '"' => break,
                '\\' => {
                    if let Some(decoded) = self.scan_escape('"') {
                        value.push(decoded);
                    }
                }
                other => value.push(other),
            }
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Rune literal such as `'a'` or `'\n'`. The value is the decoded
    /// character.
    fn scan_rune(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut count = 0;
        loop {
            let Some(c) = self.peek_char() else {
                self.error(start, self.pos - start, "rune literal not terminated");
                break;
            };
            if c == '\n' {
                self.error(start, self.pos - start, "rune literal not terminated");
                break;
            }
            self.pos += c.len_utf8();
            match c {
                '\'' => {
                    if count != 1 {
                        self.error(start, self.pos - start, "invalid rune literal");
                    }
                    break;
                }
                '\\' => {
                    if let Some(decoded) = self.scan_escape('\'') {
                        self.token_value.push(decoded);
                    }
                    count += 1;
                }
                other => {
                    self.token_value.push(other);
                    count += 1;
                }
            }
        }
        SyntaxKind::RuneLiteral
    }

    /// Decode the escape sequence after a backslash. `quote` is the
    /// delimiter that may be escaped in this literal.
    fn scan_escape(&mut self, quote: char) -> Option<char> {
        let start = self.pos - 1;
        let escaped = self.peek_char()?;
        self.pos += escaped.len_utf8();
        let simple = match escaped {
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{b}'),
            '\\' => Some('\\'),
            c if c == quote => Some(c),
            _ => None,
        };
        if simple.is_some() {
            return simple;
        }
        let (digits, radix) = match escaped {
            'x' => (2, 16),
            'u' => (4, 16),
            'U' => (8, 16),
            '0'..='7' => {
                self.pos -= 1;
                (3, 8)
            }
            _ => {
                self.error(start, self.pos - start, "unknown escape sequence");
                return None;
            }
        };
        let digits_start = self.pos;
        for _ in 0..digits {
            match self.peek_char() {
                Some(c) if c.is_digit(radix) => self.pos += 1,
                _ => {
                    self.error(start, self.pos - start, "invalid escape sequence");
                    return None;
                }
            }
        }
        let code = u32::from_str_radix(&self.text[digits_start..self.pos], radix).ok()?;
        let decoded = char::from_u32(code);
        if decoded.is_none() {
            self.error(start, self.pos - start, "escape sequence is invalid Unicode code point");
        }
        decoded
    }

    fn scan_raw_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            let Some(c) = self.peek_char() else {
                self.error(start, self.pos - start, "raw string literal not terminated");
                self.token_value.push_str(&self.text[content_start..self.pos]);
                return SyntaxKind::StringLiteral;
            };
            if c == '`' {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value.push_str(&self.text[content_start..self.pos]);
        self.pos += 1;
        SyntaxKind::StringLiteral
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;
        let next = self.peek_at(1);
        let third = self.peek_at(2);
        let (kind, width) = match (ch, next) {
            ('(', _) => (OpenParenToken, 1),
            (')', _) => (CloseParenToken, 1),
            ('{', _) => (OpenBraceToken, 1),
            ('}', _) => (CloseBraceToken, 1),
            ('[', _) => (OpenBracketToken, 1),
            (']', _) => (CloseBracketToken, 1),
            (',', _) => (CommaToken, 1),
            ('.', Some('.')) if third == Some('.') => (DotDotDotToken, 3),
            ('.', _) => (DotToken, 1),
            (';', _) => (SemicolonToken, 1),
            (':', Some('=')) => (ColonEqualsToken, 2),
            (':', _) => (ColonToken, 1),
            ('+', Some('+')) => (PlusPlusToken, 2),
            ('+', Some('=')) => (PlusEqualsToken, 2),
            ('+', _) => (PlusToken, 1),
            ('-', Some('-')) => (MinusMinusToken, 2),
            ('-', Some('=')) => (MinusEqualsToken, 2),
            ('-', _) => (MinusToken, 1),
            ('*', Some('=')) => (AsteriskEqualsToken, 2),
            ('*', _) => (AsteriskToken, 1),
            ('/', Some('=')) => (SlashEqualsToken, 2),
            ('/', _) => (SlashToken, 1),
            ('%', Some('=')) => (PercentEqualsToken, 2),
            ('%', _) => (PercentToken, 1),
            ('&', Some('&')) => (AmpersandAmpersandToken, 2),
            ('&', Some('^')) if third == Some('=') => (AmpersandCaretEqualsToken, 3),
            ('&', Some('^')) => (AmpersandCaretToken, 2),
            ('&', Some('=')) => (AmpersandEqualsToken, 2),
            ('&', _) => (AmpersandToken, 1),
            ('|', Some('|')) => (BarBarToken, 2),
            ('|', Some('=')) => (BarEqualsToken, 2),
            ('|', _) => (BarToken, 1),
            ('^', Some('=')) => (CaretEqualsToken, 2),
            ('^', _) => (CaretToken, 1),
            ('!', Some('=')) => (ExclamationEqualsToken, 2),
            ('!', _) => (ExclamationToken, 1),
            ('=', Some('=')) => (EqualsEqualsToken, 2),
            ('=', _) => (EqualsToken, 1),
            ('<', Some('<')) if third == Some('=') => (LessThanLessThanEqualsToken, 3),
            ('<', Some('<')) => (LessThanLessThanToken, 2),
            ('<', Some('-')) => (LessThanMinusToken, 2),
            ('<', Some('=')) => (LessThanEqualsToken, 2),
            ('<', _) => (LessThanToken, 1),
            ('>', Some('>')) if third == Some('=') => (GreaterThanGreaterThanEqualsToken, 3),
            ('>', Some('>')) => (GreaterThanGreaterThanToken, 2),
            ('>', Some('=')) => (GreaterThanEqualsToken, 2),
            ('>', _) => (GreaterThanToken, 1),
            (other, _) => {
                let width = other.len_utf8();
                self.error(self.pos, width, "invalid character");
                (Unknown, width)
            }
        };
        self.pos += width;
        if kind == SemicolonToken {
            self.token_value.push(';');
        }
        kind
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str) {
        tracing::trace!(pos, length, message, "scanner diagnostic");
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
        });
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
