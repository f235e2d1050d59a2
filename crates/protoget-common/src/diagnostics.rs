//! Diagnostic types shared by the parser, checker and reporters.
//!
//! A `Diagnostic` is a finding at a byte range of one file. Checker findings
//! carry exactly one `SuggestedFix`; parse errors carry none.

use serde::Serialize;

use crate::span::Span;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A single replacement of the byte range `[start, end)` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            start: span.start,
            end: span.end,
            new_text: new_text.into(),
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A named group of edits that resolves a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuggestedFix {
    pub message: String,
    pub text_edits: Vec<TextEdit>,
}

/// A diagnostic message with optional suggested fixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    /// Name of the pass that produced the diagnostic (`"protoget"`, `"parser"`).
    pub source: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggested_fixes: Vec<SuggestedFix>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        span: Span,
        message: impl Into<String>,
        source: &'static str,
    ) -> Self {
        Self {
            file: file.into(),
            start: span.start,
            length: span.len(),
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            source,
            suggested_fixes: Vec::new(),
        }
    }

    /// Attach a suggested fix to this diagnostic.
    #[must_use]
    pub fn with_fix(mut self, message: impl Into<String>, text_edits: Vec<TextEdit>) -> Self {
        self.suggested_fixes.push(SuggestedFix {
            message: message.into(),
            text_edits,
        });
        self
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }
}

/// Quote `text` the way Go's `%q` verb does: wrap in double quotes, use the
/// named escapes (`\a \b \f \n \r \t \v`), escape quotes and backslashes,
/// and write other non-printable characters as `\xHH`, `\uHHHH` or
/// `\UHHHHHHHH`.
///
/// Non-printable means a control, format, private-use or separator
/// character other than the ASCII space. Unassigned code points are
/// written as is.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if is_printable(c) => out.push(c),
            c if (c as u32) < 0x80 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if (c as u32) < 0x10000 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push_str(&format!("\\U{:08x}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// Format characters (general category Cf).
const FORMAT_RANGES: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x0890, 0x0891),
    (0x08E2, 0x08E2),
    (0x180E, 0x180E),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x2064),
    (0x2066, 0x206F),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
];

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    let code = c as u32;
    let private_use = matches!(code, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD);
    !private_use
        && FORMAT_RANGES
            .iter()
            .all(|&(lo, hi)| code < lo || code > hi)
}
