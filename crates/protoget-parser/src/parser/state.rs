//! Parser state: token cursor, arena under construction, and collected
//! parse diagnostics.

use protoget_common::{Diagnostic, Span};
use protoget_scanner::{Scanner, SyntaxKind};

use super::NodeIndex;
use super::node::{IdentifierData, NodeArena};

/// Deeper nesting than this is reported instead of overflowing the stack.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 256;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

impl ParseDiagnostic {
    /// Convert into a reportable diagnostic for `file`.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        Diagnostic::error(
            file,
            Span::new(self.start, self.start + self.length),
            self.message.clone(),
            "parser",
        )
    }
}

pub struct ParserState {
    pub(crate) scanner: Scanner,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) current_token: SyntaxKind,
    pub(crate) recursion_depth: u32,
    /// End of the most recently consumed token.
    pub(crate) previous_end: u32,
    /// Negative inside control clause headers, where `T {` opens the body
    /// rather than a composite literal. Brackets raise it again.
    pub(crate) expr_level: i32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        ParserState {
            scanner: Scanner::new(source_text),
            arena: NodeArena::new(),
            file_name,
            parse_diagnostics: Vec::new(),
            current_token: SyntaxKind::Unknown,
            recursion_depth: 0,
            previous_end: 0,
            expr_level: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_end = self.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        u32_from_usize(self.scanner.token_pos())
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        u32_from_usize(self.scanner.token_end())
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.token_value().to_string()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report that it was expected.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let expected = kind.text().unwrap_or(match kind {
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            _ => "token",
        });
        self.error_at_current(format!("'{expected}' expected"));
        false
    }

    /// Statements end with `;` (explicit or inserted) unless the enclosing
    /// block closes on the same line.
    pub(crate) fn parse_statement_terminator(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::CloseParenToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
        {
            return;
        }
        self.error_at_current("';' expected".to_string());
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, message: String) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        // One error per position keeps cascades out of the report.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        tracing::debug!(file = %self.file_name, start, %message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
        });
    }

    pub(crate) fn error_at_span(&mut self, start: u32, end: u32, message: String) {
        tracing::debug!(file = %self.file_name, start, %message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length: end.saturating_sub(start),
            message,
        });
    }

    /// Skip to the end of the current statement. Bracketed groups are
    /// skipped whole, so a `}` inside one never ends the enclosing block.
    pub(crate) fn resync_statement(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken if depth == 0 => return,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => depth = depth.saturating_sub(1),
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                _ => {}
            }
            self.next_token();
        }
    }

    /// Run `parse` one bracket level deeper, where composite literals are
    /// unambiguous again.
    pub(crate) fn nested<T>(&mut self, parse: impl FnOnce(&mut ParserState) -> T) -> T {
        self.expr_level += 1;
        let result = parse(self);
        self.expr_level -= 1;
        result
    }

    /// Run `parse` as a control clause header.
    pub(crate) fn in_control_clause<T>(
        &mut self,
        parse: impl FnOnce(&mut ParserState) -> T,
    ) -> T {
        let saved = self.expr_level;
        self.expr_level = -1;
        let result = parse(self);
        self.expr_level = saved;
        result
    }

    /// Placeholder identifier for a missing name or expression.
    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_identifier(
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        )
    }

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current("expression nested too deeply".to_string());
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}

#[inline]
pub(crate) fn u32_from_usize(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
