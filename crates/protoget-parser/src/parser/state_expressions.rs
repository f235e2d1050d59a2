//! Parser state - expression parsing methods

use super::state::ParserState;
use super::{
    NodeIndex, NodeList,
    node::{
        AccessExprData, BinaryExprData, CallExprData, CompositeLiteralData, FunctionData,
        IdentifierData, KeyValueData, LiteralData, ParenthesizedData, SliceExprData,
        TypeAssertionData, UnaryExprData,
    },
    syntax_kind_ext,
};
use protoget_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_binary_expression(1)
    }

    pub(crate) fn parse_expression_list(&mut self) -> NodeList {
        let mut expressions = vec![self.parse_expression()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            expressions.push(self.parse_expression());
        }
        NodeList::from(expressions)
    }

    /// Precedence climbing; all binary operators are left-associative.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();

        loop {
            let operator = self.token();
            let Some(precedence) = operator.binary_precedence() else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            let end = self.previous_end;
            left = self.arena.add_binary_expr(
                start,
                end,
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }

        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let operator = self.token();
        if !operator.is_unary_operator() {
            return self.parse_primary_expression();
        }

        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let start = self.token_pos();
        self.next_token();
        let operand = self.parse_unary_expression();
        self.exit_recursion();

        let end = self.previous_end;
        self.arena.add_unary_expr(
            start,
            end,
            UnaryExprData {
                operator: operator as u16,
                operand,
            },
        )
    }

    /// Operand followed by any chain of `.name`, `.(T)`, `[index]`,
    /// `[lo:hi]`, `(args)` and `{elements}`.
    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_operand();

        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    if self.is_token(SyntaxKind::OpenParenToken) {
                        expression = self.parse_type_assertion_rest(expression, start);
                        continue;
                    }
                    let name = self.parse_identifier();
                    let end = self.previous_end;
                    expression = self.arena.add_access_expr(
                        syntax_kind_ext::SELECTOR_EXPRESSION,
                        start,
                        end,
                        AccessExprData {
                            expression,
                            name_or_argument: name,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_index_or_slice(expression, start);
                }
                SyntaxKind::OpenParenToken => {
                    let (arguments, spread) = self.parse_arguments();
                    let end = self.previous_end;
                    expression = self.arena.add_call_expr(
                        start,
                        end,
                        CallExprData {
                            expression,
                            arguments,
                            spread,
                        },
                    );
                }
                SyntaxKind::OpenBraceToken if self.starts_composite_literal(expression) => {
                    expression = self.parse_composite_literal_body(expression, start);
                }
                _ => break,
            }
        }

        expression
    }

    /// `T{` starts a literal when `T` can name a composite type. A bare
    /// type name is ambiguous with a block inside control clause headers.
    fn starts_composite_literal(&self, expression: NodeIndex) -> bool {
        let Some(node) = self.arena.get(expression) else {
            return false;
        };
        let is_type_name = match node.kind {
            k if k == SyntaxKind::Identifier as u16 => true,
            syntax_kind_ext::SELECTOR_EXPRESSION => self
                .arena
                .get_access_expr(node)
                .and_then(|s| self.arena.kind_of(s.expression))
                .is_some_and(|k| k == SyntaxKind::Identifier as u16),
            syntax_kind_ext::ARRAY_TYPE
            | syntax_kind_ext::SLICE_TYPE
            | syntax_kind_ext::MAP_TYPE
            | syntax_kind_ext::STRUCT_TYPE => return true,
            _ => return false,
        };
        is_type_name && self.expr_level >= 0
    }

    /// `.(T)` or `.(type)`; the current token is `(`.
    fn parse_type_assertion_rest(&mut self, expression: NodeIndex, start: u32) -> NodeIndex {
        self.next_token();
        let type_node = if self.parse_optional(SyntaxKind::TypeKeyword) {
            NodeIndex::NONE
        } else {
            self.nested(|p| p.parse_type())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let end = self.previous_end;
        self.arena.add_type_assertion(
            start,
            end,
            TypeAssertionData {
                expression,
                type_node,
            },
        )
    }

    fn parse_index_or_slice(&mut self, expression: NodeIndex, start: u32) -> NodeIndex {
        self.next_token();
        let (low, bounds) = self.nested(|p| {
            let low = if p.is_token(SyntaxKind::ColonToken) {
                NodeIndex::NONE
            } else {
                p.parse_expression()
            };
            if !p.parse_optional(SyntaxKind::ColonToken) {
                return (low, None);
            }
            let high = if matches!(
                p.token(),
                SyntaxKind::ColonToken | SyntaxKind::CloseBracketToken
            ) {
                NodeIndex::NONE
            } else {
                p.parse_expression()
            };
            let max = if p.parse_optional(SyntaxKind::ColonToken) {
                p.parse_expression()
            } else {
                NodeIndex::NONE
            };
            (low, Some((high, max)))
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.previous_end;

        match bounds {
            Some((high, max)) => self.arena.add_slice_expr(
                start,
                end,
                SliceExprData {
                    expression,
                    low,
                    high,
                    max,
                },
            ),
            None => self.arena.add_access_expr(
                syntax_kind_ext::INDEX_EXPRESSION,
                start,
                end,
                AccessExprData {
                    expression,
                    name_or_argument: low,
                },
            ),
        }
    }

    fn parse_arguments(&mut self) -> (NodeList, bool) {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut spread = false;
        let arguments = self.nested(|p| {
            let mut arguments = Vec::new();
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                arguments.push(p.parse_expression());
                if p.parse_optional(SyntaxKind::DotDotDotToken) {
                    spread = true;
                }
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            arguments
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        (NodeList::from(arguments), spread)
    }

    /// `{ elements }` after the literal type; `type_node` is `NONE` for an
    /// elided element literal.
    fn parse_composite_literal_body(&mut self, type_node: NodeIndex, start: u32) -> NodeIndex {
        if !self.enter_recursion() {
            self.resync_statement();
            return self.create_missing_identifier();
        }
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.nested(|p| {
            let mut elements = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                elements.push(p.parse_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            elements
        });
        if self.is_token(SyntaxKind::SemicolonToken) && self.scanner.token_value().is_empty() {
            self.error_at_current("missing ',' before newline in composite literal".to_string());
            self.next_token();
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();

        let end = self.previous_end;
        self.arena.add_composite_literal(
            start,
            end,
            CompositeLiteralData {
                type_node,
                elements: NodeList::from(elements),
            },
        )
    }

    fn parse_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let key = self.parse_element_value();
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return key;
        }
        let value = self.parse_element_value();
        let end = self.previous_end;
        self.arena
            .add_key_value(start, end, KeyValueData { key, value })
    }

    fn parse_element_value(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            let start = self.token_pos();
            self.parse_composite_literal_body(NodeIndex::NONE, start)
        } else {
            self.parse_expression()
        }
    }

    fn parse_operand(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::OpenParenToken => {
                if !self.enter_recursion() {
                    return self.create_missing_identifier();
                }
                let start = self.token_pos();
                self.next_token();
                let expression = self.nested(|p| p.parse_expression());
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.exit_recursion();

                let end = self.previous_end;
                self.arena
                    .add_parenthesized(start, end, ParenthesizedData { expression })
            }
            SyntaxKind::FuncKeyword => self.parse_function_literal_or_type(true),
            // Conversions and composite literal types: `[]byte(s)`,
            // `map[string]int{}`, `struct{}{}`.
            SyntaxKind::OpenBracketToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => self.parse_type(),
            _ => {
                self.error_at_current("expression expected".to_string());
                self.create_missing_identifier()
            }
        }
    }

    /// `func(params) results { body }`, or a bare function type when no
    /// body follows. In type position `allow_body` is false so `[]func(){`
    /// opens the literal's elements.
    pub(crate) fn parse_function_literal_or_type(&mut self, allow_body: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let parameters = self.parse_parameter_list();
        let results = self.parse_results();

        let (kind, body) = if allow_body && self.is_token(SyntaxKind::OpenBraceToken) {
            if !self.enter_recursion() {
                self.resync_statement();
                return self.create_missing_identifier();
            }
            let body = self.nested(|p| p.parse_block());
            self.exit_recursion();
            (syntax_kind_ext::FUNCTION_EXPRESSION, body)
        } else {
            (syntax_kind_ext::FUNCTION_TYPE, NodeIndex::NONE)
        };

        let end = self.previous_end;
        self.arena.add_function(
            kind,
            start,
            end,
            FunctionData {
                receiver: NodeIndex::NONE,
                name: NodeIndex::NONE,
                parameters,
                results,
                body,
            },
        )
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::Identifier) {
            self.parse_expected(SyntaxKind::Identifier);
            return self.create_missing_identifier();
        }
        let (pos, end) = (self.token_pos(), self.token_end());
        let escaped_text = self.token_value();
        self.next_token();
        self.arena
            .add_identifier(pos, end, IdentifierData { escaped_text })
    }

    fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token();
        let (pos, end) = (self.token_pos(), self.token_end());
        let raw_text = self
            .scanner
            .source_text()
            .get(pos as usize..end as usize)
            .unwrap_or_default()
            .to_string();
        let value = self.token_value();
        self.next_token();
        self.arena
            .add_literal(kind as u16, pos, end, LiteralData { raw_text, value })
    }
}
