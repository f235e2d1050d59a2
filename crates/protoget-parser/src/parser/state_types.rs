//! Parser state - type expression parsing methods

use super::state::ParserState;
use super::{
    NodeIndex, NodeList,
    node::{
        AccessExprData, ArrayTypeData, ChannelDirection, ChannelTypeData, FieldData, FunctionData,
        InterfaceTypeData, MapTypeData, StructTypeData, WrappedTypeData,
    },
    syntax_kind_ext,
};
use protoget_scanner::SyntaxKind;

impl ParserState {
    /// Parse a type: names, `pkg.T`, pointer, slice, array, map, channel,
    /// function, struct and interface types, or a parenthesized type.
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        let type_node = self.parse_type_worker();
        self.exit_recursion();
        type_node
    }

    fn parse_type_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => {
                let name = self.parse_identifier();
                if self.is_token(SyntaxKind::DotToken) {
                    self.parse_qualified_type_rest(name, start)
                } else {
                    name
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let type_node = self.parse_type();
                let end = self.previous_end;
                self.arena.add_wrapped_type(
                    syntax_kind_ext::POINTER_TYPE,
                    start,
                    end,
                    WrappedTypeData { type_node },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_or_slice_type(),
            SyntaxKind::MapKeyword => {
                self.next_token();
                self.parse_expected(SyntaxKind::OpenBracketToken);
                let key = self.nested(|p| p.parse_type());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                let value = self.parse_type();
                let end = self.previous_end;
                self.arena
                    .add_map_type(start, end, MapTypeData { key, value })
            }
            SyntaxKind::ChanKeyword => {
                self.next_token();
                let direction = if self.parse_optional(SyntaxKind::LessThanMinusToken) {
                    ChannelDirection::Send
                } else {
                    ChannelDirection::Both
                };
                let element = self.parse_type();
                let end = self.previous_end;
                self.arena.add_channel_type(
                    start,
                    end,
                    ChannelTypeData { direction, element },
                )
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                self.parse_expected(SyntaxKind::ChanKeyword);
                let element = self.parse_type();
                let end = self.previous_end;
                self.arena.add_channel_type(
                    start,
                    end,
                    ChannelTypeData {
                        direction: ChannelDirection::Receive,
                        element,
                    },
                )
            }
            SyntaxKind::FuncKeyword => self.parse_function_literal_or_type(false),
            SyntaxKind::StructKeyword => self.parse_struct_type(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.nested(|p| p.parse_type());
                self.parse_expected(SyntaxKind::CloseParenToken);
                inner
            }
            _ => {
                self.error_at_current("type expected".to_string());
                self.create_missing_identifier()
            }
        }
    }

    /// `[]T`, `[N]T` or `[...]T`; the current token is `[`.
    fn parse_array_or_slice_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::CloseBracketToken) {
            let type_node = self.parse_type();
            let end = self.previous_end;
            return self.arena.add_wrapped_type(
                syntax_kind_ext::SLICE_TYPE,
                start,
                end,
                WrappedTypeData { type_node },
            );
        }

        let length = if self.parse_optional(SyntaxKind::DotDotDotToken) {
            NodeIndex::NONE
        } else {
            self.nested(|p| p.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let element = self.parse_type();
        let end = self.previous_end;
        self.arena
            .add_array_type(start, end, ArrayTypeData { length, element })
    }

    /// A parameter type, which may be variadic (`...T`).
    pub(crate) fn parse_parameter_type(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_type();
        }
        let start = self.token_pos();
        self.next_token();
        let type_node = self.parse_type();
        let end = self.previous_end;
        self.arena.add_wrapped_type(
            syntax_kind_ext::VARIADIC_TYPE,
            start,
            end,
            WrappedTypeData { type_node },
        )
    }

    /// Finish `pkg.T` once `pkg` has been consumed; the current token is `.`.
    pub(crate) fn parse_qualified_type_rest(&mut self, package: NodeIndex, start: u32) -> NodeIndex {
        self.next_token();
        let name = self.parse_identifier();
        let end = self.previous_end;
        self.arena.add_access_expr(
            syntax_kind_ext::SELECTOR_EXPRESSION,
            start,
            end,
            AccessExprData {
                expression: package,
                name_or_argument: name,
            },
        )
    }

    fn parse_struct_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut fields = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let pos_before = self.token_pos();
            fields.push(self.parse_field_declaration());
            if self.token_pos() == pos_before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.previous_end;
        self.arena.add_struct_type(
            start,
            end,
            StructTypeData {
                fields: NodeList::from(fields),
            },
        )
    }

    /// `a, b T "tag"`, or an embedded `T`, `*T`, `pkg.T`.
    fn parse_field_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut names = Vec::new();

        let type_annotation = if self.is_token(SyntaxKind::Identifier) {
            let first = self.parse_identifier();
            if self.is_token(SyntaxKind::DotToken) {
                self.parse_qualified_type_rest(first, start)
            } else if matches!(
                self.token(),
                SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::StringLiteral
            ) {
                first
            } else {
                names.push(first);
                while self.parse_optional(SyntaxKind::CommaToken) {
                    names.push(self.parse_identifier());
                }
                self.parse_type()
            }
        } else {
            self.parse_type()
        };
        let end = self.previous_end;

        // Struct tags carry no type information.
        self.parse_optional(SyntaxKind::StringLiteral);

        let field = self.arena.add_field(
            syntax_kind_ext::FIELD_DECLARATION,
            start,
            end,
            FieldData {
                names: NodeList::from(names),
                type_annotation,
            },
        );
        self.parse_statement_terminator();
        field
    }

    fn parse_interface_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let pos_before = self.token_pos();
            members.push(self.parse_interface_member());
            self.parse_statement_terminator();
            if self.token_pos() == pos_before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.previous_end;
        self.arena.add_interface_type(
            start,
            end,
            InterfaceTypeData {
                members: NodeList::from(members),
            },
        )
    }

    /// `Name(params) results`, or an embedded interface name.
    fn parse_interface_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.is_token(SyntaxKind::Identifier) {
            return self.parse_type();
        }
        let name = self.parse_identifier();
        if self.is_token(SyntaxKind::DotToken) {
            return self.parse_qualified_type_rest(name, start);
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return name;
        }

        let parameters = self.parse_parameter_list();
        let results = self.parse_results();
        let end = self.previous_end;
        self.arena.add_function(
            syntax_kind_ext::METHOD_SIGNATURE,
            start,
            end,
            FunctionData {
                receiver: NodeIndex::NONE,
                name,
                parameters,
                results,
                body: NodeIndex::NONE,
            },
        )
    }
}
