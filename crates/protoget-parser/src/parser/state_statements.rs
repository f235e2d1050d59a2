//! Parser state - declaration and statement parsing methods

use super::state::{ParseDiagnostic, ParserState, u32_from_usize};
use super::{
    NodeIndex, NodeList,
    node::{
        AssignmentData, BlockData, BranchData, CaseClauseData, ExprStatementData, FieldData,
        ForData, FunctionData, IfStatementData, ImportDeclData, LabeledData, RangeData,
        ReturnData, SelectData, SendData, SourceFileData, SwitchData, TypeDeclData,
        VariableDeclData, VariableStatementData,
    },
    syntax_kind_ext,
};
use protoget_scanner::SyntaxKind;

/// A simple statement before it becomes a node. Control clause headers
/// inspect the parts: a range clause, a type switch guard or a label only
/// make sense in particular positions.
enum SimpleStatement {
    Expression {
        start: u32,
        expressions: NodeList,
    },
    Assignment {
        start: u32,
        left: NodeList,
        operator: SyntaxKind,
        right: NodeList,
    },
    Send {
        start: u32,
        channel: NodeIndex,
        value: NodeIndex,
    },
    Range {
        start: u32,
        left: NodeList,
        operator: SyntaxKind,
        expression: NodeIndex,
    },
}

/// One comma-separated entry of a parameter list before Go's grouping rule
/// decides whether a bare identifier is a name or a type.
struct ParamEntry {
    start: u32,
    name: NodeIndex,
    type_node: NodeIndex,
}

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse a source file and return its root node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let package_name = if self.parse_expected(SyntaxKind::PackageKeyword) {
            self.parse_identifier()
        } else {
            self.create_missing_identifier()
        };
        self.parse_statement_terminator();

        let mut statements = Vec::new();
        while self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_declarations(&mut statements);
        }

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let pos_before = self.token_pos();
            match self.token() {
                SyntaxKind::TypeKeyword => self.parse_type_declarations(&mut statements),
                SyntaxKind::FuncKeyword => statements.push(self.parse_function_declaration()),
                SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => {
                    statements.push(self.parse_variable_statement());
                }
                SyntaxKind::ImportKeyword => {
                    self.error_at_current(
                        "imports must appear before other declarations".to_string(),
                    );
                    self.parse_import_declarations(&mut statements);
                }
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                }
                _ => {
                    self.error_at_current("declaration expected".to_string());
                    self.resync_top_level();
                }
            }
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        for diag in self.scanner.get_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: u32_from_usize(diag.pos),
                length: u32_from_usize(diag.length),
                message: diag.message.to_string(),
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);

        let end = self.token_end();
        let text = self.scanner.source_text_arc();
        self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                package_name,
                statements: NodeList::from(statements),
                file_name: self.file_name.clone(),
                text,
            },
        )
    }

    /// Skip to the next declaration keyword outside any brackets.
    fn resync_top_level(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => depth = depth.saturating_sub(1),
                SyntaxKind::TypeKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::ImportKeyword
                    if depth == 0 =>
                {
                    break;
                }
                _ => {}
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_import_declarations(&mut self, out: &mut Vec<NodeIndex>) {
        let start = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::OpenParenToken) {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                if self.parse_optional(SyntaxKind::SemicolonToken) {
                    continue;
                }
                let pos_before = self.token_pos();
                out.push(self.parse_import_spec(pos_before));
                self.parse_statement_terminator();
                if self.token_pos() == pos_before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            out.push(self.parse_import_spec(start));
        }
        self.parse_statement_terminator();
    }

    fn parse_import_spec(&mut self, start: u32) -> NodeIndex {
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };

        let path = if self.is_token(SyntaxKind::StringLiteral) {
            let value = self.token_value();
            self.next_token();
            value
        } else {
            self.parse_expected(SyntaxKind::StringLiteral);
            String::new()
        };

        let end = self.previous_end;
        self.arena
            .add_import_decl(start, end, ImportDeclData { name, path })
    }

    /// `type T U`, `type T = U` or a grouped `type ( ... )`; each spec
    /// becomes one `TYPE_DECLARATION` in `out`.
    pub(crate) fn parse_type_declarations(&mut self, out: &mut Vec<NodeIndex>) {
        let start = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::OpenParenToken) {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                if self.parse_optional(SyntaxKind::SemicolonToken) {
                    continue;
                }
                let pos_before = self.token_pos();
                out.push(self.parse_type_spec(pos_before));
                self.parse_statement_terminator();
                if self.token_pos() == pos_before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            out.push(self.parse_type_spec(start));
        }
        self.parse_statement_terminator();
    }

    fn parse_type_spec(&mut self, start: u32) -> NodeIndex {
        let name = self.parse_identifier();
        // Aliases resolve like definitions.
        self.parse_optional(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        let end = self.previous_end;
        self.arena
            .add_type_decl(start, end, TypeDeclData { name, type_node })
    }

    fn parse_function_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let receiver = if self.is_token(SyntaxKind::OpenParenToken) {
            let receivers = self.parse_parameter_list();
            if receivers.len() != 1 {
                self.error_at_span(start, self.previous_end, "method has multiple receivers".to_string());
            }
            receivers.first().unwrap_or(NodeIndex::NONE)
        } else {
            NodeIndex::NONE
        };

        let name = self.parse_identifier();
        let parameters = self.parse_parameter_list();
        let results = self.parse_results();
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        let end = self.previous_end;
        let function = self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            start,
            end,
            FunctionData {
                receiver,
                name,
                parameters,
                results,
                body,
            },
        );
        self.parse_statement_terminator();
        function
    }

    /// Parse `( ... )` into `PARAMETER` nodes.
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return NodeList::new();
        }

        let mut entries = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let entry = if self.is_token(SyntaxKind::Identifier) {
                let ident = self.parse_identifier();
                if self.is_token(SyntaxKind::DotToken) {
                    let type_node = self.parse_qualified_type_rest(ident, start);
                    ParamEntry {
                        start,
                        name: NodeIndex::NONE,
                        type_node,
                    }
                } else if matches!(
                    self.token(),
                    SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
                ) {
                    ParamEntry {
                        start,
                        name: ident,
                        type_node: NodeIndex::NONE,
                    }
                } else {
                    let type_node = self.parse_parameter_type();
                    ParamEntry {
                        start,
                        name: ident,
                        type_node,
                    }
                }
            } else {
                let type_node = self.parse_parameter_type();
                ParamEntry {
                    start,
                    name: NodeIndex::NONE,
                    type_node,
                }
            };
            entries.push(entry);

            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);

        self.build_parameters(entries)
    }

    /// Apply Go's grouping rule: if any entry is `name Type`, bare
    /// identifiers are names sharing the next type (`a, b int`); otherwise
    /// every entry is an unnamed parameter type.
    fn build_parameters(&mut self, entries: Vec<ParamEntry>) -> NodeList {
        let named = entries
            .iter()
            .any(|e| e.name.is_some() && e.type_node.is_some());
        let mut params = Vec::new();

        if !named {
            for entry in entries {
                let type_node = if entry.type_node.is_some() {
                    entry.type_node
                } else {
                    entry.name
                };
                let end = self.arena.get(type_node).map_or(entry.start, |n| n.end);
                params.push(self.arena.add_field(
                    syntax_kind_ext::PARAMETER,
                    entry.start,
                    end,
                    FieldData {
                        names: NodeList::new(),
                        type_annotation: type_node,
                    },
                ));
            }
            return NodeList::from(params);
        }

        let mut pending: Vec<ParamEntry> = Vec::new();
        for entry in entries {
            if entry.type_node.is_none() {
                pending.push(entry);
                continue;
            }
            let start = pending.first().map_or(entry.start, |p| p.start);
            let mut names: Vec<NodeIndex> = pending.drain(..).map(|p| p.name).collect();
            if entry.name.is_some() {
                names.push(entry.name);
            } else {
                let end = self.arena.get(entry.type_node).map_or(entry.start, |n| n.end);
                self.error_at_span(
                    entry.start,
                    end,
                    "mixed named and unnamed parameters".to_string(),
                );
            }
            let end = self.arena.get(entry.type_node).map_or(entry.start, |n| n.end);
            params.push(self.arena.add_field(
                syntax_kind_ext::PARAMETER,
                start,
                end,
                FieldData {
                    names: NodeList::from(names),
                    type_annotation: entry.type_node,
                },
            ));
        }

        if let (Some(first), Some(last)) = (pending.first(), pending.last()) {
            let start = first.start;
            let end = self.arena.get(last.name).map_or(start, |n| n.end);
            self.error_at_span(start, end, "missing parameter type".to_string());
            let names: Vec<NodeIndex> = pending.iter().map(|p| p.name).collect();
            params.push(self.arena.add_field(
                syntax_kind_ext::PARAMETER,
                start,
                end,
                FieldData {
                    names: NodeList::from(names),
                    type_annotation: NodeIndex::NONE,
                },
            ));
        }

        NodeList::from(params)
    }

    pub(crate) fn parse_results(&mut self) -> NodeList {
        match self.token() {
            SyntaxKind::OpenParenToken => self.parse_parameter_list(),
            SyntaxKind::Identifier
            | SyntaxKind::AsteriskToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::LessThanMinusToken
            | SyntaxKind::FuncKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => {
                let start = self.token_pos();
                let type_node = self.parse_type();
                let end = self.previous_end;
                let result = self.arena.add_field(
                    syntax_kind_ext::PARAMETER,
                    start,
                    end,
                    FieldData {
                        names: NodeList::new(),
                        type_annotation: type_node,
                    },
                );
                NodeList::from(vec![result])
            }
            _ => NodeList::new(),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.previous_end;
        self.arena.add_block(
            start,
            end,
            BlockData {
                statements: NodeList::from(statements),
            },
        )
    }

    /// Statements up to the closing `}` of a block or the next clause of a
    /// switch or select.
    fn parse_statement_list(&mut self) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::EndOfFileToken
        ) {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let pos_before = self.token_pos();
            if self.is_token(SyntaxKind::TypeKeyword) {
                self.parse_type_declarations(&mut statements);
            } else {
                let statement = self.parse_statement();
                if statement.is_some() {
                    statements.push(statement);
                }
            }
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::CloseBraceToken) {
                self.next_token();
            }
        }
        statements
    }

    fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.resync_statement();
            return NodeIndex::NONE;
        }

        let statement = match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::IfKeyword => {
                let statement = self.parse_if_statement();
                self.parse_statement_terminator();
                statement
            }
            SyntaxKind::ForKeyword => {
                let statement = self.parse_for_statement();
                self.parse_statement_terminator();
                statement
            }
            SyntaxKind::SwitchKeyword => {
                let statement = self.parse_switch_statement();
                self.parse_statement_terminator();
                statement
            }
            SyntaxKind::SelectKeyword => {
                let statement = self.parse_select_statement();
                self.parse_statement_terminator();
                statement
            }
            SyntaxKind::DeferKeyword => self.parse_call_statement(syntax_kind_ext::DEFER_STATEMENT),
            SyntaxKind::GoKeyword => self.parse_call_statement(syntax_kind_ext::GO_STATEMENT),
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => self.parse_branch_statement(),
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                self.parse_statement_terminator();
                block
            }
            _ => self.parse_simple_statement(),
        };

        self.exit_recursion();
        statement
    }

    /// Expression, assignment, inc/dec or send statement, or a label.
    fn parse_simple_statement(&mut self) -> NodeIndex {
        let parts = self.parse_simple_statement_parts(false);

        if let SimpleStatement::Expression { start, expressions } = &parts
            && expressions.len() == 1
            && self.is_token(SyntaxKind::ColonToken)
        {
            let label = expressions.first().unwrap_or(NodeIndex::NONE);
            if self.arena.kind_of(label) == Some(SyntaxKind::Identifier as u16) {
                return self.parse_labeled_statement(*start, label);
            }
        }

        let statement = self.finish_simple_statement(parts);
        if !matches!(
            self.token(),
            SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            self.parse_statement_terminator();
            self.resync_statement();
        } else {
            self.parse_statement_terminator();
        }
        statement
    }

    /// Parse a simple statement without building it. With `allow_range`,
    /// `range x` may follow `=`/`:=` or start the clause.
    fn parse_simple_statement_parts(&mut self, allow_range: bool) -> SimpleStatement {
        let start = self.token_pos();
        if allow_range && self.parse_optional(SyntaxKind::RangeKeyword) {
            let expression = self.parse_expression();
            return SimpleStatement::Range {
                start,
                left: NodeList::new(),
                operator: SyntaxKind::Unknown,
                expression,
            };
        }

        let left = self.parse_expression_list();
        let operator = self.token();

        if operator.is_assignment_operator() {
            self.next_token();
            if allow_range
                && matches!(
                    operator,
                    SyntaxKind::EqualsToken | SyntaxKind::ColonEqualsToken
                )
                && self.parse_optional(SyntaxKind::RangeKeyword)
            {
                let expression = self.parse_expression();
                return SimpleStatement::Range {
                    start,
                    left,
                    operator,
                    expression,
                };
            }
            let right = self.parse_expression_list();
            return SimpleStatement::Assignment {
                start,
                left,
                operator,
                right,
            };
        }

        match operator {
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                SimpleStatement::Assignment {
                    start,
                    left,
                    operator,
                    right: NodeList::new(),
                }
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                let value = self.parse_expression();
                SimpleStatement::Send {
                    start,
                    channel: left.first().unwrap_or(NodeIndex::NONE),
                    value,
                }
            }
            _ => SimpleStatement::Expression {
                start,
                expressions: left,
            },
        }
    }

    fn finish_simple_statement(&mut self, parts: SimpleStatement) -> NodeIndex {
        match parts {
            SimpleStatement::Expression { start, expressions } => {
                if expressions.len() > 1 {
                    self.error_at_current("assignment operator expected".to_string());
                }
                let expression = expressions.first().unwrap_or(NodeIndex::NONE);
                let end = self.arena.get(expression).map_or(start, |n| n.end);
                self.arena.add_expr_statement(
                    syntax_kind_ext::EXPRESSION_STATEMENT,
                    start,
                    end,
                    ExprStatementData { expression },
                )
            }
            SimpleStatement::Assignment {
                start,
                left,
                operator,
                right,
            } => {
                let end = self.previous_end;
                self.arena.add_assignment(
                    start,
                    end,
                    AssignmentData {
                        left,
                        operator_token: operator as u16,
                        right,
                    },
                )
            }
            SimpleStatement::Send {
                start,
                channel,
                value,
            } => {
                let end = self.previous_end;
                self.arena
                    .add_send(start, end, SendData { channel, value })
            }
            SimpleStatement::Range {
                start, expression, ..
            } => {
                self.error_at_span(start, self.previous_end, "unexpected range".to_string());
                self.arena.add_expr_statement(
                    syntax_kind_ext::EXPRESSION_STATEMENT,
                    start,
                    self.previous_end,
                    ExprStatementData { expression },
                )
            }
        }
    }

    /// Condition of an `if`/`for` header given as a simple statement.
    fn condition_of(&mut self, parts: SimpleStatement) -> NodeIndex {
        if let SimpleStatement::Expression { expressions, .. } = &parts
            && expressions.len() == 1
        {
            return expressions.first().unwrap_or(NodeIndex::NONE);
        }
        self.error_at_current("condition expected".to_string());
        self.finish_simple_statement(parts)
    }

    /// `Label: statement`; the label has been parsed and the current token
    /// is `:`.
    fn parse_labeled_statement(&mut self, start: u32, label: NodeIndex) -> NodeIndex {
        self.next_token();
        let statement = if self.is_token(SyntaxKind::CloseBraceToken) {
            NodeIndex::NONE
        } else {
            self.parse_statement()
        };
        let end = self.previous_end;
        self.arena
            .add_labeled(start, end, LabeledData { label, statement })
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_const = self.is_token(SyntaxKind::ConstKeyword);
        self.next_token();

        let mut declarations = Vec::new();
        if self.parse_optional(SyntaxKind::OpenParenToken) {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                if self.parse_optional(SyntaxKind::SemicolonToken) {
                    continue;
                }
                let pos_before = self.token_pos();
                declarations.push(self.parse_variable_declaration(is_const));
                self.parse_statement_terminator();
                if self.token_pos() == pos_before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            declarations.push(self.parse_variable_declaration(is_const));
        }

        let end = self.previous_end;
        let statement = self.arena.add_variable_statement(
            start,
            end,
            VariableStatementData {
                is_const,
                declarations: NodeList::from(declarations),
            },
        );
        self.parse_statement_terminator();
        statement
    }

    /// `a, b T = x, y` inside a `var` or `const` statement.
    fn parse_variable_declaration(&mut self, is_const: bool) -> NodeIndex {
        let start = self.token_pos();
        let mut names = vec![self.parse_identifier()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            names.push(self.parse_identifier());
        }

        let type_annotation = if matches!(
            self.token(),
            SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };
        let initializers = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression_list()
        } else {
            NodeList::new()
        };
        let end = self.previous_end;

        if !is_const && type_annotation.is_none() && initializers.is_empty() {
            self.error_at_span(start, end, "missing variable type or initialization".to_string());
        }

        self.arena.add_variable_decl(
            start,
            end,
            VariableDeclData {
                names: NodeList::from(names),
                type_annotation,
                initializers,
            },
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let expressions = if matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            NodeList::new()
        } else {
            self.parse_expression_list()
        };

        let end = self.previous_end;
        let statement = self
            .arena
            .add_return(start, end, ReturnData { expressions });
        self.parse_statement_terminator();
        statement
    }

    /// `defer call` or `go call`.
    fn parse_call_statement(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_expression();
        let end = self.previous_end;
        if self.arena.kind_of(self.arena.skip_parentheses(expression))
            != Some(syntax_kind_ext::CALL_EXPRESSION)
        {
            self.error_at_span(start, end, "expression must be a function call".to_string());
        }
        let statement =
            self.arena
                .add_expr_statement(kind, start, end, ExprStatementData { expression });
        self.parse_statement_terminator();
        statement
    }

    fn parse_branch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operator = self.token();
        self.next_token();
        let label = if operator != SyntaxKind::FallthroughKeyword
            && self.is_token(SyntaxKind::Identifier)
        {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let end = self.previous_end;
        let statement = self.arena.add_branch(
            start,
            end,
            BranchData {
                operator: operator as u16,
                label,
            },
        );
        self.parse_statement_terminator();
        statement
    }

    /// Parse `if [init;] cond { } [else (if ... | { })]`; the caller consumes
    /// the terminator.
    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let (initializer, condition) = self.in_control_clause(|p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                p.error_at_current("missing condition in if statement".to_string());
                return (NodeIndex::NONE, NodeIndex::NONE);
            }
            let first = if p.is_token(SyntaxKind::SemicolonToken) {
                None
            } else {
                Some(p.parse_simple_statement_parts(false))
            };
            if p.parse_optional(SyntaxKind::SemicolonToken) {
                let initializer = match first {
                    Some(parts) => p.finish_simple_statement(parts),
                    None => NodeIndex::NONE,
                };
                (initializer, p.parse_expression())
            } else {
                let condition = match first {
                    Some(parts) => p.condition_of(parts),
                    None => NodeIndex::NONE,
                };
                (NodeIndex::NONE, condition)
            }
        });

        let then_statement = self.parse_block();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            if self.is_token(SyntaxKind::IfKeyword) {
                self.parse_if_statement()
            } else {
                self.parse_block()
            }
        } else {
            NodeIndex::NONE
        };

        let end = self.previous_end;
        self.arena.add_if_statement(
            start,
            end,
            IfStatementData {
                initializer,
                condition,
                then_statement,
                else_statement,
            },
        )
    }

    /// `for { }`, `for cond { }`, `for init; cond; post { }` and
    /// `for k, v := range x { }`; the caller consumes the terminator.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        enum Header {
            Clauses(NodeIndex, NodeIndex, NodeIndex),
            Range(NodeList, SyntaxKind, NodeIndex),
        }

        let header = self.in_control_clause(|p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                return Header::Clauses(NodeIndex::NONE, NodeIndex::NONE, NodeIndex::NONE);
            }
            let first = if p.is_token(SyntaxKind::SemicolonToken) {
                None
            } else {
                Some(p.parse_simple_statement_parts(true))
            };
            if let Some(SimpleStatement::Range {
                left,
                operator,
                expression,
                ..
            }) = first
            {
                return Header::Range(left, operator, expression);
            }
            if !p.is_token(SyntaxKind::SemicolonToken) {
                let condition = match first {
                    Some(parts) => p.condition_of(parts),
                    None => NodeIndex::NONE,
                };
                return Header::Clauses(NodeIndex::NONE, condition, NodeIndex::NONE);
            }

            p.next_token();
            let initializer = match first {
                Some(parts) => p.finish_simple_statement(parts),
                None => NodeIndex::NONE,
            };
            let condition = if p.is_token(SyntaxKind::SemicolonToken) {
                NodeIndex::NONE
            } else {
                p.parse_expression()
            };
            p.parse_expected(SyntaxKind::SemicolonToken);
            let incrementor = if p.is_token(SyntaxKind::OpenBraceToken) {
                NodeIndex::NONE
            } else {
                let parts = p.parse_simple_statement_parts(false);
                p.finish_simple_statement(parts)
            };
            Header::Clauses(initializer, condition, incrementor)
        });

        let body = self.parse_block();
        let end = self.previous_end;
        match header {
            Header::Clauses(initializer, condition, incrementor) => self.arena.add_for_statement(
                start,
                end,
                ForData {
                    initializer,
                    condition,
                    incrementor,
                    body,
                },
            ),
            Header::Range(left, operator, expression) => self.arena.add_range_statement(
                start,
                end,
                RangeData {
                    left,
                    operator_token: operator as u16,
                    expression,
                    body,
                },
            ),
        }
    }

    /// Expression and type switches; the caller consumes the terminator.
    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();

        let (initializer, header) = self.in_control_clause(|p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                return (NodeIndex::NONE, None);
            }
            let first = if p.is_token(SyntaxKind::SemicolonToken) {
                None
            } else {
                Some(p.parse_simple_statement_parts(false))
            };
            if !p.parse_optional(SyntaxKind::SemicolonToken) {
                return (NodeIndex::NONE, first);
            }
            let initializer = match first {
                Some(parts) => p.finish_simple_statement(parts),
                None => NodeIndex::NONE,
            };
            let tag = if p.is_token(SyntaxKind::OpenBraceToken) {
                None
            } else {
                Some(p.parse_simple_statement_parts(false))
            };
            (initializer, tag)
        });

        let (kind, binding, tag) = match header {
            None => (syntax_kind_ext::SWITCH_STATEMENT, NodeIndex::NONE, NodeIndex::NONE),
            Some(parts) => match self.type_switch_guard(&parts) {
                Some((binding, guard)) => (syntax_kind_ext::TYPE_SWITCH_STATEMENT, binding, guard),
                None => {
                    let tag = self.condition_of(parts);
                    (syntax_kind_ext::SWITCH_STATEMENT, NodeIndex::NONE, tag)
                }
            },
        };

        let is_type_switch = kind == syntax_kind_ext::TYPE_SWITCH_STATEMENT;
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let pos_before = self.token_pos();
            if let Some(clause) = self.parse_case_clause(is_type_switch) {
                clauses.push(clause);
            }
            if self.token_pos() == pos_before {
                self.error_at_current("'case' or 'default' expected".to_string());
                self.resync_statement();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.previous_end;
        self.arena.add_switch(
            kind,
            start,
            end,
            SwitchData {
                initializer,
                binding,
                tag,
                clauses: NodeList::from(clauses),
            },
        )
    }

    /// `x.(type)` or `v := x.(type)`: the binding (or `NONE`) and the guard.
    fn type_switch_guard(&self, parts: &SimpleStatement) -> Option<(NodeIndex, NodeIndex)> {
        let is_guard = |index: NodeIndex| {
            self.arena
                .get(index)
                .and_then(|n| self.arena.get_type_assertion(n))
                .is_some_and(|assertion| assertion.type_node.is_none())
        };
        match parts {
            SimpleStatement::Expression { expressions, .. } if expressions.len() == 1 => {
                let guard = expressions.first()?;
                is_guard(guard).then_some((NodeIndex::NONE, guard))
            }
            SimpleStatement::Assignment {
                left,
                operator: SyntaxKind::ColonEqualsToken,
                right,
                ..
            } if left.len() == 1 && right.len() == 1 => {
                let guard = right.first()?;
                is_guard(guard).then_some((left.first()?, guard))
            }
            _ => None,
        }
    }

    /// `case a, b:` or `default:` with its statements. Type switch cases
    /// list types.
    fn parse_case_clause(&mut self, is_type_switch: bool) -> Option<NodeIndex> {
        let start = self.token_pos();
        let (is_default, expressions) = match self.token() {
            SyntaxKind::CaseKeyword => {
                self.next_token();
                let expressions = if is_type_switch {
                    let mut types = vec![self.parse_type()];
                    while self.parse_optional(SyntaxKind::CommaToken) {
                        types.push(self.parse_type());
                    }
                    NodeList::from(types)
                } else {
                    self.parse_expression_list()
                };
                (false, expressions)
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                (true, NodeList::new())
            }
            _ => return None,
        };
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_statement_list();

        let end = self.previous_end;
        Some(self.arena.add_case_clause(
            syntax_kind_ext::CASE_CLAUSE,
            start,
            end,
            CaseClauseData {
                is_default,
                expressions,
                statements: NodeList::from(statements),
            },
        ))
    }

    /// `select { case v := <-ch: ... }`; the caller consumes the terminator.
    fn parse_select_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_start = self.token_pos();
            let (is_default, communication) = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    let parts = self.parse_simple_statement_parts(false);
                    (false, self.finish_simple_statement(parts))
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    (true, NodeIndex::NONE)
                }
                _ => {
                    self.error_at_current("'case' or 'default' expected".to_string());
                    self.resync_statement();
                    continue;
                }
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_statement_list();

            let end = self.previous_end;
            let expressions = if communication.is_some() {
                NodeList::from(vec![communication])
            } else {
                NodeList::new()
            };
            clauses.push(self.arena.add_case_clause(
                syntax_kind_ext::COMM_CLAUSE,
                clause_start,
                end,
                CaseClauseData {
                    is_default,
                    expressions,
                    statements: NodeList::from(statements),
                },
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let end = self.previous_end;
        self.arena.add_select(
            start,
            end,
            SelectData {
                clauses: NodeList::from(clauses),
            },
        )
    }
}
