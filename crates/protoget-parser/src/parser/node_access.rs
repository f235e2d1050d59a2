//! NodeArena access methods.
//!
//! Typed getters return `None` when the node is not of the expected kind, so
//! callers can match on shape without checking `kind` first.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext::*;
use protoget_scanner::SyntaxKind;

impl NodeArena {
    /// Get a thin node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of `index`, or `NONE` for the root and unknown indices.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index).map_or(NodeIndex::NONE, |e| e.parent)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == SyntaxKind::Identifier as u16 {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        let is_literal = SyntaxKind::from_u16(node.kind).is_some_and(SyntaxKind::is_literal);
        if node.has_data() && is_literal {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get access expression data (selector or index expression).
    #[inline]
    pub fn get_access_expr(&self, node: &Node) -> Option<&AccessExprData> {
        if node.has_data() && (node.kind == SELECTOR_EXPRESSION || node.kind == INDEX_EXPRESSION) {
            self.access_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get selector data only; index expressions return `None`.
    #[inline]
    pub fn get_selector(&self, node: &Node) -> Option<&AccessExprData> {
        if node.kind == SELECTOR_EXPRESSION {
            self.get_access_expr(node)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_call_expr(&self, node: &Node) -> Option<&CallExprData> {
        if node.has_data() && node.kind == CALL_EXPRESSION {
            self.call_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_unary_expr(&self, node: &Node) -> Option<&UnaryExprData> {
        if node.has_data() && node.kind == UNARY_EXPRESSION {
            self.unary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_binary_expr(&self, node: &Node) -> Option<&BinaryExprData> {
        if node.has_data() && node.kind == BINARY_EXPRESSION {
            self.binary_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_parenthesized(&self, node: &Node) -> Option<&ParenthesizedData> {
        if node.has_data() && node.kind == PARENTHESIZED_EXPRESSION {
            self.parenthesized.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_assignment(&self, node: &Node) -> Option<&AssignmentData> {
        if node.has_data() && node.kind == ASSIGNMENT_STATEMENT {
            self.assignments.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_expr_statement(&self, node: &Node) -> Option<&ExprStatementData> {
        if node.has_data()
            && matches!(
                node.kind,
                EXPRESSION_STATEMENT | DEFER_STATEMENT | GO_STATEMENT
            )
        {
            self.expr_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_return_statement(&self, node: &Node) -> Option<&ReturnData> {
        if node.has_data() && node.kind == RETURN_STATEMENT {
            self.return_data.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_if_statement(&self, node: &Node) -> Option<&IfStatementData> {
        if node.has_data() && node.kind == IF_STATEMENT {
            self.if_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_block(&self, node: &Node) -> Option<&BlockData> {
        if node.has_data() && node.kind == BLOCK {
            self.blocks.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_statement(&self, node: &Node) -> Option<&VariableStatementData> {
        if node.has_data() && node.kind == VARIABLE_STATEMENT {
            self.variable_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_variable_decl(&self, node: &Node) -> Option<&VariableDeclData> {
        if node.has_data() && node.kind == VARIABLE_DECLARATION {
            self.variable_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_for_statement(&self, node: &Node) -> Option<&ForData> {
        if node.has_data() && node.kind == FOR_STATEMENT {
            self.for_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_range_statement(&self, node: &Node) -> Option<&RangeData> {
        if node.has_data() && node.kind == FOR_RANGE_STATEMENT {
            self.range_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get data of a `SWITCH_STATEMENT` or `TYPE_SWITCH_STATEMENT` node.
    #[inline]
    pub fn get_switch(&self, node: &Node) -> Option<&SwitchData> {
        if node.has_data() && (node.kind == SWITCH_STATEMENT || node.kind == TYPE_SWITCH_STATEMENT)
        {
            self.switch_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get data of a `CASE_CLAUSE` or `COMM_CLAUSE` node.
    #[inline]
    pub fn get_case_clause(&self, node: &Node) -> Option<&CaseClauseData> {
        if node.has_data() && (node.kind == CASE_CLAUSE || node.kind == COMM_CLAUSE) {
            self.case_clauses.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_select(&self, node: &Node) -> Option<&SelectData> {
        if node.has_data() && node.kind == SELECT_STATEMENT {
            self.select_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_branch(&self, node: &Node) -> Option<&BranchData> {
        if node.has_data() && node.kind == BRANCH_STATEMENT {
            self.branch_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_labeled(&self, node: &Node) -> Option<&LabeledData> {
        if node.has_data() && node.kind == LABELED_STATEMENT {
            self.labeled_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_send(&self, node: &Node) -> Option<&SendData> {
        if node.has_data() && node.kind == SEND_STATEMENT {
            self.send_statements.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_composite_literal(&self, node: &Node) -> Option<&CompositeLiteralData> {
        if node.has_data() && node.kind == COMPOSITE_LITERAL {
            self.composite_literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_key_value(&self, node: &Node) -> Option<&KeyValueData> {
        if node.has_data() && node.kind == KEY_VALUE_EXPRESSION {
            self.key_values.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_slice_expr(&self, node: &Node) -> Option<&SliceExprData> {
        if node.has_data() && node.kind == SLICE_EXPRESSION {
            self.slice_exprs.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_type_assertion(&self, node: &Node) -> Option<&TypeAssertionData> {
        if node.has_data() && node.kind == TYPE_ASSERTION_EXPRESSION {
            self.type_assertions.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get function data of a declaration, literal, function type or
    /// interface method signature.
    #[inline]
    pub fn get_function(&self, node: &Node) -> Option<&FunctionData> {
        if node.has_data()
            && matches!(
                node.kind,
                FUNCTION_DECLARATION | FUNCTION_EXPRESSION | FUNCTION_TYPE | METHOD_SIGNATURE
            )
        {
            self.functions.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get data of a `PARAMETER` or `FIELD_DECLARATION` node.
    #[inline]
    pub fn get_field(&self, node: &Node) -> Option<&FieldData> {
        if node.has_data() && (node.kind == PARAMETER || node.kind == FIELD_DECLARATION) {
            self.fields.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_type_decl(&self, node: &Node) -> Option<&TypeDeclData> {
        if node.has_data() && node.kind == TYPE_DECLARATION {
            self.type_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_struct_type(&self, node: &Node) -> Option<&StructTypeData> {
        if node.has_data() && node.kind == STRUCT_TYPE {
            self.struct_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Get data of a `POINTER_TYPE`, `SLICE_TYPE` or `VARIADIC_TYPE` node.
    #[inline]
    pub fn get_wrapped_type(&self, node: &Node) -> Option<&WrappedTypeData> {
        if node.has_data() && matches!(node.kind, POINTER_TYPE | SLICE_TYPE | VARIADIC_TYPE) {
            self.wrapped_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_array_type(&self, node: &Node) -> Option<&ArrayTypeData> {
        if node.has_data() && node.kind == ARRAY_TYPE {
            self.array_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_map_type(&self, node: &Node) -> Option<&MapTypeData> {
        if node.has_data() && node.kind == MAP_TYPE {
            self.map_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_channel_type(&self, node: &Node) -> Option<&ChannelTypeData> {
        if node.has_data() && node.kind == CHANNEL_TYPE {
            self.channel_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_interface_type(&self, node: &Node) -> Option<&InterfaceTypeData> {
        if node.has_data() && node.kind == INTERFACE_TYPE {
            self.interface_types.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_import_decl(&self, node: &Node) -> Option<&ImportDeclData> {
        if node.has_data() && node.kind == IMPORT_DECLARATION {
            self.import_decls.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_source_file(&self, node: &Node) -> Option<&SourceFileData> {
        if node.has_data() && node.kind == SOURCE_FILE {
            self.source_files.get(node.data_index as usize)
        } else {
            None
        }
    }

    // ==========================================================================
    // Convenience queries
    // ==========================================================================

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|id| id.escaped_text.as_str())
    }

    /// Strip any number of enclosing parentheses: `((x))` -> `x`.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(paren) = self.get(index).and_then(|n| self.get_parenthesized(n)) {
            index = paren.expression;
        }
        index
    }

    /// Package name declared by a source file root.
    pub fn package_name(&self, root: NodeIndex) -> Option<&str> {
        let file = self.get(root).and_then(|n| self.get_source_file(n))?;
        self.identifier_text(file.package_name)
    }

    /// Children of a node in source order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let Some(node) = self.get(index) else {
            return out;
        };

        match node.kind {
            SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    out.push(data.package_name);
                    out.extend(data.statements.iter());
                }
            }
            IMPORT_DECLARATION => {
                if let Some(data) = self.get_import_decl(node) {
                    out.push(data.name);
                }
            }
            TYPE_DECLARATION => {
                if let Some(data) = self.get_type_decl(node) {
                    out.extend([data.name, data.type_node]);
                }
            }
            FUNCTION_DECLARATION | FUNCTION_EXPRESSION | FUNCTION_TYPE | METHOD_SIGNATURE => {
                if let Some(data) = self.get_function(node) {
                    out.push(data.receiver);
                    out.push(data.name);
                    out.extend(data.parameters.iter());
                    out.extend(data.results.iter());
                    out.push(data.body);
                }
            }
            PARAMETER | FIELD_DECLARATION => {
                if let Some(data) = self.get_field(node) {
                    out.extend(data.names.iter());
                    out.push(data.type_annotation);
                }
            }
            VARIABLE_STATEMENT => {
                if let Some(data) = self.get_variable_statement(node) {
                    out.extend(data.declarations.iter());
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(data) = self.get_variable_decl(node) {
                    out.extend(data.names.iter());
                    out.push(data.type_annotation);
                    out.extend(data.initializers.iter());
                }
            }
            BLOCK => {
                if let Some(data) = self.get_block(node) {
                    out.extend(data.statements.iter());
                }
            }
            EXPRESSION_STATEMENT | DEFER_STATEMENT | GO_STATEMENT => {
                if let Some(data) = self.get_expr_statement(node) {
                    out.push(data.expression);
                }
            }
            ASSIGNMENT_STATEMENT => {
                if let Some(data) = self.get_assignment(node) {
                    out.extend(data.left.iter());
                    out.extend(data.right.iter());
                }
            }
            RETURN_STATEMENT => {
                if let Some(data) = self.get_return_statement(node) {
                    out.extend(data.expressions.iter());
                }
            }
            IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    out.extend([
                        data.initializer,
                        data.condition,
                        data.then_statement,
                        data.else_statement,
                    ]);
                }
            }
            FOR_STATEMENT => {
                if let Some(data) = self.get_for_statement(node) {
                    out.extend([data.initializer, data.condition, data.incrementor, data.body]);
                }
            }
            FOR_RANGE_STATEMENT => {
                if let Some(data) = self.get_range_statement(node) {
                    out.extend(data.left.iter());
                    out.extend([data.expression, data.body]);
                }
            }
            SWITCH_STATEMENT | TYPE_SWITCH_STATEMENT => {
                if let Some(data) = self.get_switch(node) {
                    out.extend([data.initializer, data.binding, data.tag]);
                    out.extend(data.clauses.iter());
                }
            }
            CASE_CLAUSE | COMM_CLAUSE => {
                if let Some(data) = self.get_case_clause(node) {
                    out.extend(data.expressions.iter());
                    out.extend(data.statements.iter());
                }
            }
            SELECT_STATEMENT => {
                if let Some(data) = self.get_select(node) {
                    out.extend(data.clauses.iter());
                }
            }
            BRANCH_STATEMENT => {
                if let Some(data) = self.get_branch(node) {
                    out.push(data.label);
                }
            }
            LABELED_STATEMENT => {
                if let Some(data) = self.get_labeled(node) {
                    out.extend([data.label, data.statement]);
                }
            }
            SEND_STATEMENT => {
                if let Some(data) = self.get_send(node) {
                    out.extend([data.channel, data.value]);
                }
            }
            SELECTOR_EXPRESSION | INDEX_EXPRESSION => {
                if let Some(data) = self.get_access_expr(node) {
                    out.extend([data.expression, data.name_or_argument]);
                }
            }
            CALL_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    out.push(data.expression);
                    out.extend(data.arguments.iter());
                }
            }
            UNARY_EXPRESSION => {
                if let Some(data) = self.get_unary_expr(node) {
                    out.push(data.operand);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    out.extend([data.left, data.right]);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(data) = self.get_parenthesized(node) {
                    out.push(data.expression);
                }
            }
            COMPOSITE_LITERAL => {
                if let Some(data) = self.get_composite_literal(node) {
                    out.push(data.type_node);
                    out.extend(data.elements.iter());
                }
            }
            KEY_VALUE_EXPRESSION => {
                if let Some(data) = self.get_key_value(node) {
                    out.extend([data.key, data.value]);
                }
            }
            SLICE_EXPRESSION => {
                if let Some(data) = self.get_slice_expr(node) {
                    out.extend([data.expression, data.low, data.high, data.max]);
                }
            }
            TYPE_ASSERTION_EXPRESSION => {
                if let Some(data) = self.get_type_assertion(node) {
                    out.extend([data.expression, data.type_node]);
                }
            }
            ARRAY_TYPE => {
                if let Some(data) = self.get_array_type(node) {
                    out.extend([data.length, data.element]);
                }
            }
            MAP_TYPE => {
                if let Some(data) = self.get_map_type(node) {
                    out.extend([data.key, data.value]);
                }
            }
            CHANNEL_TYPE => {
                if let Some(data) = self.get_channel_type(node) {
                    out.push(data.element);
                }
            }
            INTERFACE_TYPE => {
                if let Some(data) = self.get_interface_type(node) {
                    out.extend(data.members.iter());
                }
            }
            POINTER_TYPE | SLICE_TYPE | VARIADIC_TYPE => {
                if let Some(data) = self.get_wrapped_type(node) {
                    out.push(data.type_node);
                }
            }
            STRUCT_TYPE => {
                if let Some(data) = self.get_struct_type(node) {
                    out.extend(data.fields.iter());
                }
            }
            _ => {}
        }

        out.retain(|child| child.is_some());
        out
    }
}
