//! NodeArena creation methods (add_* methods).
//!
//! Children are always created before their parent, so every add_* method
//! can set the parent link of the children it receives.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;
use protoget_scanner::SyntaxKind;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_none() {
            return;
        }
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    #[inline]
    fn push_node(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::with_data(kind, pos, end, data_index));
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (no additional data)
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(SyntaxKind::Identifier as u16, pos, end, data_index)
    }

    /// Add an int or string literal; `kind` is the literal's token kind.
    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(kind, pos, end, data_index)
    }

    /// Add a selector or index expression.
    pub fn add_access_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: AccessExprData,
    ) -> NodeIndex {
        let (expression, name_or_argument) = (data.expression, data.name_or_argument);
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent(name_or_argument, parent);
        parent
    }

    pub fn add_call_expr(&mut self, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let expression = data.expression;
        let arguments = data.arguments.clone();
        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        let parent = self.push_node(syntax_kind_ext::CALL_EXPRESSION, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent_list(&arguments, parent);
        parent
    }

    pub fn add_unary_expr(&mut self, pos: u32, end: u32, data: UnaryExprData) -> NodeIndex {
        let operand = data.operand;
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(data);
        let parent = self.push_node(syntax_kind_ext::UNARY_EXPRESSION, pos, end, data_index);
        self.set_parent(operand, parent);
        parent
    }

    pub fn add_binary_expr(&mut self, pos: u32, end: u32, data: BinaryExprData) -> NodeIndex {
        let (left, right) = (data.left, data.right);
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        let parent = self.push_node(syntax_kind_ext::BINARY_EXPRESSION, pos, end, data_index);
        self.set_parent(left, parent);
        self.set_parent(right, parent);
        parent
    }

    pub fn add_parenthesized(&mut self, pos: u32, end: u32, data: ParenthesizedData) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.parenthesized.len() as u32;
        self.parenthesized.push(data);
        let parent = self.push_node(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            pos,
            end,
            data_index,
        );
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_assignment(&mut self, pos: u32, end: u32, data: AssignmentData) -> NodeIndex {
        let left = data.left.clone();
        let right = data.right.clone();
        let data_index = self.assignments.len() as u32;
        self.assignments.push(data);
        let parent = self.push_node(syntax_kind_ext::ASSIGNMENT_STATEMENT, pos, end, data_index);
        self.set_parent_list(&left, parent);
        self.set_parent_list(&right, parent);
        parent
    }

    /// Add an `EXPRESSION_STATEMENT`, `DEFER_STATEMENT` or `GO_STATEMENT`.
    pub fn add_expr_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_return(&mut self, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        let expressions = data.expressions.clone();
        let data_index = self.return_data.len() as u32;
        self.return_data.push(data);
        let parent = self.push_node(syntax_kind_ext::RETURN_STATEMENT, pos, end, data_index);
        self.set_parent_list(&expressions, parent);
        parent
    }

    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let (initializer, condition, then_statement, else_statement) = (
            data.initializer,
            data.condition,
            data.then_statement,
            data.else_statement,
        );
        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::IF_STATEMENT, pos, end, data_index);
        self.set_parent(initializer, parent);
        self.set_parent(condition, parent);
        self.set_parent(then_statement, parent);
        self.set_parent(else_statement, parent);
        parent
    }

    pub fn add_block(&mut self, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let statements = data.statements.clone();
        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        let parent = self.push_node(syntax_kind_ext::BLOCK, pos, end, data_index);
        self.set_parent_list(&statements, parent);
        parent
    }

    pub fn add_variable_statement(
        &mut self,
        pos: u32,
        end: u32,
        data: VariableStatementData,
    ) -> NodeIndex {
        let declarations = data.declarations.clone();
        let data_index = self.variable_statements.len() as u32;
        self.variable_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::VARIABLE_STATEMENT, pos, end, data_index);
        self.set_parent_list(&declarations, parent);
        parent
    }

    pub fn add_variable_decl(&mut self, pos: u32, end: u32, data: VariableDeclData) -> NodeIndex {
        let names = data.names.clone();
        let initializers = data.initializers.clone();
        let type_annotation = data.type_annotation;
        let data_index = self.variable_decls.len() as u32;
        self.variable_decls.push(data);
        let parent = self.push_node(syntax_kind_ext::VARIABLE_DECLARATION, pos, end, data_index);
        self.set_parent_list(&names, parent);
        self.set_parent(type_annotation, parent);
        self.set_parent_list(&initializers, parent);
        parent
    }

    pub fn add_for_statement(&mut self, pos: u32, end: u32, data: ForData) -> NodeIndex {
        let (initializer, condition, incrementor, body) =
            (data.initializer, data.condition, data.incrementor, data.body);
        let data_index = self.for_statements.len() as u32;
        self.for_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::FOR_STATEMENT, pos, end, data_index);
        self.set_parent(initializer, parent);
        self.set_parent(condition, parent);
        self.set_parent(incrementor, parent);
        self.set_parent(body, parent);
        parent
    }

    pub fn add_range_statement(&mut self, pos: u32, end: u32, data: RangeData) -> NodeIndex {
        let left = data.left.clone();
        let (expression, body) = (data.expression, data.body);
        let data_index = self.range_statements.len() as u32;
        self.range_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::FOR_RANGE_STATEMENT, pos, end, data_index);
        self.set_parent_list(&left, parent);
        self.set_parent(expression, parent);
        self.set_parent(body, parent);
        parent
    }

    /// Add a `SWITCH_STATEMENT` or `TYPE_SWITCH_STATEMENT`.
    pub fn add_switch(&mut self, kind: u16, pos: u32, end: u32, data: SwitchData) -> NodeIndex {
        let (initializer, binding, tag) = (data.initializer, data.binding, data.tag);
        let clauses = data.clauses.clone();
        let data_index = self.switch_statements.len() as u32;
        self.switch_statements.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(initializer, parent);
        self.set_parent(binding, parent);
        self.set_parent(tag, parent);
        self.set_parent_list(&clauses, parent);
        parent
    }

    /// Add a `CASE_CLAUSE` or `COMM_CLAUSE`.
    pub fn add_case_clause(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: CaseClauseData,
    ) -> NodeIndex {
        let expressions = data.expressions.clone();
        let statements = data.statements.clone();
        let data_index = self.case_clauses.len() as u32;
        self.case_clauses.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&expressions, parent);
        self.set_parent_list(&statements, parent);
        parent
    }

    pub fn add_select(&mut self, pos: u32, end: u32, data: SelectData) -> NodeIndex {
        let clauses = data.clauses.clone();
        let data_index = self.select_statements.len() as u32;
        self.select_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::SELECT_STATEMENT, pos, end, data_index);
        self.set_parent_list(&clauses, parent);
        parent
    }

    pub fn add_branch(&mut self, pos: u32, end: u32, data: BranchData) -> NodeIndex {
        let label = data.label;
        let data_index = self.branch_statements.len() as u32;
        self.branch_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::BRANCH_STATEMENT, pos, end, data_index);
        self.set_parent(label, parent);
        parent
    }

    pub fn add_labeled(&mut self, pos: u32, end: u32, data: LabeledData) -> NodeIndex {
        let (label, statement) = (data.label, data.statement);
        let data_index = self.labeled_statements.len() as u32;
        self.labeled_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::LABELED_STATEMENT, pos, end, data_index);
        self.set_parent(label, parent);
        self.set_parent(statement, parent);
        parent
    }

    pub fn add_send(&mut self, pos: u32, end: u32, data: SendData) -> NodeIndex {
        let (channel, value) = (data.channel, data.value);
        let data_index = self.send_statements.len() as u32;
        self.send_statements.push(data);
        let parent = self.push_node(syntax_kind_ext::SEND_STATEMENT, pos, end, data_index);
        self.set_parent(channel, parent);
        self.set_parent(value, parent);
        parent
    }

    pub fn add_composite_literal(
        &mut self,
        pos: u32,
        end: u32,
        data: CompositeLiteralData,
    ) -> NodeIndex {
        let type_node = data.type_node;
        let elements = data.elements.clone();
        let data_index = self.composite_literals.len() as u32;
        self.composite_literals.push(data);
        let parent = self.push_node(syntax_kind_ext::COMPOSITE_LITERAL, pos, end, data_index);
        self.set_parent(type_node, parent);
        self.set_parent_list(&elements, parent);
        parent
    }

    pub fn add_key_value(&mut self, pos: u32, end: u32, data: KeyValueData) -> NodeIndex {
        let (key, value) = (data.key, data.value);
        let data_index = self.key_values.len() as u32;
        self.key_values.push(data);
        let parent = self.push_node(syntax_kind_ext::KEY_VALUE_EXPRESSION, pos, end, data_index);
        self.set_parent(key, parent);
        self.set_parent(value, parent);
        parent
    }

    pub fn add_slice_expr(&mut self, pos: u32, end: u32, data: SliceExprData) -> NodeIndex {
        let (expression, low, high, max) = (data.expression, data.low, data.high, data.max);
        let data_index = self.slice_exprs.len() as u32;
        self.slice_exprs.push(data);
        let parent = self.push_node(syntax_kind_ext::SLICE_EXPRESSION, pos, end, data_index);
        self.set_parent(expression, parent);
        self.set_parent(low, parent);
        self.set_parent(high, parent);
        self.set_parent(max, parent);
        parent
    }

    pub fn add_type_assertion(
        &mut self,
        pos: u32,
        end: u32,
        data: TypeAssertionData,
    ) -> NodeIndex {
        let (expression, type_node) = (data.expression, data.type_node);
        let data_index = self.type_assertions.len() as u32;
        self.type_assertions.push(data);
        let parent = self.push_node(
            syntax_kind_ext::TYPE_ASSERTION_EXPRESSION,
            pos,
            end,
            data_index,
        );
        self.set_parent(expression, parent);
        self.set_parent(type_node, parent);
        parent
    }

    /// Add a `FUNCTION_DECLARATION`, `FUNCTION_EXPRESSION`, `FUNCTION_TYPE`
    /// or `METHOD_SIGNATURE` node.
    pub fn add_function(&mut self, kind: u16, pos: u32, end: u32, data: FunctionData) -> NodeIndex {
        let (receiver, name, body) = (data.receiver, data.name, data.body);
        let parameters = data.parameters.clone();
        let results = data.results.clone();
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(receiver, parent);
        self.set_parent(name, parent);
        self.set_parent_list(&parameters, parent);
        self.set_parent_list(&results, parent);
        self.set_parent(body, parent);
        parent
    }

    /// Add a `PARAMETER` or `FIELD_DECLARATION` node.
    pub fn add_field(&mut self, kind: u16, pos: u32, end: u32, data: FieldData) -> NodeIndex {
        let names = data.names.clone();
        let type_annotation = data.type_annotation;
        let data_index = self.fields.len() as u32;
        self.fields.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent_list(&names, parent);
        self.set_parent(type_annotation, parent);
        parent
    }

    pub fn add_type_decl(&mut self, pos: u32, end: u32, data: TypeDeclData) -> NodeIndex {
        let (name, type_node) = (data.name, data.type_node);
        let data_index = self.type_decls.len() as u32;
        self.type_decls.push(data);
        let parent = self.push_node(syntax_kind_ext::TYPE_DECLARATION, pos, end, data_index);
        self.set_parent(name, parent);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_struct_type(&mut self, pos: u32, end: u32, data: StructTypeData) -> NodeIndex {
        let fields = data.fields.clone();
        let data_index = self.struct_types.len() as u32;
        self.struct_types.push(data);
        let parent = self.push_node(syntax_kind_ext::STRUCT_TYPE, pos, end, data_index);
        self.set_parent_list(&fields, parent);
        parent
    }

    /// Add a `POINTER_TYPE`, `SLICE_TYPE` or `VARIADIC_TYPE` node.
    pub fn add_wrapped_type(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: WrappedTypeData,
    ) -> NodeIndex {
        let type_node = data.type_node;
        let data_index = self.wrapped_types.len() as u32;
        self.wrapped_types.push(data);
        let parent = self.push_node(kind, pos, end, data_index);
        self.set_parent(type_node, parent);
        parent
    }

    pub fn add_array_type(&mut self, pos: u32, end: u32, data: ArrayTypeData) -> NodeIndex {
        let (length, element) = (data.length, data.element);
        let data_index = self.array_types.len() as u32;
        self.array_types.push(data);
        let parent = self.push_node(syntax_kind_ext::ARRAY_TYPE, pos, end, data_index);
        self.set_parent(length, parent);
        self.set_parent(element, parent);
        parent
    }

    pub fn add_map_type(&mut self, pos: u32, end: u32, data: MapTypeData) -> NodeIndex {
        let (key, value) = (data.key, data.value);
        let data_index = self.map_types.len() as u32;
        self.map_types.push(data);
        let parent = self.push_node(syntax_kind_ext::MAP_TYPE, pos, end, data_index);
        self.set_parent(key, parent);
        self.set_parent(value, parent);
        parent
    }

    pub fn add_channel_type(&mut self, pos: u32, end: u32, data: ChannelTypeData) -> NodeIndex {
        let element = data.element;
        let data_index = self.channel_types.len() as u32;
        self.channel_types.push(data);
        let parent = self.push_node(syntax_kind_ext::CHANNEL_TYPE, pos, end, data_index);
        self.set_parent(element, parent);
        parent
    }

    pub fn add_interface_type(
        &mut self,
        pos: u32,
        end: u32,
        data: InterfaceTypeData,
    ) -> NodeIndex {
        let members = data.members.clone();
        let data_index = self.interface_types.len() as u32;
        self.interface_types.push(data);
        let parent = self.push_node(syntax_kind_ext::INTERFACE_TYPE, pos, end, data_index);
        self.set_parent_list(&members, parent);
        parent
    }

    pub fn add_import_decl(&mut self, pos: u32, end: u32, data: ImportDeclData) -> NodeIndex {
        let name = data.name;
        let data_index = self.import_decls.len() as u32;
        self.import_decls.push(data);
        let parent = self.push_node(syntax_kind_ext::IMPORT_DECLARATION, pos, end, data_index);
        self.set_parent(name, parent);
        parent
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let package_name = data.package_name;
        let statements = data.statements.clone();
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        let parent = self.push_node(syntax_kind_ext::SOURCE_FILE, pos, end, data_index);
        self.set_parent(package_name, parent);
        self.set_parent_list(&statements, parent);
        parent
    }
}
