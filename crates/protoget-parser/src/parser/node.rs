//! Thin node record, typed payload pools, and the `NodeArena` that owns them.

use std::sync::Arc;

use protoget_common::Span;

use super::base::{NodeIndex, NodeList};

/// A syntax node: kind, source span and the slot of its payload in the
/// pool selected by `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: u16,
    /// Start byte offset of the node's first token.
    pub pos: u32,
    /// End byte offset of the node's last token.
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub const fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub const fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.pos, self.end)
    }
}

/// Per-node information filled in after creation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    /// Empty for identifiers synthesised during error recovery.
    pub escaped_text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    /// Literal exactly as written, quotes included.
    pub raw_text: String,
    /// Decoded value.
    pub value: String,
}

/// `expression.name` (selector) or `expression[argument]` (index).
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    /// The last argument is spread: `f(xs...)`.
    pub spread: bool,
}

#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// `lhs op rhs`, including `:=`, compound operators and `x++`/`x--`
/// (which have an empty `right`).
#[derive(Clone, Debug)]
pub struct AssignmentData {
    pub left: NodeList,
    pub operator_token: u16,
    pub right: NodeList,
}

/// Expression statements, and the call of a `defer` or `go` statement.
#[derive(Clone, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ReturnData {
    pub expressions: NodeList,
}

#[derive(Clone, Debug)]
pub struct IfStatementData {
    /// Simple statement before the condition (`if v, ok := m[k]; ok`).
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    /// A `BLOCK`, another `IF_STATEMENT`, or `NONE`.
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub is_const: bool,
    /// `VARIABLE_DECLARATION` nodes, several for a grouped `var ( ... )`.
    pub declarations: NodeList,
}

/// `a, b T = x, y`. A const spec with neither type nor values repeats the
/// previous spec of its group.
#[derive(Clone, Debug)]
pub struct VariableDeclData {
    pub names: NodeList,
    pub type_annotation: NodeIndex,
    pub initializers: NodeList,
}

/// Three-clause, condition-only and infinite `for` loops.
#[derive(Clone, Debug)]
pub struct ForData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub body: NodeIndex,
}

/// `for k, v := range x { }`. `operator_token` is `:=`, `=`, or
/// `SyntaxKind::Unknown` when no variables are bound.
#[derive(Clone, Debug)]
pub struct RangeData {
    pub left: NodeList,
    pub operator_token: u16,
    pub expression: NodeIndex,
    pub body: NodeIndex,
}

/// Expression and type switches. For a type switch `tag` is the
/// `x.(type)` assertion and `binding` the optional `v :=` name.
#[derive(Clone, Debug)]
pub struct SwitchData {
    pub initializer: NodeIndex,
    pub binding: NodeIndex,
    pub tag: NodeIndex,
    pub clauses: NodeList,
}

/// A `case`/`default` clause. Select clauses keep their send or receive
/// statement as the single entry of `expressions`.
#[derive(Clone, Debug)]
pub struct CaseClauseData {
    pub is_default: bool,
    pub expressions: NodeList,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct SelectData {
    pub clauses: NodeList,
}

#[derive(Clone, Debug)]
pub struct BranchData {
    /// Keyword token kind.
    pub operator: u16,
    pub label: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

/// `ch <- value`
#[derive(Clone, Debug)]
pub struct SendData {
    pub channel: NodeIndex,
    pub value: NodeIndex,
}

/// `T{...}`; `type_node` is `NONE` for an elided inner literal.
#[derive(Clone, Debug)]
pub struct CompositeLiteralData {
    pub type_node: NodeIndex,
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct KeyValueData {
    pub key: NodeIndex,
    pub value: NodeIndex,
}

/// `x[low:high:max]`; absent bounds are `NONE`.
#[derive(Clone, Debug)]
pub struct SliceExprData {
    pub expression: NodeIndex,
    pub low: NodeIndex,
    pub high: NodeIndex,
    pub max: NodeIndex,
}

/// `x.(T)`, or `x.(type)` in a type switch guard (`type_node` is `NONE`).
#[derive(Clone, Debug)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

/// Declarations, literals, types and interface method signatures all use
/// this payload; absent parts are `NONE` or empty.
#[derive(Clone, Debug)]
pub struct FunctionData {
    /// `PARAMETER` node of a method receiver, or `NONE`.
    pub receiver: NodeIndex,
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub results: NodeList,
    pub body: NodeIndex,
}

/// Shared by `PARAMETER` and `FIELD_DECLARATION`: `a, b T`, or a bare `T`
/// when `names` is empty (unnamed parameter, embedded field).
#[derive(Clone, Debug)]
pub struct FieldData {
    pub names: NodeList,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeDeclData {
    pub name: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct StructTypeData {
    pub fields: NodeList,
}

/// `*T`, `[]T` and `...T`.
#[derive(Clone, Debug)]
pub struct WrappedTypeData {
    pub type_node: NodeIndex,
}

/// `[N]T`; `length` is `NONE` for `[...]T`.
#[derive(Clone, Debug)]
pub struct ArrayTypeData {
    pub length: NodeIndex,
    pub element: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct MapTypeData {
    pub key: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDirection {
    Both,
    Send,
    Receive,
}

#[derive(Clone, Debug)]
pub struct ChannelTypeData {
    pub direction: ChannelDirection,
    pub element: NodeIndex,
}

/// Interface members: `METHOD_SIGNATURE` nodes and embedded type names.
#[derive(Clone, Debug)]
pub struct InterfaceTypeData {
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct ImportDeclData {
    /// Alias identifier, or `NONE`.
    pub name: NodeIndex,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub package_name: NodeIndex,
    pub statements: NodeList,
    pub file_name: String,
    pub text: Arc<str>,
}

// =============================================================================
// Arena
// =============================================================================

/// Owner of all nodes of one parsed source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub access_exprs: Vec<AccessExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub assignments: Vec<AssignmentData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub return_data: Vec<ReturnData>,
    pub if_statements: Vec<IfStatementData>,
    pub blocks: Vec<BlockData>,
    pub variable_statements: Vec<VariableStatementData>,
    pub variable_decls: Vec<VariableDeclData>,
    pub for_statements: Vec<ForData>,
    pub range_statements: Vec<RangeData>,
    pub switch_statements: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub select_statements: Vec<SelectData>,
    pub branch_statements: Vec<BranchData>,
    pub labeled_statements: Vec<LabeledData>,
    pub send_statements: Vec<SendData>,
    pub composite_literals: Vec<CompositeLiteralData>,
    pub key_values: Vec<KeyValueData>,
    pub slice_exprs: Vec<SliceExprData>,
    pub type_assertions: Vec<TypeAssertionData>,
    pub functions: Vec<FunctionData>,
    pub fields: Vec<FieldData>,
    pub type_decls: Vec<TypeDeclData>,
    pub struct_types: Vec<StructTypeData>,
    pub wrapped_types: Vec<WrappedTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub map_types: Vec<MapTypeData>,
    pub channel_types: Vec<ChannelTypeData>,
    pub interface_types: Vec<InterfaceTypeData>,
    pub import_decls: Vec<ImportDeclData>,
    pub source_files: Vec<SourceFileData>,
}
