//! Node kinds that are not tokens.
//!
//! Identifiers and literals use their token kind (`SyntaxKind::Identifier`,
//! `SyntaxKind::StringLiteral`, ...). Every other node kind is numbered after
//! the last token kind so both fit in `Node::kind`.

use protoget_scanner::SyntaxKind;

const BASE: u16 = SyntaxKind::LAST_TOKEN as u16 + 1;

// Declarations
pub const SOURCE_FILE: u16 = BASE;
pub const IMPORT_DECLARATION: u16 = BASE + 1;
pub const TYPE_DECLARATION: u16 = BASE + 2;
pub const FUNCTION_DECLARATION: u16 = BASE + 3;
pub const PARAMETER: u16 = BASE + 4;
/// `var ...` or `const ...`, holding one `VARIABLE_DECLARATION` per spec.
pub const VARIABLE_STATEMENT: u16 = BASE + 5;
pub const VARIABLE_DECLARATION: u16 = BASE + 6;

// Statements
pub const BLOCK: u16 = BASE + 10;
pub const EXPRESSION_STATEMENT: u16 = BASE + 11;
pub const ASSIGNMENT_STATEMENT: u16 = BASE + 12;
pub const RETURN_STATEMENT: u16 = BASE + 13;
pub const IF_STATEMENT: u16 = BASE + 14;
pub const FOR_STATEMENT: u16 = BASE + 15;
pub const FOR_RANGE_STATEMENT: u16 = BASE + 16;
pub const SWITCH_STATEMENT: u16 = BASE + 17;
pub const TYPE_SWITCH_STATEMENT: u16 = BASE + 18;
pub const CASE_CLAUSE: u16 = BASE + 19;
pub const SELECT_STATEMENT: u16 = BASE + 20;
pub const COMM_CLAUSE: u16 = BASE + 21;
pub const DEFER_STATEMENT: u16 = BASE + 22;
pub const GO_STATEMENT: u16 = BASE + 23;
/// `break`, `continue`, `goto` and `fallthrough`.
pub const BRANCH_STATEMENT: u16 = BASE + 24;
pub const LABELED_STATEMENT: u16 = BASE + 25;
pub const SEND_STATEMENT: u16 = BASE + 26;

// Expressions
pub const SELECTOR_EXPRESSION: u16 = BASE + 40;
pub const INDEX_EXPRESSION: u16 = BASE + 41;
pub const CALL_EXPRESSION: u16 = BASE + 42;
pub const UNARY_EXPRESSION: u16 = BASE + 43;
pub const BINARY_EXPRESSION: u16 = BASE + 44;
pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 45;
pub const COMPOSITE_LITERAL: u16 = BASE + 46;
/// `key: value` element of a composite literal.
pub const KEY_VALUE_EXPRESSION: u16 = BASE + 47;
pub const FUNCTION_EXPRESSION: u16 = BASE + 48;
pub const SLICE_EXPRESSION: u16 = BASE + 49;
pub const TYPE_ASSERTION_EXPRESSION: u16 = BASE + 50;

// Types
pub const POINTER_TYPE: u16 = BASE + 60;
pub const SLICE_TYPE: u16 = BASE + 61;
pub const STRUCT_TYPE: u16 = BASE + 62;
pub const FIELD_DECLARATION: u16 = BASE + 63;
pub const ARRAY_TYPE: u16 = BASE + 64;
pub const MAP_TYPE: u16 = BASE + 65;
pub const CHANNEL_TYPE: u16 = BASE + 66;
pub const FUNCTION_TYPE: u16 = BASE + 67;
pub const INTERFACE_TYPE: u16 = BASE + 68;
pub const METHOD_SIGNATURE: u16 = BASE + 69;
/// `...T`, the type of a variadic final parameter.
pub const VARIADIC_TYPE: u16 = BASE + 70;

/// Human-readable name of a node or token kind, for logs and errors.
pub fn kind_name(kind: u16) -> &'static str {
    if let Some(token) = SyntaxKind::from_u16(kind) {
        return match token {
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::IntLiteral => "IntLiteral",
            SyntaxKind::FloatLiteral => "FloatLiteral",
            SyntaxKind::RuneLiteral => "RuneLiteral",
            SyntaxKind::StringLiteral => "StringLiteral",
            _ => "Token",
        };
    }
    match kind {
        SOURCE_FILE => "SourceFile",
        IMPORT_DECLARATION => "ImportDeclaration",
        TYPE_DECLARATION => "TypeDeclaration",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        PARAMETER => "Parameter",
        VARIABLE_STATEMENT => "VariableStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        BLOCK => "Block",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        ASSIGNMENT_STATEMENT => "AssignmentStatement",
        RETURN_STATEMENT => "ReturnStatement",
        IF_STATEMENT => "IfStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_RANGE_STATEMENT => "ForRangeStatement",
        SWITCH_STATEMENT => "SwitchStatement",
        TYPE_SWITCH_STATEMENT => "TypeSwitchStatement",
        CASE_CLAUSE => "CaseClause",
        SELECT_STATEMENT => "SelectStatement",
        COMM_CLAUSE => "CommClause",
        DEFER_STATEMENT => "DeferStatement",
        GO_STATEMENT => "GoStatement",
        BRANCH_STATEMENT => "BranchStatement",
        LABELED_STATEMENT => "LabeledStatement",
        SEND_STATEMENT => "SendStatement",
        SELECTOR_EXPRESSION => "SelectorExpression",
        INDEX_EXPRESSION => "IndexExpression",
        CALL_EXPRESSION => "CallExpression",
        UNARY_EXPRESSION => "UnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        COMPOSITE_LITERAL => "CompositeLiteral",
        KEY_VALUE_EXPRESSION => "KeyValueExpression",
        FUNCTION_EXPRESSION => "FunctionExpression",
        SLICE_EXPRESSION => "SliceExpression",
        TYPE_ASSERTION_EXPRESSION => "TypeAssertionExpression",
        POINTER_TYPE => "PointerType",
        SLICE_TYPE => "SliceType",
        STRUCT_TYPE => "StructType",
        FIELD_DECLARATION => "FieldDeclaration",
        ARRAY_TYPE => "ArrayType",
        MAP_TYPE => "MapType",
        CHANNEL_TYPE => "ChannelType",
        FUNCTION_TYPE => "FunctionType",
        INTERFACE_TYPE => "InterfaceType",
        METHOD_SIGNATURE => "MethodSignature",
        VARIADIC_TYPE => "VariadicType",
        _ => "Unknown",
    }
}
