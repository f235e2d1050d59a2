//! Canonical source text for expression and type nodes.
//!
//! Output is normalised Go: single spaces around binary operators, `, `
//! between arguments, no space after unary operators. Literals are emitted
//! exactly as written.

use protoget_scanner::SyntaxKind;
use thiserror::Error;

use crate::parser::syntax_kind_ext::{self, *};
use crate::parser::{ChannelDirection, NodeArena, NodeIndex, NodeList};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("node {0:?} does not exist")]
    MissingNode(NodeIndex),
    #[error("cannot render {kind} node as source text")]
    UnsupportedNode { kind: &'static str },
    #[error("unknown operator {0}")]
    UnknownOperator(u16),
}

/// Render `index` back to source text.
pub fn render(arena: &NodeArena, index: NodeIndex) -> Result<String, RenderError> {
    let mut out = String::new();
    Printer { arena }.write_node(index, &mut out)?;
    Ok(out)
}

struct Printer<'a> {
    arena: &'a NodeArena,
}

impl Printer<'_> {
    fn write_node(&self, index: NodeIndex, out: &mut String) -> Result<(), RenderError> {
        let node = self.arena.get(index).ok_or(RenderError::MissingNode(index))?;

        if let Some(ident) = self.arena.get_identifier(node) {
            out.push_str(&ident.escaped_text);
            return Ok(());
        }
        if let Some(literal) = self.arena.get_literal(node) {
            out.push_str(&literal.raw_text);
            return Ok(());
        }

        match node.kind {
            SELECTOR_EXPRESSION | INDEX_EXPRESSION => {
                let access = self
                    .arena
                    .get_access_expr(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(access.expression, out)?;
                if node.kind == SELECTOR_EXPRESSION {
                    out.push('.');
                    self.write_node(access.name_or_argument, out)?;
                } else {
                    out.push('[');
                    self.write_node(access.name_or_argument, out)?;
                    out.push(']');
                }
            }
            CALL_EXPRESSION => {
                let call = self
                    .arena
                    .get_call_expr(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(call.expression, out)?;
                out.push('(');
                for (i, argument) in call.arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_node(argument, out)?;
                }
                if call.spread {
                    out.push_str("...");
                }
                out.push(')');
            }
            UNARY_EXPRESSION => {
                let unary = self
                    .arena
                    .get_unary_expr(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str(operator_text(unary.operator)?);
                self.write_node(unary.operand, out)?;
            }
            BINARY_EXPRESSION => {
                let binary = self
                    .arena
                    .get_binary_expr(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(binary.left, out)?;
                out.push(' ');
                out.push_str(operator_text(binary.operator_token)?);
                out.push(' ');
                self.write_node(binary.right, out)?;
            }
            PARENTHESIZED_EXPRESSION => {
                let paren = self
                    .arena
                    .get_parenthesized(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push('(');
                self.write_node(paren.expression, out)?;
                out.push(')');
            }
            COMPOSITE_LITERAL => {
                let literal = self
                    .arena
                    .get_composite_literal(node)
                    .ok_or(RenderError::MissingNode(index))?;
                if literal.type_node.is_some() {
                    self.write_node(literal.type_node, out)?;
                }
                out.push('{');
                self.write_list(&literal.elements, out)?;
                out.push('}');
            }
            KEY_VALUE_EXPRESSION => {
                let pair = self
                    .arena
                    .get_key_value(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(pair.key, out)?;
                out.push_str(": ");
                self.write_node(pair.value, out)?;
            }
            SLICE_EXPRESSION => {
                let slice = self
                    .arena
                    .get_slice_expr(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(slice.expression, out)?;
                out.push('[');
                self.write_optional(slice.low, out)?;
                out.push(':');
                self.write_optional(slice.high, out)?;
                if slice.max.is_some() {
                    out.push(':');
                    self.write_node(slice.max, out)?;
                }
                out.push(']');
            }
            TYPE_ASSERTION_EXPRESSION => {
                let assertion = self
                    .arena
                    .get_type_assertion(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(assertion.expression, out)?;
                out.push_str(".(");
                if assertion.type_node.is_some() {
                    self.write_node(assertion.type_node, out)?;
                } else {
                    out.push_str("type");
                }
                out.push(')');
            }
            FUNCTION_EXPRESSION | FUNCTION_TYPE => {
                out.push_str("func");
                self.write_signature(index, out)?;
                // Bodies are elided; only the signature identifies the literal.
                if node.kind == FUNCTION_EXPRESSION {
                    out.push_str(" {...}");
                }
            }
            METHOD_SIGNATURE => {
                let function = self
                    .arena
                    .get_function(node)
                    .ok_or(RenderError::MissingNode(index))?;
                self.write_node(function.name, out)?;
                self.write_signature(index, out)?;
            }
            POINTER_TYPE | SLICE_TYPE | VARIADIC_TYPE => {
                let wrapped = self
                    .arena
                    .get_wrapped_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str(match node.kind {
                    POINTER_TYPE => "*",
                    SLICE_TYPE => "[]",
                    _ => "...",
                });
                self.write_node(wrapped.type_node, out)?;
            }
            ARRAY_TYPE => {
                let array = self
                    .arena
                    .get_array_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push('[');
                if array.length.is_some() {
                    self.write_node(array.length, out)?;
                } else {
                    out.push_str("...");
                }
                out.push(']');
                self.write_node(array.element, out)?;
            }
            MAP_TYPE => {
                let map = self
                    .arena
                    .get_map_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str("map[");
                self.write_node(map.key, out)?;
                out.push(']');
                self.write_node(map.value, out)?;
            }
            CHANNEL_TYPE => {
                let channel = self
                    .arena
                    .get_channel_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str(match channel.direction {
                    ChannelDirection::Both => "chan ",
                    ChannelDirection::Send => "chan<- ",
                    ChannelDirection::Receive => "<-chan ",
                });
                self.write_node(channel.element, out)?;
            }
            INTERFACE_TYPE => {
                let interface = self
                    .arena
                    .get_interface_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str("interface{");
                for (i, member) in interface.members.iter().enumerate() {
                    out.push_str(if i > 0 { "; " } else { " " });
                    self.write_node(member, out)?;
                }
                if !interface.members.is_empty() {
                    out.push(' ');
                }
                out.push('}');
            }
            STRUCT_TYPE => {
                let struct_type = self
                    .arena
                    .get_struct_type(node)
                    .ok_or(RenderError::MissingNode(index))?;
                out.push_str("struct{");
                for (i, field) in struct_type.fields.iter().enumerate() {
                    out.push_str(if i > 0 { "; " } else { " " });
                    self.write_field(field, out)?;
                }
                if !struct_type.fields.is_empty() {
                    out.push(' ');
                }
                out.push('}');
            }
            kind => {
                return Err(RenderError::UnsupportedNode {
                    kind: syntax_kind_ext::kind_name(kind),
                });
            }
        }
        Ok(())
    }

    fn write_list(&self, list: &NodeList, out: &mut String) -> Result<(), RenderError> {
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_node(item, out)?;
        }
        Ok(())
    }

    fn write_optional(&self, index: NodeIndex, out: &mut String) -> Result<(), RenderError> {
        if index.is_some() {
            self.write_node(index, out)?;
        }
        Ok(())
    }

    /// `(params) results` of a function type, literal or method signature.
    fn write_signature(&self, index: NodeIndex, out: &mut String) -> Result<(), RenderError> {
        let function = self
            .arena
            .get(index)
            .and_then(|n| self.arena.get_function(n))
            .ok_or(RenderError::MissingNode(index))?;
        out.push('(');
        for (i, parameter) in function.parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_field(parameter, out)?;
        }
        out.push(')');

        let single_unnamed = function.results.len() == 1
            && function
                .results
                .first()
                .and_then(|r| self.arena.get(r))
                .and_then(|n| self.arena.get_field(n))
                .is_some_and(|f| f.names.is_empty());
        if single_unnamed {
            out.push(' ');
            self.write_field(function.results.first().unwrap_or(NodeIndex::NONE), out)?;
        } else if !function.results.is_empty() {
            out.push_str(" (");
            for (i, result) in function.results.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_field(result, out)?;
            }
            out.push(')');
        }
        Ok(())
    }

    fn write_field(&self, index: NodeIndex, out: &mut String) -> Result<(), RenderError> {
        let field = self
            .arena
            .get(index)
            .and_then(|n| self.arena.get_field(n))
            .ok_or(RenderError::MissingNode(index))?;
        for (i, name) in field.names.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_node(name, out)?;
        }
        if !field.names.is_empty() {
            out.push(' ');
        }
        self.write_node(field.type_annotation, out)
    }
}

fn operator_text(operator: u16) -> Result<&'static str, RenderError> {
    SyntaxKind::from_u16(operator)
        .and_then(SyntaxKind::text)
        .ok_or(RenderError::UnknownOperator(operator))
}
