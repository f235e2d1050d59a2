//! Checker options and the per-file context shared by the checks.

use protoget_parser::parser::NodeArena;
use protoget_types::{MethodSig, TypeId, TypeInfo, TypeInterner};

/// Marker method generated on every protobuf message type.
pub const DEFAULT_MARKER_METHOD: &str = "ProtoMessage";

/// `Diagnostic::source` of every finding.
pub const DIAGNOSTIC_SOURCE: &str = "protoget";

pub const FIX_MESSAGE: &str = "Use the getter instead";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Name of the nullary method that marks a message type.
    pub marker_method: String,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            marker_method: DEFAULT_MARKER_METHOD.to_string(),
        }
    }
}

impl CheckerOptions {
    /// Intern `interface { <marker_method>() }`.
    pub fn marker_interface(&self, interner: &mut TypeInterner) -> TypeId {
        interner.interface(vec![MethodSig {
            name: self.marker_method.clone(),
            signature: TypeId::EMPTY_SIGNATURE,
        }])
    }
}

/// Everything a check needs to know about the file under analysis.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub types: TypeInfo<'a>,
    pub file_name: String,
    /// The marker interface, from `CheckerOptions::marker_interface`.
    pub marker: TypeId,
}
