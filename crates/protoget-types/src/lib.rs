//! Go type store and type resolution for the protoget analyzer.
//!
//! - `intern` - `TypeInterner`: structural interning, named types, method sets
//! - `shape` - the pointer-to-record / other classification used by checks
//! - `resolver` - whole-program resolution producing per-file `ExprTypes`

pub mod info;
pub mod intern;
pub mod resolver;
pub mod shape;
pub mod types;

pub use info::{ExprTypes, TypeInfo};
pub use intern::TypeInterner;
pub use resolver::{PackageInput, ProgramTypes, SourceUnit, resolve_file, resolve_program};
pub use shape::{RecordView, StaticShape};
pub use types::{BasicKind, FieldInfo, MethodInfo, MethodSig, NamedTypeInfo, TypeData, TypeId};
