//! Scanner for the Go subset understood by protoget.
//!
//! - `SyntaxKind` - token kinds (node kinds continue in `protoget_parser::syntax_kind_ext`)
//! - `Scanner` - on-demand tokenizer with Go's automatic semicolon insertion

pub mod scanner;
mod syntax_kind;

pub use scanner::{Scanner, ScannerDiagnostic};
pub use syntax_kind::SyntaxKind;
