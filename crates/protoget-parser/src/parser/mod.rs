//! Arena-based syntax tree and recursive-descent parser.
//!
//! Nodes are stored in a `NodeArena` and addressed by `NodeIndex`. Each node
//! kind keeps its payload in a dedicated typed pool; the thin `Node` record
//! only carries kind, span and the pool slot. Parent links are filled in as
//! nodes are created (children always exist before their parent).

pub mod base;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_types;
pub mod syntax_kind_ext;
pub mod walk;

pub use base::{NodeIndex, NodeList};
pub use node::*;
pub use state::{ParseDiagnostic, ParserState};
pub use walk::{Preorder, preorder};
