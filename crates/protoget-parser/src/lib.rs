//! Go parser and syntax tree for the protoget analyzer.
//!
//! - `parser` - arena-allocated syntax tree, `ParserState`, pre-order walker
//! - `printer` - renders expression nodes back to canonical source text

pub mod parser;
pub mod printer;

pub use printer::{RenderError, render};
