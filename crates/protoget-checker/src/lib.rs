//! Field-access checker for Go protobuf messages.
//!
//! Reports every read `x.F` of a field declared by a message record, where
//! `x` is a pointer to the record and implements the marker interface, and
//! suggests replacing it with the generated getter `x.GetF()`. Writes
//! (assignment targets, `x.F++`, `&x.F`) are left alone.
//!
//! - `context` - `CheckerOptions` and the per-file `CheckerContext`
//! - `state` - `CheckerState` entry points
//! - `classifier` - is this selector a message field read candidate
//! - `write_context` - assignment / address-of target detection
//! - `access_scan` - the lazy diagnostic iterator

pub mod access_scan;
pub mod classifier;
pub mod context;
pub mod state;
pub mod write_context;

pub use access_scan::AccessScan;
pub use context::{
    CheckerContext, CheckerOptions, DEFAULT_MARKER_METHOD, DIAGNOSTIC_SOURCE, FIX_MESSAGE,
};
pub use state::CheckerState;
pub use write_context::WriteContexts;
