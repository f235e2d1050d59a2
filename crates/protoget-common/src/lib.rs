//! Common types and utilities for the protoget analyzer.
//!
//! This crate provides foundational types used across all protoget crates:
//! - Source spans (`Span`)
//! - Position/Range types and `LineMap` for offset <-> line/column conversion
//! - The diagnostic model shared by the parser, checker and reporters

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Diagnostics and suggested fixes
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, SuggestedFix, TextEdit};
