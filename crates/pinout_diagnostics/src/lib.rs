//! Diagnostic creation, severity management, and text rendering.
//!
//! Board checks report their findings as structured [`Diagnostic`] values
//! collected in a thread-safe [`DiagnosticSink`]; [`TextRenderer`] formats
//! them for a terminal. Hard configuration errors are not diagnostics: they
//! are returned as `Result` errors by the crate that detects them.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TextRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
