//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-like plain text format:
///
/// ```text
/// warning[W301]: pin C2 is shared by 2 resources
///   --> sdcard[0].data
///    = note: also used by spisdcard[0].miso
/// ```
#[derive(Debug, Default)]
pub struct TextRenderer;

impl DiagnosticRenderer for TextRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message);
        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_header_only() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 301), "pin conflict");
        assert_eq!(TextRenderer.render(&diag), "error[E301]: pin conflict\n");
    }

    #[test]
    fn render_subject_notes_and_help() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 301), "shared pin")
            .with_subject("sdcard[0].data")
            .with_note("also used by spisdcard[0].miso")
            .with_help("request only one of them");
        let out = TextRenderer.render(&diag);
        assert_eq!(
            out,
            "warning[W301]: shared pin\n  --> sdcard[0].data\n   = note: also used by spisdcard[0].miso\n   = help: request only one of them\n"
        );
    }
}
