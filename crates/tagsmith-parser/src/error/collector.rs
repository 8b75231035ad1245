//! Accumulates diagnostics for passes that continue past a problem.

use crate::error::Diagnostic;

/// Diagnostics reported so far, in order.
///
/// Statement-level problems in a schema go here; all of them are reported
/// in one expansion:
///
/// ```
/// use tagsmith_parser::{Span, error::{Diagnostic, DiagnosticCollector, ErrorCode}};
///
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::warning("ignored option `colour` on `p`"));
/// assert!(!collector.has_errors());
///
/// collector.emit(
///     Diagnostic::error("unsupported schema node: literal")
///         .with_code(ErrorCode::E300)
///         .with_label(Span::call_site(), "not a tag call"),
/// );
/// assert!(collector.has_errors());
/// assert_eq!(collector.diagnostics().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append everything `other` collected.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Whether any error-severity diagnostic was emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity().is_error())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
