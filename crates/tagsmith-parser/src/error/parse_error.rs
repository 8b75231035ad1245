//! [`ParseError`]: the diagnostics of a pass that failed.

use std::fmt;

use crate::error::Diagnostic;

/// Every diagnostic reported by a failed pass, in report order.
///
/// Warnings reported alongside the errors are kept. Displays as the first
/// diagnostic followed by a count of the rest.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.diagnostics.split_first() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        if !rest.is_empty() {
            write!(f, " (+{} more)", rest.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

/// One diagnostic per message combined into `err`.
impl From<syn::Error> for ParseError {
    fn from(err: syn::Error) -> Self {
        Self::new(err.into_iter().map(Diagnostic::from).collect())
    }
}
