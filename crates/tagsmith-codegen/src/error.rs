//! Error types for generator operations.
//!
//! This module provides the main error type [`GenerateError`] which wraps
//! the conditions that can stop an expansion.

use std::io;

use proc_macro2::TokenStream;
use thiserror::Error;

use tagsmith_parser::error::{Diagnostic, ParseError};

/// The main error type for generator operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic of the failed pass together
/// with the source they point into, so callers can render rich reports.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Format error: {0}")]
    Format(String),
}

impl GenerateError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Render this error as `compile_error!` invocations.
    ///
    /// Each error diagnostic becomes its own invocation at its primary span;
    /// other variants produce a single invocation at the call site.
    pub fn to_compile_error(&self) -> TokenStream {
        match self {
            GenerateError::Parse { err, .. } => compile_errors(err.diagnostics()),
            other => syn::Error::new(proc_macro2::Span::call_site(), other.to_string())
                .to_compile_error(),
        }
    }
}

/// Render diagnostics as `compile_error!` invocations, one per error.
/// Warnings have no stable compiler counterpart and are skipped.
pub fn compile_errors(diagnostics: &[Diagnostic]) -> TokenStream {
    diagnostics
        .iter()
        .filter(|diag| diag.severity().is_error())
        .map(|diag| to_syn_error(diag).to_compile_error())
        .collect()
}

fn to_syn_error(diag: &Diagnostic) -> syn::Error {
    let span = diag
        .primary_span()
        .map_or_else(proc_macro2::Span::call_site, |span| span.inner());

    let mut message = match diag.code() {
        Some(code) => format!("{code}: {}", diag.message()),
        None => diag.message().to_string(),
    };
    for label in diag.labels() {
        message.push_str(&format!("\n  = note: {}", label.message()));
    }
    if let Some(help) = diag.help() {
        message.push_str(&format!("\n  = help: {help}"));
    }

    syn::Error::new(span, message)
}

#[cfg(test)]
mod tests {
    use tagsmith_parser::{Span, error::ErrorCode};

    use super::*;

    #[test]
    fn test_parse_error_display_uses_first_diagnostic() {
        let err = GenerateError::new_parse_error(
            ParseError::new(vec![
                Diagnostic::error("invalid host type").with_code(ErrorCode::E200),
                Diagnostic::error("unsupported schema node").with_code(ErrorCode::E300),
            ]),
            "enum Page {}",
        );
        assert_eq!(err.to_string(), "error[E200]: invalid host type (+1 more)");
    }

    #[test]
    fn test_compile_error_per_diagnostic() {
        let diagnostics = vec![
            Diagnostic::error("first")
                .with_code(ErrorCode::E300)
                .with_label(Span::call_site(), "here")
                .with_help("do this"),
            Diagnostic::warning("ignored"),
            Diagnostic::error("second"),
        ];

        let rendered = compile_errors(&diagnostics).to_string();
        assert_eq!(rendered.matches("compile_error").count(), 2);
        assert!(rendered.contains("E300: first"));
        assert!(rendered.contains("= note: here"));
        assert!(rendered.contains("= help: do this"));
        assert!(!rendered.contains("ignored"));
    }

    #[test]
    fn test_config_error_compiles_to_single_error() {
        let err = GenerateError::Config("bad suffix".to_string());
        let rendered = err.to_compile_error().to_string();
        assert_eq!(rendered.matches("compile_error").count(), 1);
        assert!(rendered.contains("Invalid configuration: bad suffix"));
    }
}
