//! [`Diagnostic`]: one reported problem.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A problem found in the declarations, built up fluently:
///
/// ```
/// use tagsmith_parser::{Span, error::{Diagnostic, ErrorCode, Severity}};
///
/// let diag = Diagnostic::error("unsupported schema node: literal")
///     .with_code(ErrorCode::E300)
///     .with_label(Span::call_site(), "not a tag call")
///     .with_help("each schema statement must be a single tag call such as `p()`");
///
/// assert_eq!(diag.severity(), Severity::Error);
/// assert_eq!(diag.labels().len(), 1);
/// ```
///
/// Renders as `severity[code]: message`; labels and help are left to the
/// reporter.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(self, code: ErrorCode) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    /// Mark `span` as the offending tokens.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(Label::primary(span, message))
    }

    /// Point at related context.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(Label::secondary(span, message))
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..self
        }
    }

    fn push_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were added.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// A syntax error from `syn`, reported as `E100`.
impl From<syn::Error> for Diagnostic {
    fn from(err: syn::Error) -> Self {
        Diagnostic::error(err.to_string())
            .with_code(ErrorCode::E100)
            .with_label(Span::new(err.span()), "could not parse this")
    }
}
