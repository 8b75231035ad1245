//! Rendering of CLI errors through miette.
//!
//! A generator parse error becomes one report per diagnostic, each carrying
//! the declaration source so its labels render as snippets. Any other error
//! becomes a single report without source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use tagsmith_codegen::GenerateError;
use tagsmith_parser::{
    Span,
    error::{Diagnostic, Severity},
};

use crate::error::CliError;

/// A miette report borrowed from a [`CliError`].
pub type Report<'a> = Box<dyn MietteDiagnostic + 'a>;

/// One generator diagnostic together with the source it points into.
#[derive(Debug)]
pub struct SourceReport<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> SourceReport<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for SourceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for SourceReport<'_> {}

impl MietteDiagnostic for SourceReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = self.diag.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// An error with no source location, tagged with a `tagsmith::` code.
#[derive(Debug)]
pub struct PlainReport<'a>(pub &'a CliError);

impl fmt::Display for PlainReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for PlainReport<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for PlainReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io(_) | CliError::Generate(GenerateError::Io(_)) => "tagsmith::io",
            CliError::Config(_) | CliError::Generate(GenerateError::Config(_)) => {
                "tagsmith::config"
            }
            CliError::Generate(GenerateError::Format(_)) => "tagsmith::format",
            CliError::Generate(GenerateError::Parse { .. }) => return None,
        };
        Some(Box::new(code))
    }
}

/// Byte range of `span` in the text it was lexed from.
fn source_span(span: Span) -> SourceSpan {
    let range = span.inner().byte_range();
    SourceSpan::new(range.start.into(), range.len())
}

/// Split `err` into the reports to render, in order.
pub fn to_reports(err: &CliError) -> Vec<Report<'_>> {
    match err {
        CliError::Generate(GenerateError::Parse { err, src }) => err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(SourceReport::new(diag, src)) as Report<'_>)
            .collect(),
        other => vec![Box::new(PlainReport(other))],
    }
}
