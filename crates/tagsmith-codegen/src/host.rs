//! Host validation.
//!
//! Checks the preconditions a declaration must meet before anything is
//! generated for it and locates its schema. Every failure here is
//! host-level: it is reported once and the declaration is skipped.

use log::debug;
use syn::Expr;

use tagsmith_parser::{
    Declaration, HostDecl, SCHEMA_FIELD, Span, error::Diagnostic, error::ErrorCode,
    is_block_shaped,
};

/// A declaration that passed validation.
#[derive(Debug)]
pub(crate) struct ValidHost<'a> {
    pub decl: &'a HostDecl,
    /// The schema value, if the host declares one.
    pub schema: Option<&'a Expr>,
}

/// Validate a declaration as a builder host.
///
/// Checks run in order and stop at the first failure: host kind, supertype,
/// constructors, then the schema field.
pub(crate) fn validate(declaration: &Declaration) -> Result<ValidHost<'_>, Diagnostic> {
    let host = match declaration {
        Declaration::Host(host) => host,
        Declaration::Other(other) => {
            let name = other
                .ident
                .as_ref()
                .map_or_else(String::new, |ident| format!(" `{ident}`"));
            return Err(Diagnostic::error(format!(
                "invalid host type: {}{name} cannot host a markup builder",
                other.kind
            ))
            .with_code(ErrorCode::E200)
            .with_label(other.span, "expected a struct declaration")
            .with_help("declare the builder as `struct Name { schema = || { .. }; }`"));
        }
    };

    if let Some(supertype) = &host.supertype {
        return Err(Diagnostic::error(format!(
            "invalid supertype on `{}`",
            host.ident
        ))
        .with_code(ErrorCode::E201)
        .with_label(Span::of(supertype), "supertype declared here")
        .with_help("remove the supertype; the generated type implements `AbstractTag` itself"));
    }

    let mut constructors = host.constructors();
    if let Some(first) = constructors.next() {
        let mut diag = Diagnostic::error(format!("invalid constructors on `{}`", host.ident))
            .with_code(ErrorCode::E202)
            .with_label(Span::of(&first.sig.ident), "constructor declared here");
        for other in constructors {
            diag = diag.with_secondary_label(Span::of(&other.sig.ident), "another constructor");
        }
        return Err(diag.with_help("remove it; the generated `new(out)` is the only constructor"));
    }

    let schema = match host.schema_field() {
        None => None,
        Some(field) => match &field.default {
            Some(value) if is_block_shaped(value) => Some(value),
            Some(value) => {
                return Err(missing_or_invalid_schema(host)
                    .with_label(Span::of(value), "expected a block or a closure"));
            }
            None => {
                return Err(missing_or_invalid_schema(host)
                    .with_label(field.span, "schema has no value"));
            }
        },
    };

    debug!(
        host = host.ident.to_string(),
        has_schema = schema.is_some();
        "Validated host"
    );

    Ok(ValidHost { decl: host, schema })
}

fn missing_or_invalid_schema(host: &HostDecl) -> Diagnostic {
    Diagnostic::error(format!("missing or invalid schema on `{}`", host.ident))
        .with_code(ErrorCode::E203)
        .with_help(format!("assign a block: `{SCHEMA_FIELD} = || {{ p(); }};`"))
}
