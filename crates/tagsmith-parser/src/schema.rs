//! Schema parser and validator.
//!
//! Walks a block-shaped schema into an ordered [`Schema`] of
//! [`Invocation`]s. Each statement is first classified into a
//! [`SchemaNode`]; only bare calls become invocations, every other shape is
//! reported and skipped while its siblings are still processed.

use log::trace;
use syn::{
    Expr, ExprStruct, Lit, Member, Stmt, Token, ext::IdentExt as _, punctuated::Punctuated,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    schema_types::{Invocation, LiteralValue, MapEntry, MapLiteral, Schema},
    span::{Span, Spanned},
};

/// Shape of one schema statement.
#[derive(Debug)]
pub(crate) enum SchemaNode<'a> {
    /// A bare call: `name(args..)`.
    Call {
        ident: &'a syn::Ident,
        args: &'a Punctuated<Expr, Token![,]>,
    },
    /// A call through a receiver, a qualified path or a computed callee.
    ReceiverCall { callee: String },
    /// Anything that is not a call expression.
    Unsupported { shape: &'static str },
}

/// Parse a block-shaped schema value.
///
/// Accepts a block (`{ .. }`) or a closure (`|| { .. }`). Returns `None`
/// when `expr` has another shape; nothing is reported in that case since
/// whether that is an error depends on where the value appears.
pub fn parse_schema(expr: &Expr, diagnostics: &mut DiagnosticCollector) -> Option<Schema> {
    let statements = schema_statements(expr)?;
    Some(parse_statements(&statements, diagnostics))
}

/// Returns `true` if `expr` is a block or a closure.
pub fn is_block_shaped(expr: &Expr) -> bool {
    schema_statements(expr).is_some()
}

fn schema_statements(expr: &Expr) -> Option<Vec<Stmt>> {
    match expr {
        Expr::Block(block) => Some(block.block.stmts.clone()),
        Expr::Closure(closure) => match closure.body.as_ref() {
            Expr::Block(block) => Some(block.block.stmts.clone()),
            body => Some(vec![Stmt::Expr(body.clone(), None)]),
        },
        Expr::Group(group) => schema_statements(&group.expr),
        _ => None,
    }
}

fn parse_statements(statements: &[Stmt], diagnostics: &mut DiagnosticCollector) -> Schema {
    let mut invocations = Vec::with_capacity(statements.len());

    for stmt in statements {
        let span = Span::of(stmt);
        match classify(stmt) {
            SchemaNode::Call { ident, args } => {
                invocations.push(parse_invocation(ident, args, diagnostics));
            }
            SchemaNode::ReceiverCall { callee } => diagnostics.emit(
                Diagnostic::error(format!("invalid schema invocation `{callee}`"))
                    .with_code(ErrorCode::E301)
                    .with_label(span, "tag calls cannot have a receiver")
                    .with_help("schema statements must be bare calls such as `p()`"),
            ),
            SchemaNode::Unsupported { shape } => diagnostics.emit(
                Diagnostic::error(format!("unsupported schema node: {shape}"))
                    .with_code(ErrorCode::E300)
                    .with_label(span, "not a tag call")
                    .with_help("each schema statement must be a single tag call such as `p()`"),
            ),
        }
    }

    Schema::new(invocations)
}

pub(crate) fn classify(stmt: &Stmt) -> SchemaNode<'_> {
    match stmt {
        Stmt::Local(_) => SchemaNode::Unsupported {
            shape: "`let` binding",
        },
        Stmt::Item(_) => SchemaNode::Unsupported { shape: "item" },
        Stmt::Macro(_) => SchemaNode::Unsupported {
            shape: "macro invocation",
        },
        Stmt::Expr(expr, _) => classify_expr(expr),
    }
}

fn classify_expr(expr: &Expr) -> SchemaNode<'_> {
    match expr {
        Expr::Call(call) => match call.func.as_ref() {
            Expr::Path(path)
                if path.qself.is_none()
                    && path.path.leading_colon.is_none()
                    && path.path.segments.len() == 1
                    && path.path.segments[0].arguments.is_none() =>
            {
                SchemaNode::Call {
                    ident: &path.path.segments[0].ident,
                    args: &call.args,
                }
            }
            callee => SchemaNode::ReceiverCall {
                callee: token_text(callee),
            },
        },
        Expr::MethodCall(call) => SchemaNode::ReceiverCall {
            callee: format!("{}.{}", token_text(&call.receiver), call.method),
        },
        Expr::Group(group) => classify_expr(&group.expr),
        other => SchemaNode::Unsupported {
            shape: expr_shape(other),
        },
    }
}

fn parse_invocation(
    ident: &syn::Ident,
    args: &Punctuated<Expr, Token![,]>,
    diagnostics: &mut DiagnosticCollector,
) -> Invocation {
    let tag_name = Spanned::new(ident.unraw().to_string(), Span::of(ident));
    trace!(tag = tag_name.inner(), args = args.len(); "Parsed schema invocation");

    let nested = args.last().and_then(|last| parse_schema(last, diagnostics));
    let options_literal = match args.first().map(ungroup) {
        Some(Expr::Struct(map)) => Some(map_literal(map)),
        _ => None,
    };

    Invocation::new(ident.clone(), tag_name, options_literal, nested)
}

fn map_literal(map: &ExprStruct) -> MapLiteral {
    let entries = map
        .fields
        .iter()
        .map(|field| {
            let key = match &field.member {
                Member::Named(ident) => ident.unraw().to_string(),
                Member::Unnamed(index) => index.index.to_string(),
            };
            MapEntry::new(key, literal_value(&field.expr))
        })
        .collect();
    MapLiteral::new(entries)
}

fn literal_value(expr: &Expr) -> LiteralValue {
    match ungroup(expr) {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Bool(value) => LiteralValue::Bool(value.value),
            Lit::Str(value) => LiteralValue::Str(value.value()),
            _ => LiteralValue::Other(token_text(expr)),
        },
        Expr::Array(array) => LiteralValue::List(array.elems.iter().map(name_text).collect()),
        other => LiteralValue::Other(token_text(other)),
    }
}

/// Text of a name token inside a list literal: `id`, `r#type` or `"data-x"`.
fn name_text(expr: &Expr) -> String {
    match ungroup(expr) {
        Expr::Path(path) if path.qself.is_none() => match path.path.get_ident() {
            Some(ident) => ident.unraw().to_string(),
            None => token_text(expr),
        },
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(value) => value.value(),
            _ => token_text(expr),
        },
        other => token_text(other),
    }
}

fn ungroup(expr: &Expr) -> &Expr {
    match expr {
        Expr::Group(group) => ungroup(&group.expr),
        other => other,
    }
}

fn token_text(node: &impl quote::ToTokens) -> String {
    node.to_token_stream().to_string()
}

fn expr_shape(expr: &Expr) -> &'static str {
    match expr {
        Expr::Lit(_) => "literal",
        Expr::Path(_) => "path without a call",
        Expr::Block(_) | Expr::Unsafe(_) => "block",
        Expr::Closure(_) => "closure",
        Expr::Assign(_) => "assignment",
        Expr::Binary(_) | Expr::Unary(_) => "operator expression",
        Expr::Macro(_) => "macro invocation",
        Expr::Paren(_) => "parenthesized expression",
        Expr::If(_) | Expr::Match(_) => "conditional",
        Expr::ForLoop(_) | Expr::While(_) | Expr::Loop(_) => "loop",
        Expr::Struct(_) => "struct literal",
        Expr::Field(_) => "field access",
        _ => "expression",
    }
}
