//! Intermediate tree produced by the schema parser.
//!
//! The tree is immutable once built: the generator walks it to plan types
//! and methods and never feeds anything back into it.

use proc_macro2::Ident;

use crate::span::{Span, Spanned};

/// An ordered sequence of tag invocations.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    invocations: Vec<Invocation>,
}

impl Schema {
    pub(crate) fn new(invocations: Vec<Invocation>) -> Self {
        Self { invocations }
    }

    /// Invocations in source order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

/// A bare tag call such as `div(Options { attributes: [id] }, || { p(); })`.
#[derive(Debug, Clone)]
pub struct Invocation {
    ident: Ident,
    tag_name: Spanned<String>,
    options_literal: Option<MapLiteral>,
    nested: Option<Schema>,
}

impl Invocation {
    pub(crate) fn new(
        ident: Ident,
        tag_name: Spanned<String>,
        options_literal: Option<MapLiteral>,
        nested: Option<Schema>,
    ) -> Self {
        Self {
            ident,
            tag_name,
            options_literal,
            nested,
        }
    }

    /// The called identifier as written, raw prefix included.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// The tag name, without any raw identifier prefix.
    pub fn tag_name(&self) -> &str {
        self.tag_name.inner()
    }

    /// Span of the call.
    pub fn span(&self) -> Span {
        self.tag_name.span()
    }

    /// The options literal in leading position, if any.
    pub fn options_literal(&self) -> Option<&MapLiteral> {
        self.options_literal.as_ref()
    }

    /// The trailing nested schema, if any.
    pub fn nested(&self) -> Option<&Schema> {
        self.nested.as_ref()
    }
}

/// A map literal: `Options { key: value, .. }`. The path is ignored.
#[derive(Debug, Clone, Default)]
pub struct MapLiteral {
    entries: Vec<MapEntry>,
}

impl MapLiteral {
    pub fn new(entries: Vec<MapEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }
}

/// One `key: value` pair of a map literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub key: String,
    pub value: LiteralValue,
}

impl MapEntry {
    pub fn new(key: impl Into<String>, value: LiteralValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// The value of a map entry, reduced to what the options resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Bool(bool),
    Str(String),
    /// A list literal; each element reduced to its name text.
    List(Vec<String>),
    /// Anything else, kept as its token text.
    Other(String),
}

impl LiteralValue {
    /// The literal's source text, as used for best-effort coercion.
    pub fn text(&self) -> String {
        match self {
            LiteralValue::Bool(value) => value.to_string(),
            LiteralValue::Str(value) | LiteralValue::Other(value) => value.clone(),
            LiteralValue::List(items) => format!("[{}]", items.join(", ")),
        }
    }
}
