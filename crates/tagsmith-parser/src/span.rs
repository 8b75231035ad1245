//! Source locations for diagnostics.
//!
//! A [`Span`] wraps a [`proc_macro2::Span`]. Inside a procedural macro it
//! points at the user's tokens so `compile_error!` lands in the right place;
//! outside of one (the CLI) it carries line and byte positions when
//! `proc-macro2`'s `span-locations` feature is enabled.

use std::fmt;

use proc_macro2::Span as TokenSpan;

/// A location in the declaration source.
#[derive(Clone, Copy)]
pub struct Span(TokenSpan);

impl Span {
    /// Create a span from a token span.
    pub fn new(span: TokenSpan) -> Self {
        Self(span)
    }

    /// The span of the whole of `node`.
    pub fn of(node: &impl syn::spanned::Spanned) -> Self {
        Self(node.span())
    }

    /// Span of the macro call site, used when no better location is known.
    pub fn call_site() -> Self {
        Self(TokenSpan::call_site())
    }

    /// The underlying token span.
    pub fn inner(&self) -> TokenSpan {
        self.0
    }

    /// Create a union of two spans (encompassing both).
    ///
    /// Falls back to `self` where the compiler cannot join spans.
    pub fn union(&self, other: Span) -> Span {
        Self(self.0.join(other.0).unwrap_or(self.0))
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::call_site()
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({:?})", self.0)
    }
}

impl From<TokenSpan> for Span {
    fn from(span: TokenSpan) -> Self {
        Self(span)
    }
}

impl From<Span> for TokenSpan {
    fn from(span: Span) -> Self {
        span.0
    }
}

/// A value paired with the location it was parsed from.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    /// Create a new spanned value.
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Get the span of this value.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Borrow the wrapped value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Unwrap the value, discarding the span.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Map the wrapped value, keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned::new(f(self.value), self.span)
    }
}
