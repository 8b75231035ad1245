//! Syntax tree for the declarations handed to the generator.
//!
//! A declaration is either a host struct, which may carry a schema, or any
//! other item, which is kept only so it can be reported.

use proc_macro2::Ident;
use syn::{Attribute, Expr, ImplItemFn, ReturnType, Type, Visibility, ext::IdentExt as _};

use crate::span::Span;

/// Name of the field that holds a host's schema.
pub const SCHEMA_FIELD: &str = "schema";

/// One top-level item of the macro input.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// A `struct` declaration; the only kind that can host a builder.
    Host(HostDecl),
    /// Any other item.
    Other(OtherItem),
}

impl Declaration {
    /// Span of the whole declaration.
    pub fn span(&self) -> Span {
        match self {
            Declaration::Host(host) => host.span,
            Declaration::Other(other) => other.span,
        }
    }
}

/// A non-struct item found where a host was expected.
#[derive(Debug, Clone)]
pub struct OtherItem {
    /// Human readable item kind, e.g. "function" or "enum".
    pub kind: &'static str,
    /// Name of the item, when it has one.
    pub ident: Option<Ident>,
    pub span: Span,
}

/// A host struct declaration.
#[derive(Debug, Clone)]
pub struct HostDecl {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    /// Supertype clause, as in `struct Page: Base { .. }`.
    pub supertype: Option<Type>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<ImplItemFn>,
    pub span: Span,
}

impl HostDecl {
    /// The field named `schema`, if declared.
    pub fn schema_field(&self) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.is_schema())
    }

    /// Fields that stay on the generated struct.
    pub fn data_fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|field| !field.is_schema())
    }

    /// Associated functions that construct the host.
    ///
    /// A constructor takes no receiver and returns `Self` or the host type
    /// by name.
    pub fn constructors(&self) -> impl Iterator<Item = &ImplItemFn> {
        self.methods
            .iter()
            .filter(|method| method.sig.receiver().is_none() && self.returns_self(&method.sig.output))
    }

    /// Methods the host declares that are not constructors.
    pub fn plain_methods(&self) -> impl Iterator<Item = &ImplItemFn> {
        self.methods
            .iter()
            .filter(|method| method.sig.receiver().is_some() || !self.returns_self(&method.sig.output))
    }

    fn returns_self(&self, output: &ReturnType) -> bool {
        let ReturnType::Type(_, ty) = output else {
            return false;
        };
        let Type::Path(path) = ty.as_ref() else {
            return false;
        };
        path.qself.is_none()
            && path.path.segments.len() == 1
            && (path.path.segments[0].ident == "Self" || path.path.segments[0].ident == self.ident)
    }
}

/// A field of a host struct: `name: Type = default;`.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub ty: Option<Type>,
    pub default: Option<Expr>,
    pub span: Span,
}

impl FieldDecl {
    /// Returns `true` for the compile-time-only `schema` field.
    pub fn is_schema(&self) -> bool {
        self.ident.unraw() == SCHEMA_FIELD
    }
}
