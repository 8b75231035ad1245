//! Intermediate model of everything a generation pass produces.
//!
//! The synthesizer builds a [`BuilderModel`] and the emitter turns it into
//! tokens. [`Generator::analyze`](crate::Generator::analyze) returns the
//! model without emitting anything.

use indexmap::IndexMap;
use proc_macro2::Ident;
use syn::{Attribute, ImplItemFn, Visibility, ext::IdentExt as _};

use tagsmith_parser::{FieldDecl, Span};

use crate::registry::Registry;

/// All hosts generated from one macro input, in declaration order.
///
/// Hosts rejected by a host-level error are absent.
#[derive(Debug, Clone, Default)]
pub struct BuilderModel {
    hosts: Vec<HostModel>,
}

impl BuilderModel {
    pub(crate) fn push(&mut self, host: HostModel) {
        self.hosts.push(host);
    }

    pub fn hosts(&self) -> &[HostModel] {
        &self.hosts
    }

    /// Find a host by name.
    pub fn host(&self, name: &str) -> Option<&HostModel> {
        self.hosts.iter().find(|host| host.root.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// A host struct together with the tree of types generated for it.
#[derive(Debug, Clone)]
pub struct HostModel {
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) vis: Visibility,
    /// Fields kept on the host struct, the schema field excluded.
    pub(crate) fields: Vec<FieldDecl>,
    /// Host methods passed through unchanged.
    pub(crate) methods: Vec<ImplItemFn>,
    pub(crate) root: TypeModel,
}

impl HostModel {
    pub fn name(&self) -> String {
        self.root.name()
    }

    /// The host's own type: generated methods for top-level tags and the
    /// registry of top-level tag types.
    pub fn root(&self) -> &TypeModel {
        &self.root
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn methods(&self) -> &[ImplItemFn] {
        &self.methods
    }

    pub fn vis(&self) -> &Visibility {
        &self.vis
    }

    /// Every generated tag type below the host, depth first.
    pub fn tag_types(&self) -> Vec<&TypeModel> {
        self.root.descendants()
    }
}

/// A generated type: the host itself or a tag type.
#[derive(Debug, Clone)]
pub struct TypeModel {
    ident: Ident,
    tag_name: Option<String>,
    methods: IndexMap<String, MethodModel>,
    registry: Registry,
}

impl TypeModel {
    pub(crate) fn root(ident: Ident) -> Self {
        Self {
            ident,
            tag_name: None,
            methods: IndexMap::new(),
            registry: Registry::new(),
        }
    }

    pub(crate) fn for_tag(ident: Ident, tag_name: impl Into<String>) -> Self {
        Self {
            ident,
            tag_name: Some(tag_name.into()),
            methods: IndexMap::new(),
            registry: Registry::new(),
        }
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// The type name, without any raw identifier prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// The markup name, or `None` for a host.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// Generated methods in generation order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodModel> {
        self.methods.values()
    }

    pub fn method(&self, name: &str) -> Option<&MethodModel> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub(crate) fn insert_method(&mut self, name: String, method: MethodModel) {
        self.methods.insert(name, method);
    }

    /// Types for the tags invoked directly inside this one.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn child(&self, tag_name: &str) -> Option<&TypeModel> {
        self.registry.get(tag_name)
    }

    /// All types below this one, depth first, in invocation order.
    pub fn descendants(&self) -> Vec<&TypeModel> {
        let mut types = Vec::new();
        let mut stack: Vec<&TypeModel> = self.registry.types().rev().collect();
        while let Some(ty) = stack.pop() {
            types.push(ty);
            stack.extend(ty.registry.types().rev());
        }
        types
    }
}

/// One generated method on a [`TypeModel`].
#[derive(Debug, Clone)]
pub struct MethodModel {
    pub(crate) ident: Ident,
    pub(crate) kind: MethodKind,
    /// Tag the method renders.
    pub(crate) tag_name: String,
    /// Type the body closure receives.
    pub(crate) target: Ident,
    /// Invocation the method was generated for.
    pub(crate) span: Span,
}

impl MethodModel {
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    pub fn kind(&self) -> &MethodKind {
        &self.kind
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn target(&self) -> &Ident {
        &self.target
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// The four shapes of generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// `tag()`: an empty element.
    Empty,
    /// `tag_text(text)`: an element around unescaped text.
    Text,
    /// `tag_with(body)`: an element around a nested body.
    Body,
    /// `tag_with_attrs(attributes, body)`; carries the declared attribute names.
    Attributed(Vec<String>),
}
