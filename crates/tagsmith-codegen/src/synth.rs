//! Type and method synthesizer.
//!
//! Walks a parsed schema top-down and fills in the [`TypeModel`] tree: one
//! type per distinct tag name per scope, and per invocation the methods its
//! options call for. Repeated invocations at one scope merge into the same
//! type; each method is generated at most once.

use indexmap::IndexSet;
use log::{debug, trace};
use proc_macro2::Ident;

use tagsmith_parser::{
    HostDecl, Invocation, Options, Schema, Span,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

use crate::{
    config::NamingConfig,
    model::{HostModel, MethodKind, MethodModel, TypeModel},
};

/// Name of the generated constructor, reserved on every generated type.
const CONSTRUCTOR: &str = "new";

/// Build the model of one validated host.
pub(crate) fn synthesize_host(
    host: &HostDecl,
    schema: Option<&Schema>,
    naming: &NamingConfig,
    diagnostics: &mut DiagnosticCollector,
) -> HostModel {
    let mut root = TypeModel::root(host.ident.clone());
    let plain_methods: Vec<_> = host.plain_methods().cloned().collect();

    if let Some(schema) = schema {
        let reserved: IndexSet<String> = std::iter::once(CONSTRUCTOR.to_string())
            .chain(plain_methods.iter().map(|method| method.sig.ident.to_string()))
            .collect();

        let mut synthesizer = Synthesizer {
            naming,
            type_names: TypeNames::new(&root.name()),
            diagnostics,
        };
        synthesizer.schema(&mut root, schema, &reserved);
    }

    HostModel {
        attrs: host.attrs.clone(),
        vis: host.vis.clone(),
        fields: host.data_fields().cloned().collect(),
        methods: plain_methods,
        root,
    }
}

struct Synthesizer<'a> {
    naming: &'a NamingConfig,
    type_names: TypeNames,
    diagnostics: &'a mut DiagnosticCollector,
}

impl Synthesizer<'_> {
    fn schema(&mut self, scope: &mut TypeModel, schema: &Schema, reserved: &IndexSet<String>) {
        for invocation in schema.invocations() {
            self.invocation(scope, invocation, reserved);
        }
    }

    fn invocation(
        &mut self,
        scope: &mut TypeModel,
        invocation: &Invocation,
        reserved: &IndexSet<String>,
    ) {
        let tag_name = invocation.tag_name();
        let span = invocation.span();

        if make_ident(tag_name, span).is_none() {
            self.diagnostics.emit(
                Diagnostic::error(format!("invalid schema invocation `{tag_name}`"))
                    .with_code(ErrorCode::E301)
                    .with_label(span, "this name cannot be used for a method")
                    .with_help("rename the tag; `self`, `super`, `crate` and `Self` are not allowed"),
            );
            return;
        }

        if let Some(literal) = invocation.options_literal() {
            for (entry, reason) in Options::ignored_entries(literal) {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("ignored option `{}` on `{tag_name}`", entry.key))
                        .with_code(ErrorCode::W300)
                        .with_label(span, reason),
                );
            }
        }
        let options = Options::resolve(invocation.options_literal());

        let scope_name = scope.name();
        let type_names = &mut self.type_names;
        let naming = self.naming;
        let target = scope
            .registry_mut()
            .resolve_or_create(tag_name, || {
                let name = type_names.allocate(&scope_name, tag_name, naming.type_suffix());
                debug!(scope = scope_name.as_str(), tag = tag_name, name = name.as_str(); "Created tag type");
                TypeModel::for_tag(Ident::new(&name, span.inner()), tag_name)
            })
            .ident()
            .clone();

        for (name, kind) in self.planned_methods(tag_name, &options) {
            self.method(scope, name, kind, &target, invocation, reserved);
        }

        if let (Some(nested), Some(child)) =
            (invocation.nested(), scope.registry_mut().get_mut(tag_name))
        {
            let reserved = IndexSet::from([CONSTRUCTOR.to_string()]);
            self.schema(child, nested, &reserved);
        }
    }

    /// Methods an invocation asks for, in emission order.
    fn planned_methods(&self, tag_name: &str, options: &Options) -> Vec<(String, MethodKind)> {
        let mut methods = Vec::with_capacity(4);
        if options.allow_text() {
            methods.push((tag_name.to_string(), MethodKind::Empty));
            methods.push((
                format!("{tag_name}{}", self.naming.text_suffix()),
                MethodKind::Text,
            ));
        }
        methods.push((
            format!("{tag_name}{}", self.naming.body_suffix()),
            MethodKind::Body,
        ));
        if let Some(attributes) = options.attributes() {
            methods.push((
                format!("{tag_name}{}", self.naming.attributes_suffix()),
                MethodKind::Attributed(attributes.iter().cloned().collect()),
            ));
        }
        methods
    }

    fn method(
        &mut self,
        scope: &mut TypeModel,
        name: String,
        kind: MethodKind,
        target: &Ident,
        invocation: &Invocation,
        reserved: &IndexSet<String>,
    ) {
        let tag_name = invocation.tag_name();
        let span = invocation.span();

        if reserved.contains(&name) {
            self.diagnostics.emit(
                duplicate_method(&name, scope)
                    .with_label(span, format!("`{name}` is already declared on `{}`", scope.ident())),
            );
            return;
        }

        if let Some(existing) = scope.method(&name) {
            if existing.tag_name() != tag_name {
                self.diagnostics.emit(
                    duplicate_method(&name, scope)
                        .with_label(span, format!("`{tag_name}` generates `{name}`"))
                        .with_secondary_label(
                            existing.span(),
                            format!("already generated for `{}`", existing.tag_name()),
                        ),
                );
            } else {
                trace!(method = name.as_str(); "Method already generated");
            }
            return;
        }

        let Some(ident) = make_ident(&name, span) else {
            self.diagnostics.emit(
                Diagnostic::error(format!("invalid schema invocation `{tag_name}`"))
                    .with_code(ErrorCode::E301)
                    .with_label(span, format!("`{name}` is not a valid method name")),
            );
            return;
        };

        trace!(scope = scope.name(), method = name.as_str(); "Generated method");
        scope.insert_method(
            name,
            MethodModel {
                ident,
                kind,
                tag_name: tag_name.to_string(),
                target: target.clone(),
                span,
            },
        );
    }
}

fn duplicate_method(name: &str, scope: &TypeModel) -> Diagnostic {
    Diagnostic::error(format!(
        "duplicate method `{name}` on `{}`",
        scope.ident()
    ))
    .with_code(ErrorCode::E302)
    .with_help("rename one of the tags or the host method")
}

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 5] = ["_", "crate", "self", "Self", "super"];

/// Build an identifier for `name`, falling back to a raw identifier for
/// keywords. Returns `None` for names no identifier can spell.
fn make_ident(name: &str, span: Span) -> Option<Ident> {
    if NON_RAW_KEYWORDS.contains(&name) {
        return None;
    }
    let mut ident = syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .ok()?;
    ident.set_span(span.inner());
    Some(ident)
}

/// Unique type names within one host.
#[derive(Debug)]
pub(crate) struct TypeNames {
    taken: IndexSet<String>,
}

impl TypeNames {
    pub(crate) fn new(host: &str) -> Self {
        Self {
            taken: IndexSet::from([host.to_string()]),
        }
    }

    /// `scope + Capitalized(tag) + suffix`, numbered from 2 when taken.
    pub(crate) fn allocate(&mut self, scope: &str, tag_name: &str, suffix: &str) -> String {
        let base = format!("{scope}{}{suffix}", capitalize(tag_name));
        let mut name = base.clone();
        let mut counter = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{base}{counter}");
            counter += 1;
        }
        name
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
