//! Token emission.
//!
//! Turns a [`BuilderModel`] into Rust items. Generated code names the
//! runtime through the configured crate path and calls trait methods with
//! fully qualified syntax, as a tag may itself be called `write` or `base`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Path, Visibility};

use crate::model::{BuilderModel, HostModel, MethodKind, MethodModel, TypeModel};

/// Emit every host of `model` with its tag types.
pub(crate) fn emit_model(model: &BuilderModel, runtime: &Path) -> TokenStream {
    model
        .hosts()
        .iter()
        .map(|host| emit_host(host, runtime))
        .collect()
}

fn emit_host(host: &HostModel, rt: &Path) -> TokenStream {
    let attrs = &host.attrs;
    let vis = &host.vis;
    let ident = host.root.ident();

    let fields: Vec<_> = host
        .fields
        .iter()
        .filter_map(|field| field.ty.as_ref().map(|ty| (field, ty)))
        .collect();
    let field_defs = fields.iter().map(|(field, ty)| {
        let attrs = &field.attrs;
        let vis = &field.vis;
        let name = &field.ident;
        quote! { #(#attrs)* #vis #name: #ty }
    });
    let field_inits = fields.iter().map(|(field, _)| {
        let name = &field.ident;
        match &field.default {
            Some(value) => quote! { #name: #value },
            None => quote! { #name: ::core::default::Default::default() },
        }
    });

    let methods = host.root.methods().map(|method| emit_method(method, rt));
    let passthrough = (!host.methods.is_empty()).then(|| {
        let methods = &host.methods;
        quote! {
            impl<'out> #ident<'out> {
                #(#methods)*
            }
        }
    });
    let tag_types = host
        .tag_types()
        .into_iter()
        .map(|ty| emit_tag_type(ty, vis, rt));

    quote! {
        #(#attrs)*
        #vis struct #ident<'out> {
            __base: #rt::TagBase<'out>,
            #(#field_defs,)*
        }

        #[allow(dead_code, non_snake_case)]
        impl<'out> #ident<'out> {
            /// Creates the builder over `out`.
            pub fn new(out: #rt::Sink<'out>) -> Self {
                Self {
                    __base: #rt::TagBase::new(out),
                    #(#field_inits,)*
                }
            }

            #(#methods)*
        }

        impl<'out> #rt::AbstractTag<'out> for #ident<'out> {
            fn with_sink(out: #rt::Sink<'out>) -> Self {
                Self::new(out)
            }

            fn base(&mut self) -> &mut #rt::TagBase<'out> {
                &mut self.__base
            }
        }

        #passthrough

        #(#tag_types)*
    }
}

fn emit_tag_type(ty: &TypeModel, vis: &Visibility, rt: &Path) -> TokenStream {
    let ident = ty.ident();
    let tag_name = ty.tag_name().unwrap_or_default();
    let doc = format!(" Builder for `<{tag_name}>` elements.");
    let methods = ty.methods().map(|method| emit_method(method, rt));

    quote! {
        #[doc = #doc]
        #[allow(dead_code, non_camel_case_types)]
        #vis struct #ident<'out> {
            __base: #rt::TagBase<'out>,
        }

        #[allow(dead_code, non_snake_case)]
        impl<'out> #ident<'out> {
            /// Creates the builder over `out`.
            pub fn new(out: #rt::Sink<'out>) -> Self {
                Self {
                    __base: #rt::TagBase::new(out),
                }
            }

            #(#methods)*
        }

        impl<'out> #rt::AbstractTag<'out> for #ident<'out> {
            fn with_sink(out: #rt::Sink<'out>) -> Self {
                Self::new(out)
            }

            fn base(&mut self) -> &mut #rt::TagBase<'out> {
                &mut self.__base
            }
        }

        impl<'out> #rt::MarkupTag<'out> for #ident<'out> {
            const NAME: &'static str = #tag_name;
        }
    }
}

fn emit_method(method: &MethodModel, rt: &Path) -> TokenStream {
    let ident = method.ident();
    let target = method.target();
    let tag_name = method.tag_name();
    let open = format!("<{tag_name}>");
    let close = format!("</{tag_name}>");
    let result = quote! { ::core::result::Result<(), #rt::TagError> };
    let body_bound = quote! {
        F: for<'body> ::core::ops::FnOnce(&mut #target<'body>) -> #result
    };

    match method.kind() {
        MethodKind::Empty => {
            let doc = format!(" Writes an empty `<{tag_name}>` element.");
            quote! {
                #[doc = #doc]
                pub fn #ident(&mut self) -> #result {
                    <Self as #rt::AbstractTag<'out>>::write(self, #open)?;
                    <Self as #rt::AbstractTag<'out>>::write(self, #close)
                }
            }
        }
        MethodKind::Text => {
            let doc = format!(" Writes `<{tag_name}>`, then `text` unescaped, then `</{tag_name}>`.");
            quote! {
                #[doc = #doc]
                pub fn #ident(&mut self, text: &str) -> #result {
                    <Self as #rt::AbstractTag<'out>>::write(self, #open)?;
                    <Self as #rt::AbstractTag<'out>>::write(self, text)?;
                    <Self as #rt::AbstractTag<'out>>::write(self, #close)
                }
            }
        }
        MethodKind::Body => {
            let doc = format!(" Writes a `<{tag_name}>` element around the output of `body`.");
            quote! {
                #[doc = #doc]
                pub fn #ident<F>(&mut self, body: F) -> #result
                where
                    #body_bound,
                {
                    <Self as #rt::AbstractTag<'out>>::delegate_to_tag::<#target<'_>, _>(
                        self,
                        body,
                        ::core::option::Option::None,
                    )
                }
            }
        }
        MethodKind::Attributed(names) => {
            let doc = format!(
                " Writes a `<{tag_name}>` element with `attributes` around the output of `body`."
            );
            let declared = if names.is_empty() {
                " No attributes were declared.".to_string()
            } else {
                let names: Vec<_> = names.iter().map(|name| format!("`{name}`")).collect();
                format!(" Declared attributes: {}.", names.join(", "))
            };
            quote! {
                #[doc = #doc]
                #[doc = ""]
                #[doc = #declared]
                pub fn #ident<F>(&mut self, attributes: &[(&str, &str)], body: F) -> #result
                where
                    #body_bound,
                {
                    <Self as #rt::AbstractTag<'out>>::delegate_to_tag::<#target<'_>, _>(
                        self,
                        body,
                        ::core::option::Option::Some(attributes),
                    )
                }
            }
        }
    }
}
