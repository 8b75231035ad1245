//! The `markup_builder!` procedural macro.
//!
//! A thin adapter over [`tagsmith_codegen::Generator`]: all validation and
//! synthesis happens there. Use the macro through the `tagsmith` crate,
//! which also provides the runtime the generated code calls.

use proc_macro::TokenStream;

use tagsmith_codegen::Generator;

/// Generate markup builder types from host declarations.
///
/// Each `struct` in the input becomes a builder over an output sink; its
/// `schema` field declares the tags it can emit. Every problem found in the
/// input is reported as its own compile error, and whatever could be
/// generated is still emitted.
///
/// See the `tagsmith` crate for the declaration syntax.
#[proc_macro]
pub fn markup_builder(input: TokenStream) -> TokenStream {
    Generator::default()
        .expand_or_report(proc_macro2::TokenStream::from(input))
        .into()
}
