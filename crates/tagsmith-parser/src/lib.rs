//! # Tagsmith Parser
//!
//! Front end of the markup builder generator. This crate turns the tokens
//! handed to `markup_builder!` into declarations, and a host's `schema`
//! value into an ordered tree of tag invocations with resolved options.
//!
//! ## Usage
//!
//! ```
//! # use tagsmith_parser::{build_declarations, parse_schema, Declaration, Options};
//! # use tagsmith_parser::error::DiagnosticCollector;
//! let tokens = quote::quote! {
//!     struct Page {
//!         schema = || {
//!             p();
//!             ul(|| { li(); });
//!         };
//!     }
//! };
//!
//! let declarations = build_declarations(tokens).unwrap();
//! let Declaration::Host(host) = &declarations[0] else { unreachable!() };
//!
//! let mut diagnostics = DiagnosticCollector::new();
//! let value = host.schema_field().and_then(|field| field.default.as_ref()).unwrap();
//! let schema = parse_schema(value, &mut diagnostics).unwrap();
//!
//! assert!(!diagnostics.has_errors());
//! assert_eq!(schema.invocations()[1].tag_name(), "ul");
//! assert_eq!(Options::resolve(schema.invocations()[0].options_literal()), Options::default());
//! ```

pub mod error;
mod options;
mod parser;
mod parser_types;
mod schema;
mod schema_types;
mod span;

pub use options::Options;
pub use parser::{build_declarations, recover_declarations};
pub use parser_types::{Declaration, FieldDecl, HostDecl, OtherItem, SCHEMA_FIELD};
pub use schema::{is_block_shaped, parse_schema};
pub use schema_types::{Invocation, LiteralValue, MapEntry, MapLiteral, Schema};
pub use span::{Span, Spanned};
