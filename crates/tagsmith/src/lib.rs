//! # Tagsmith
//!
//! Statically checked markup builders. A host declaration carries a
//! `schema` describing which tags may appear where; [`markup_builder!`]
//! turns it into a family of builder types whose methods write well-formed
//! nested markup to any [`std::io::Write`]. A tag's children are exactly
//! the tags declared inside it, so misplaced markup does not compile.
//!
//! ## Usage
//!
//! ```
//! use tagsmith::{TagError, markup_builder};
//!
//! markup_builder! {
//!     pub struct Page {
//!         schema = || {
//!             h1();
//!             ul(Options { allow_text: false, attributes: [class] }, || {
//!                 li();
//!             });
//!         };
//!     }
//! }
//!
//! fn main() -> Result<(), TagError> {
//!     let mut out = Vec::new();
//!     let mut page = Page::new(&mut out);
//!
//!     page.h1_text("Menu")?;
//!     page.ul_with_attrs(&[("class", "menu")], |ul| {
//!         ul.li_text("Soup")?;
//!         ul.li_text("Bread")
//!     })?;
//!
//!     assert_eq!(
//!         String::from_utf8(out).unwrap(),
//!         "<h1>Menu</h1><ul class=\"menu\"><li>Soup</li><li>Bread</li></ul>"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Declarations
//!
//! The macro accepts any number of `struct` declarations. Inside a host:
//!
//! - `schema = || { .. };` lists the tags, one bare call per statement. A
//!   trailing closure or block argument nests a schema; a leading
//!   `Options { .. }` literal configures the tag.
//! - Other fields (`name: Type = default;`) stay on the generated struct.
//! - Methods are kept on the host. Constructors are not allowed; the
//!   generated `new(out)` is the only one.
//!
//! For each tag `t` the enclosing type gets `t()`, `t_text(&str)` and
//! `t_with(body)`, plus `t_with_attrs(attributes, body)` when `attributes`
//! is declared. `allow_text: false` drops the first two.
//!
//! Text is written as given, without escaping. Attribute values are
//! escaped.
//!
//! ## Limitations
//!
//! Every generated method name must be unique on its type. Since the
//! variants are told apart by suffix, a tag whose name is another tag's
//! suffixed method clashes with it and is rejected with `E302`:
//!
//! ```compile_fail
//! use tagsmith::markup_builder;
//!
//! markup_builder! {
//!     struct Page {
//!         // `p` already generates `p_text`.
//!         schema = || {
//!             p();
//!             p_text();
//!         };
//!     }
//! }
//! # fn main() {}
//! ```
//!
//! The same applies to tags named after host methods and to a tag named
//! `new`. The macro always uses the default suffixes; the CLI can be
//! configured with others.

pub use tagsmith_core::{AbstractTag, Attributes, MarkupTag, Sink, TagBase, TagError};
pub use tagsmith_macros::markup_builder;
