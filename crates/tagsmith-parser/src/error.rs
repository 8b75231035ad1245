//! Diagnostics reported while reading markup builder declarations.
//!
//! A [`Diagnostic`] carries a [`Severity`], an optional [`ErrorCode`], any
//! number of [`Label`]ed spans and a help line. Passes that can keep going
//! after a problem push into a [`DiagnosticCollector`]; passes that cannot
//! return a [`ParseError`].
//!
//! ```
//! use tagsmith_parser::{Span, error::{Diagnostic, ErrorCode}};
//!
//! let diag = Diagnostic::error("invalid schema invocation `self.p`")
//!     .with_code(ErrorCode::E301)
//!     .with_label(Span::call_site(), "tag calls cannot have a receiver")
//!     .with_help("schema statements must be bare calls such as `p()`");
//!
//! assert_eq!(diag.to_string(), "error[E301]: invalid schema invocation `self.p`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::{Label, LabelStyle};
pub use parse_error::ParseError;
pub use severity::Severity;
