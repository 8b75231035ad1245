//! Tagsmith Core Runtime
//!
//! This crate provides the base capability that every builder type generated
//! by `markup_builder!` is built on. It includes:
//!
//! - **Sink**: the shared output destination ([`Sink`])
//! - **Base**: the state every generated type embeds ([`TagBase`])
//! - **Capability**: the write and delegation operations ([`AbstractTag`], [`MarkupTag`])
//! - **Errors**: failures raised while rendering ([`TagError`])
//!
//! The generator only ever emits calls against these items; it never
//! reimplements them.

mod error;
mod tag;

pub use error::TagError;
pub use tag::{AbstractTag, Attributes, MarkupTag, Sink, TagBase};
