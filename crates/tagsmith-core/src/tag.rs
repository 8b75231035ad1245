//! The base capability shared by all generated builder types.
//!
//! A generated builder holds a [`TagBase`] and implements [`AbstractTag`]
//! (and [`MarkupTag`] when it stands for a tag rather than for a root). The
//! provided trait methods are the only operations the generated code calls:
//! [`AbstractTag::write`] for raw text and [`AbstractTag::delegate_to_tag`]
//! for nested bodies.

use std::{fmt, io};

use html_escape::encode_double_quoted_attribute;
use log::trace;

use crate::TagError;

/// The output destination shared by every tag in one root-to-leaf chain.
pub type Sink<'a> = &'a mut (dyn io::Write + 'a);

/// Attribute pairs written into an opening tag, in order.
pub type Attributes<'a> = &'a [(&'a str, &'a str)];

/// State embedded in every generated builder type.
///
/// Holds the output sink. Nested tags receive a re-borrow of the same sink,
/// so everything written anywhere in the tree lands in one stream.
pub struct TagBase<'a> {
    out: Sink<'a>,
}

impl<'a> TagBase<'a> {
    /// Create the base over an output sink.
    pub fn new(out: Sink<'a>) -> Self {
        Self { out }
    }

    /// Append `text` to the sink verbatim.
    pub fn write(&mut self, text: &str) -> Result<(), TagError> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Re-borrow the sink for a nested tag.
    pub fn out(&mut self) -> Sink<'_> {
        &mut *self.out
    }

    /// Write `<name ...>`, rendering each attribute as `key="value"`.
    ///
    /// Attribute values are escaped for a double-quoted context; keys are
    /// written as given.
    pub fn open_tag(&mut self, name: &str, attributes: Option<Attributes<'_>>) -> Result<(), TagError> {
        self.write("<")?;
        self.write(name)?;
        for (key, value) in attributes.unwrap_or_default() {
            self.write(" ")?;
            self.write(key)?;
            self.write("=\"")?;
            self.write(&encode_double_quoted_attribute(value))?;
            self.write("\"")?;
        }
        self.write(">")
    }

    /// Write `</name>`.
    pub fn close_tag(&mut self, name: &str) -> Result<(), TagError> {
        self.write("</")?;
        self.write(name)?;
        self.write(">")
    }
}

impl fmt::Debug for TagBase<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagBase").finish_non_exhaustive()
    }
}

/// Base capability of a generated builder type.
pub trait AbstractTag<'a>: Sized {
    /// Construct the builder over `out`.
    fn with_sink(out: Sink<'a>) -> Self;

    /// The embedded base state.
    fn base(&mut self) -> &mut TagBase<'a>;

    /// Append `text` to the output sink, unescaped.
    fn write(&mut self, text: &str) -> Result<(), TagError> {
        self.base().write(text)
    }

    /// Render a nested tag of type `T` around the output of `body`.
    ///
    /// Writes the opening tag (with `attributes`, if any), instantiates `T`
    /// over the same sink, runs `body` against it and finally writes the
    /// closing tag. The closing tag is not written when `body` fails.
    fn delegate_to_tag<'s, T, F>(
        &'s mut self,
        body: F,
        attributes: Option<Attributes<'_>>,
    ) -> Result<(), TagError>
    where
        'a: 's,
        T: MarkupTag<'s>,
        F: FnOnce(&mut T) -> Result<(), TagError>,
    {
        trace!(tag = T::NAME; "Delegating to nested tag");

        let base = self.base();
        base.open_tag(T::NAME, attributes)?;

        let mut tag = T::with_sink(base.out());
        body(&mut tag)?;
        tag.base().close_tag(T::NAME)
    }
}

/// A builder type that stands for one named tag.
pub trait MarkupTag<'a>: AbstractTag<'a> {
    /// The markup name written in the opening and closing tags.
    const NAME: &'static str;
}
