//! Rendering tests for builders generated by `markup_builder!`
//!
//! These tests expand real declarations and render through the generated
//! types, so they also prove the generated code compiles.

use std::io;

use proptest::prelude::*;

use tagsmith::{AbstractTag, MarkupTag, TagError, markup_builder};

markup_builder! {
    pub struct Page {
        schema = || {
            h1();
            p();
            p();
            ul(Options { allow_text: false }, || {
                li();
            });
            ul(Options { attributes: [class] }, || {
                li(|| { a(Options { attributes: [href, title] }); });
            });
        };
    }

    struct Pair {
        schema = || {
            a(|| { b(); });
            c(|| { b(); });
        };
    }

    struct Card {
        title: String = "untitled".to_string();
        views: usize;
        schema = || {
            div(Options { attributes: [] }, || { r#type(); });
        };

        fn title(&self) -> &str {
            &self.title
        }

        fn render_title(&mut self) -> Result<(), TagError> {
            let title = self.title.clone();
            self.div_with(|div| div.type_text(&title))
        }
    }

    struct Bare;
}

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), TagError>,
{
    let mut buf = Vec::new();
    f(&mut buf).expect("rendering succeeds");
    String::from_utf8(buf).expect("output is UTF-8")
}

#[test]
fn test_text_method_writes_exact_markup() {
    let out = render(|buf| Page::new(buf).h1_text("hello"));
    assert_eq!(out, "<h1>hello</h1>");
}

#[test]
fn test_empty_method_writes_empty_element() {
    let out = render(|buf| Page::new(buf).p());
    assert_eq!(out, "<p></p>");
}

#[test]
fn test_text_is_not_escaped() {
    let out = render(|buf| Page::new(buf).p_text("<b>&amp;</b>"));
    assert_eq!(out, "<p><b>&amp;</b></p>");
}

#[test]
fn test_sequence_of_calls() {
    let out = render(|buf| {
        let mut page = Page::new(buf);
        page.h1_text("Title")?;
        page.p_text("one")?;
        page.p_text("two")
    });
    assert_eq!(out, "<h1>Title</h1><p>one</p><p>two</p>");
}

#[test]
fn test_nested_body() {
    let out = render(|buf| {
        Page::new(buf).ul_with(|ul| {
            ul.li_text("first")?;
            ul.li_with(|li| li.a_text("link"))
        })
    });
    assert_eq!(out, "<ul><li>first</li><li><a>link</a></li></ul>");
}

#[test]
fn test_merged_sites_add_methods() {
    // The first `ul` disallows text, the second site adds the text methods
    // and the attributed body.
    let out = render(|buf| {
        let mut page = Page::new(buf);
        page.ul_text("plain")?;
        page.ul_with_attrs(&[("class", "menu")], |ul| ul.li())
    });
    assert_eq!(out, "<ul>plain</ul><ul class=\"menu\"><li></li></ul>");
}

#[test]
fn test_attribute_values_are_escaped() {
    let out = render(|buf| {
        Page::new(buf).ul_with(|ul| {
            ul.li_with(|li| {
                li.a_with_attrs(&[("href", "/a?x=1&y=2"), ("title", "say \"hi\"")], |a| {
                    a.write("go")
                })
            })
        })
    });
    assert_eq!(
        out,
        "<ul><li><a href=\"/a?x=1&amp;y=2\" title=\"say &quot;hi&quot;\">go</a></li></ul>"
    );
}

#[test]
fn test_same_tag_under_two_parents_is_two_types() {
    fn under_a(_: &mut PairATagBTag<'_>) {}
    fn under_c(_: &mut PairCTagBTag<'_>) {}

    let out = render(|buf| {
        let mut pair = Pair::new(buf);
        pair.a_with(|a| {
            a.b_with(|b| {
                under_a(b);
                Ok(())
            })
        })?;
        pair.c_with(|c| {
            c.b_with(|b| {
                under_c(b);
                Ok(())
            })
        })
    });
    assert_eq!(out, "<a><b></b></a><c><b></b></c>");
    assert_eq!(PairATagBTag::NAME, PairCTagBTag::NAME);
}

#[test]
fn test_empty_attribute_list_still_generates_attributed_method() {
    let out = render(|buf| Card::new(buf).div_with_attrs(&[("id", "card")], |div| div.r#type()));
    assert_eq!(out, "<div id=\"card\"><type></type></div>");
}

#[test]
fn test_host_fields_and_methods_are_kept() {
    let mut buf = Vec::new();
    let mut card = Card::new(&mut buf);
    assert_eq!(card.title(), "untitled");
    assert_eq!(card.views, 0);

    card.title = "News".to_string();
    card.render_title().unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "<div><type>News</type></div>");
}

#[test]
fn test_host_without_schema_has_base_capability() {
    let out = render(|buf| Bare::new(buf).write("raw"));
    assert_eq!(out, "raw");
}

#[test]
fn test_tag_names() {
    assert_eq!(PageUlTag::NAME, "ul");
    assert_eq!(PageUlTagLiTagATag::NAME, "a");
    assert_eq!(CardDivTagTypeTag::NAME, "type");
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_errors_propagate() {
    let mut sink = FailingWriter;
    let err = Page::new(&mut sink).p_text("lost").unwrap_err();
    assert!(matches!(err, TagError::Io(_)));
    assert_eq!(err.to_string(), "I/O error: sink closed");
}

#[test]
fn test_body_error_stops_rendering() {
    let mut buf = Vec::new();
    let result = Page::new(&mut buf).ul_with(|ul| {
        ul.li_text("kept")?;
        Err(TagError::Io(io::Error::other("stop")))
    });
    assert!(result.is_err());
    assert_eq!(String::from_utf8(buf).unwrap(), "<ul><li>kept</li>");
}

proptest! {
    #[test]
    fn prop_text_is_wrapped_verbatim(text in ".*") {
        let out = render(|buf| Page::new(buf).p_text(&text));
        prop_assert_eq!(out, format!("<p>{text}</p>"));
    }
}
