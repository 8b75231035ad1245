//! Options resolver.
//!
//! Turns the optional map literal of an invocation into [`Options`]. The
//! resolver never fails: unknown keys are ignored and malformed values are
//! coerced on a best-effort basis.

use indexmap::IndexSet;

use crate::schema_types::{LiteralValue, MapEntry, MapLiteral};

/// Keys that control text methods. The camel-case spelling is accepted too.
const ALLOW_TEXT_KEYS: [&str; 2] = ["allow_text", "allowText"];

/// Key that declares attribute names.
const ATTRIBUTES_KEY: &str = "attributes";

/// Per-invocation generation options.
///
/// `attributes` distinguishes "absent" (`None`) from "present but empty"
/// (`Some` of an empty set): only presence enables the attributed body
/// method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    allow_text: bool,
    attributes: Option<IndexSet<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_text: true,
            attributes: None,
        }
    }
}

impl Options {
    pub fn new(allow_text: bool, attributes: Option<IndexSet<String>>) -> Self {
        Self {
            allow_text,
            attributes,
        }
    }

    /// Resolve options from an invocation's map literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagsmith_parser::{LiteralValue, MapEntry, MapLiteral, Options};
    ///
    /// let literal = MapLiteral::new(vec![
    ///     MapEntry::new("allow_text", LiteralValue::Bool(false)),
    ///     MapEntry::new("attributes", LiteralValue::List(vec![])),
    /// ]);
    ///
    /// let options = Options::resolve(Some(&literal));
    /// assert!(!options.allow_text());
    /// assert!(options.attributes().is_some_and(|names| names.is_empty()));
    ///
    /// assert_eq!(Options::resolve(None), Options::default());
    /// ```
    pub fn resolve(literal: Option<&MapLiteral>) -> Self {
        let mut options = Self::default();
        let Some(literal) = literal else {
            return options;
        };

        for entry in literal.entries() {
            let key = entry.key.as_str();
            if ALLOW_TEXT_KEYS.contains(&key) {
                options.allow_text = coerce_bool(&entry.value);
            } else if key == ATTRIBUTES_KEY {
                let names = options.attributes.get_or_insert_with(IndexSet::new);
                if let LiteralValue::List(items) = &entry.value {
                    names.extend(items.iter().cloned());
                }
            }
        }

        options
    }

    /// Whether the text methods are generated.
    pub fn allow_text(&self) -> bool {
        self.allow_text
    }

    /// Declared attribute names, or `None` when the key was absent.
    pub fn attributes(&self) -> Option<&IndexSet<String>> {
        self.attributes.as_ref()
    }

    /// Entries of `literal` that [`Options::resolve`] skips or cannot read as
    /// written, each with the reason.
    pub fn ignored_entries(literal: &MapLiteral) -> Vec<(&MapEntry, &'static str)> {
        literal
            .entries()
            .iter()
            .filter_map(|entry| {
                let key = entry.key.as_str();
                if key == ATTRIBUTES_KEY {
                    (!matches!(entry.value, LiteralValue::List(_)))
                        .then_some((entry, "`attributes` expects a list of names"))
                } else if ALLOW_TEXT_KEYS.contains(&key) {
                    None
                } else {
                    Some((entry, "unknown option"))
                }
            })
            .collect()
    }
}

fn coerce_bool(value: &LiteralValue) -> bool {
    match value {
        LiteralValue::Bool(value) => *value,
        other => other.text().eq_ignore_ascii_case("true"),
    }
}
