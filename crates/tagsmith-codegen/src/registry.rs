//! Scoped type registry.
//!
//! Every generated type owns one [`Registry`] mapping the tag names invoked
//! directly inside it to their types. Registries nest with the types, so
//! the same tag name under two parents always lands in two registries.

use indexmap::IndexMap;

use crate::model::TypeModel;

/// Tag name to generated type, in first-invocation order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<String, TypeModel>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the type registered for `tag_name`, creating it with `create`
    /// on first use. `create` runs at most once per tag name.
    pub fn resolve_or_create(
        &mut self,
        tag_name: &str,
        create: impl FnOnce() -> TypeModel,
    ) -> &mut TypeModel {
        self.types.entry(tag_name.to_string()).or_insert_with(create)
    }

    pub fn get(&self, tag_name: &str) -> Option<&TypeModel> {
        self.types.get(tag_name)
    }

    pub fn get_mut(&mut self, tag_name: &str) -> Option<&mut TypeModel> {
        self.types.get_mut(tag_name)
    }

    pub fn contains(&self, tag_name: &str) -> bool {
        self.types.contains_key(tag_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in first-invocation order.
    pub fn types(&self) -> impl DoubleEndedIterator<Item = &TypeModel> {
        self.types.values()
    }

    /// Registered tag names in first-invocation order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
