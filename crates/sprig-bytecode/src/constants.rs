//! String interning for assembled programs.
//!
//! Identical strings share storage and ID. Used for tag names, attribute
//! names and values, text runs, comment bodies, and namespace URIs.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::ids::StringId;

/// Deduplicating, insertion-ordered pool of string constants.
///
/// The pool only grows; an ID handed out by [`ConstantPool::get`] stays valid
/// for the lifetime of the pool (and of any [`crate::Program`] it is frozen
/// into).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantPool {
    strings: IndexSet<String>,
}

impl ConstantPool {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a string, returning its ID.
    ///
    /// If the string was previously interned, returns the existing ID.
    pub fn get(&mut self, value: &str) -> StringId {
        if let Some(index) = self.strings.get_index_of(value) {
            return StringId(index as u32);
        }
        let (index, _) = self.strings.insert_full(value.to_owned());
        StringId(index as u32)
    }

    /// Returns the string for a given ID.
    ///
    /// # Panics
    /// Panics if the ID is out of range.
    pub fn resolve(&self, id: StringId) -> &str {
        self.strings
            .get_index(id.index())
            .expect("string id out of range")
    }

    /// True if `id` indexes an interned string.
    pub fn contains_id(&self, id: StringId) -> bool {
        id.index() < self.strings.len()
    }

    /// Returns all interned strings in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }

    /// Returns the number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_deduplicates() {
        let mut pool = ConstantPool::new();

        let a = pool.get("div");
        let b = pool.get("span");
        let c = pool.get("div");

        assert_eq!(a, StringId(0));
        assert_eq!(b, StringId(1));
        assert_eq!(c, a);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn resolve_returns_interned_string() {
        let mut pool = ConstantPool::new();
        pool.get("hello");
        pool.get("world");

        assert_eq!(pool.resolve(StringId(0)), "hello");
        assert_eq!(pool.resolve(StringId(1)), "world");
    }

    #[test]
    fn all_preserves_insertion_order() {
        let mut pool = ConstantPool::new();
        pool.get("a");
        pool.get("b");
        pool.get("a");
        pool.get("c");

        let strings: Vec<_> = pool.all().collect();
        assert_eq!(strings, vec!["a", "b", "c"]);
    }

    #[test]
    fn distinct_strings_get_distinct_ids() {
        let mut pool = ConstantPool::new();
        let ids: Vec<_> = ["p", "q", "r", "s"].iter().map(|s| pool.get(s)).collect();
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(pool.len(), 4);
    }

    #[test]
    #[should_panic(expected = "string id out of range")]
    fn resolve_out_of_range_panics() {
        let pool = ConstantPool::new();
        pool.resolve(StringId(0));
    }
}
