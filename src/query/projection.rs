//! Key projection
//!
//! Decides which attributes a result row carries, and in what order:
//! filter keys first (filter order, deduplicated), then the remaining
//! entries of `keys` in their given order. A key is emitted for a row only
//! when the event actually has it.

use std::collections::{HashMap, HashSet};

/// Ordered, duplicate-free list of attribute names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyProjection {
    keys: Vec<String>,
}

impl KeyProjection {
    /// Starts an empty projection
    pub fn builder() -> KeyProjectionBuilder {
        KeyProjectionBuilder::default()
    }

    /// Filter keys first, then `keys`
    pub fn for_query<'a, F, K>(filter_keys: F, keys: K) -> Self
    where
        F: IntoIterator<Item = &'a str>,
        K: IntoIterator<Item = &'a str>,
    {
        Self::builder().extend(filter_keys).extend(keys).build()
    }

    /// Projected attribute names, in emission order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns `(key, value)` pairs for the keys present in `data`
    pub fn project<'a>(
        &'a self,
        data: &'a HashMap<String, String>,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.keys
            .iter()
            .filter_map(move |key| data.get(key).map(|value| (key.as_str(), value.as_str())))
    }
}

/// Builder that keeps first-seen order and drops repeats
#[derive(Debug, Default)]
pub struct KeyProjectionBuilder {
    keys: Vec<String>,
    seen: HashSet<String>,
}

impl KeyProjectionBuilder {
    /// Appends `key` unless it was already added
    pub fn push(&mut self, key: &str) {
        if self.seen.insert(key.to_string()) {
            self.keys.push(key.to_string());
        }
    }

    /// Appends each key in order, skipping repeats
    pub fn extend<'a, I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.push(key);
        }
        self
    }

    /// Finishes the projection
    pub fn build(self) -> KeyProjection {
        KeyProjection { keys: self.keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_filter_keys_come_first() {
        let projection =
            KeyProjection::for_query(["dim1", "dim3"], ["dim1", "dim2"]);
        assert_eq!(projection.keys(), ["dim1", "dim3", "dim2"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let projection = KeyProjection::for_query(["a", "a", "b"], ["b", "c", "c", "a"]);
        assert_eq!(projection.keys(), ["a", "b", "c"]);
    }

    #[test]
    fn test_absent_keys_skipped_per_row() {
        let projection = KeyProjection::for_query(["dim1"], ["dim1", "dim2", "dim3"]);
        let row = data(&[("dim1", "foo"), ("dim2", "bar2"), ("other", "x")]);

        let projected: Vec<_> = projection.project(&row).collect();
        assert_eq!(projected, vec![("dim1", "foo"), ("dim2", "bar2")]);
    }

    #[test]
    fn test_keys_outside_projection_never_emitted() {
        let projection = KeyProjection::for_query(std::iter::empty(), ["dim1", "dim2"]);
        let row = data(&[("a", "foo1")]);
        assert_eq!(projection.project(&row).count(), 0);
    }

    #[test]
    fn test_builder_push() {
        let mut builder = KeyProjection::builder();
        builder.push("x");
        builder.push("y");
        builder.push("x");
        assert_eq!(builder.build().keys(), ["x", "y"]);
    }
}
