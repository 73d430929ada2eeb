//! Tags
//!
//! Lowercase, deduplicated tag list that keeps insertion order for display.

use std::string::ToString;

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

/// An ordered list of unique lowercase tags, backed by `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags {
    tags: SmallVec<[String; 5]>,
}

impl Tags {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tag list from string slices, normalising and deduplicating them.
    pub fn from_strs(tags: &[&str]) -> Self {
        let mut collection = Self::new();

        for tag in tags {
            collection.add(tag);
        }

        collection
    }

    /// Add a tag. Returns `false` when the tag is empty or already present.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = normalise(tag);

        if tag.is_empty() || self.contains(&tag) {
            return false;
        }

        self.tags.push(tag);

        true
    }

    /// Remove a tag. Returns `false` when the tag was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let tag = normalise(tag);

        let Some(pos) = self.tags.iter().position(|existing| *existing == tag) else {
            return false;
        };

        self.tags.remove(pos);

        true
    }

    /// Check if the list contains a tag.
    pub fn contains(&self, tag: &str) -> bool {
        let tag = normalise(tag);

        self.tags.iter().any(|existing| *existing == tag)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Convert the tags to a vector of strings.
    #[must_use]
    pub fn to_strs(&self) -> SmallVec<[String; 5]> {
        self.tags.clone()
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        let refs: Vec<&str> = raw.iter().map(String::as_str).collect();

        Ok(Self::from_strs(&refs))
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}

impl FromIterator<String> for Tags {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut collection = Self::new();

        for tag in iter {
            collection.add(&tag);
        }

        collection
    }
}

fn normalise(tag: &str) -> String {
    tag.trim().to_lowercase()
}

impl std::fmt::Display for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self.tags.iter().map(ToString::to_string).collect::<Vec<_>>();

        f.write_str(&joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_strs_normalises_and_dedups() {
        let tags = Tags::from_strs(&["Apple", " laptop ", "apple", ""]);

        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["apple", "laptop"]);
    }

    #[test]
    fn keeps_insertion_order() {
        let tags = Tags::from_strs(&["zeta", "alpha", "mu"]);

        assert_eq!(tags.to_strs().as_slice(), ["zeta", "alpha", "mu"]);
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut tags = Tags::from_strs(&["desk", "office"]);

        assert!(tags.remove("DESK"));
        assert!(!tags.remove("desk"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn display_joins_with_commas() {
        let tags = Tags::from_strs(&["bike", "trek"]);

        assert_eq!(tags.to_string(), "bike, trek");
    }
}
