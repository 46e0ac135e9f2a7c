use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A key identifying one configuration context (for example `/ip route`).
pub trait SectionKey: Clone + Eq + Hash + Debug {
    /// Context path rendered as the section header.
    fn path(&self) -> &str;
}

impl SectionKey for &'static str {
    fn path(&self) -> &str {
        self
    }
}

impl SectionKey for String {
    fn path(&self) -> &str {
        self.as_str()
    }
}

/// Ordered mapping from section key to the ordered command lines of that section.
///
/// Sections keep the order in which they first appeared and lines keep the
/// order in which they were pushed. Nothing in this type ever reorders,
/// deduplicates or inspects command text.
#[derive(Debug, Clone)]
pub struct SectionMap<K: SectionKey> {
    sections: IndexMap<K, Vec<String>>,
}

impl<K: SectionKey> Default for SectionMap<K> {
    fn default() -> Self {
        Self {
            sections: IndexMap::new(),
        }
    }
}

impl<K: SectionKey> SectionMap<K> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map whose section order is fixed up front.
    ///
    /// Every key starts with no lines. Combined with [`SectionMap::prune_empty`]
    /// this lets a caller impose a canonical section order independent of the
    /// order in which builders happen to touch sections.
    pub fn with_sections(keys: impl IntoIterator<Item = K>) -> Self {
        let mut map = Self::new();
        for key in keys {
            map.sections.entry(key).or_default();
        }
        map
    }

    /// Append one command line to a section, creating the section if needed.
    pub fn push(&mut self, key: K, line: impl Into<String>) {
        self.sections.entry(key).or_default().push(line.into());
    }

    /// Append several command lines to a section in iteration order.
    pub fn extend<I>(&mut self, key: K, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sections
            .entry(key)
            .or_default()
            .extend(lines.into_iter().map(Into::into));
    }

    /// Register a section without adding lines and return its line list.
    pub fn ensure(&mut self, key: K) -> &mut Vec<String> {
        self.sections.entry(key).or_default()
    }

    /// Concatenate every section of `other` onto this map.
    ///
    /// Sections unknown to `self` are appended after the existing ones, in the
    /// order `other` holds them.
    pub fn append(&mut self, other: SectionMap<K>) {
        for (key, lines) in other.sections {
            self.sections.entry(key).or_default().extend(lines);
        }
    }

    /// Lines of one section; empty when the section is absent.
    pub fn get(&self, key: &K) -> &[String] {
        self.sections.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &K) -> bool {
        self.sections.contains_key(key)
    }

    /// Iterate sections in order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[String])> {
        self.sections.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Section keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.sections.keys()
    }

    /// All lines across all sections, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections.values().flatten().map(String::as_str)
    }

    /// Number of sections (including empty ones).
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of command lines.
    pub fn line_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Drop sections that hold no lines, keeping the order of the rest.
    pub fn prune_empty(&mut self) {
        self.sections.retain(|_, lines| !lines.is_empty());
    }

    /// Keep only the sections accepted by `keep`.
    pub fn retain_sections(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.sections.retain(|key, _| keep(key));
    }
}

impl<K: SectionKey> PartialEq for SectionMap<K> {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order; section order is part of the contract.
        self.sections.len() == other.sections.len()
            && self.sections.iter().eq(other.sections.iter())
    }
}

impl<K: SectionKey> Eq for SectionMap<K> {}

impl<K: SectionKey> IntoIterator for SectionMap<K> {
    type Item = (K, Vec<String>);
    type IntoIter = indexmap::map::IntoIter<K, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

impl<K: SectionKey> FromIterator<(K, String)> for SectionMap<K> {
    fn from_iter<T: IntoIterator<Item = (K, String)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, line) in iter {
            map.push(key, line);
        }
        map
    }
}

impl<K: SectionKey> Serialize for SectionMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, lines) in &self.sections {
            out.serialize_entry(key.path(), lines)?;
        }
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::SectionMap;

    #[test]
    fn preserves_first_appearance_order() {
        let mut map: SectionMap<&'static str> = SectionMap::new();
        map.push("/ip route", "add a");
        map.push("/interface list", "add b");
        map.push("/ip route", "add c");

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["/ip route", "/interface list"]);
        assert_eq!(map.get(&"/ip route"), ["add a", "add c"]);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: SectionMap<&'static str> = [("/a", "x".to_string()), ("/b", "y".to_string())]
            .into_iter()
            .collect();
        let b: SectionMap<&'static str> = [("/b", "y".to_string()), ("/a", "x".to_string())]
            .into_iter()
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn prune_empty_keeps_seeded_order() {
        let mut map = SectionMap::with_sections(["/a", "/b", "/c"]);
        map.push("/c", "add c");
        map.push("/a", "add a");
        map.prune_empty();

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["/a", "/c"]);
    }
}
