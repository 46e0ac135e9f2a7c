use crate::map::{SectionKey, SectionMap};

/// Merge any number of section maps into one.
///
/// The result holds the union of all section keys in first-appearance order.
/// For each key the line lists are concatenated in the order the maps were
/// passed. Lines are never inspected or deduplicated, so
/// `merge([merge([a, b]), c]) == merge([a, b, c])`.
pub fn merge<K, I>(maps: I) -> SectionMap<K>
where
    K: SectionKey,
    I: IntoIterator<Item = SectionMap<K>>,
{
    let mut out = SectionMap::new();
    for map in maps {
        out.append(map);
    }
    out
}
