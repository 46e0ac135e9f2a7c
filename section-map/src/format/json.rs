use crate::map::{SectionKey, SectionMap};

/// Format a section map as a JSON object of section path to command lines.
pub fn format_json<K: SectionKey>(map: &SectionMap<K>) -> String {
    serde_json::to_string_pretty(map).unwrap_or_else(|_| "{}".to_string())
}
