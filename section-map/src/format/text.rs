use crate::map::{SectionKey, SectionMap};

/// Format a section map as a device script.
///
/// Each non-empty section is written as its path on one line followed by its
/// commands, with a blank line between sections.
pub fn format_text<K: SectionKey>(map: &SectionMap<K>) -> String {
    let mut blocks = Vec::new();
    for (key, lines) in map.iter() {
        if lines.is_empty() {
            continue;
        }
        let mut block = String::from(key.path());
        for line in lines {
            block.push('\n');
            block.push_str(line);
        }
        blocks.push(block);
    }
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Format a one-line summary of section and command counts.
pub fn format_summary<K: SectionKey>(map: &SectionMap<K>) -> String {
    let sections = map.iter().filter(|(_, lines)| !lines.is_empty()).count();
    format!("sections={sections} commands={}", map.line_count())
}

#[cfg(test)]
mod tests {
    use super::{format_summary, format_text};
    use crate::map::SectionMap;

    #[test]
    fn renders_headers_and_skips_empty_sections() {
        let mut map = SectionMap::with_sections(["/interface bridge", "/ip route"]);
        map.push("/ip route", "add dst-address=0.0.0.0/0 gateway=wg-client");

        assert_eq!(
            format_text(&map),
            "/ip route\nadd dst-address=0.0.0.0/0 gateway=wg-client\n"
        );
        assert_eq!(format_summary(&map), "sections=1 commands=1");
    }

    #[test]
    fn empty_map_renders_nothing() {
        let map: SectionMap<&'static str> = SectionMap::new();
        assert_eq!(format_text(&map), "");
    }
}
