use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::map::SectionMap;

/// Verbs that start a command inside an inline `/path verb ...` line.
const VERBS: &[&str] = &["add", "set", "remove", "enable", "disable", "unset"];

/// Errors that can occur while reading a device script into a [`SectionMap`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// A command appeared before any section header.
    #[error("line {line}: command outside of any section")]
    NoSection { line: usize },
    /// Failed to read input file.
    #[error("failed to read script file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a device script into a section map keyed by section path.
///
/// A line starting with `/` either opens a section (`/ip route`) or, when it
/// contains a command verb, is an inline command (`/ip route add ...`) that is
/// filed under its path. Comments (`#`) and blank lines are skipped. Lines are
/// kept verbatim; continuation fragments are left for the normalizer.
pub fn parse(script: &str) -> Result<SectionMap<String>, ParseError> {
    let mut map = SectionMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('/') {
            match split_inline(line) {
                Some((path, command)) => {
                    map.push(path.to_string(), command);
                    current = Some(path.to_string());
                }
                None => {
                    map.ensure(line.to_string());
                    current = Some(line.to_string());
                }
            }
            continue;
        }

        let Some(section) = current.clone() else {
            return Err(ParseError::NoSection { line: idx + 1 });
        };
        map.push(section, raw.trim_start());
    }

    Ok(map)
}

/// Read and parse a device script from `path`.
pub fn parse_file(path: &Path) -> Result<SectionMap<String>, ParseError> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

fn split_inline(line: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for token in line.split(' ') {
        if VERBS.contains(&token) {
            let path = line[..offset].trim_end();
            return Some((path, &line[offset..]));
        }
        offset += token.len() + 1;
    }
    None
}
