//! Semantic-preserving cleanup of finished section maps.
//!
//! Builders sometimes assemble one logical command across several pushes,
//! ending intermediate fragments with a `\` continuation marker, and string
//! concatenation leaves stray whitespace behind. The normalizer:
//!
//! - joins continuation fragments into a single line,
//! - collapses whitespace runs outside double-quoted values,
//! - pads bracketed expressions as `[ find ... ]`,
//! - drops lines that end up empty.
//!
//! Sections and lines are never reordered and quoted values are copied byte
//! for byte. Running the normalizer twice gives the same map as running it
//! once.

use crate::map::{SectionKey, SectionMap};

/// Normalize every section of `map` into a new map.
pub fn normalize<K: SectionKey>(map: &SectionMap<K>) -> SectionMap<K> {
    let mut out = SectionMap::new();
    for (key, lines) in map.iter() {
        out.ensure(key.clone()).extend(normalize_lines(lines));
    }
    out
}

/// Normalize one section's lines.
pub fn normalize_lines(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut pending: Option<String> = None;

    for line in lines {
        let trimmed = line.trim_end();
        let (body, continues) = match trimmed.strip_suffix('\\') {
            Some(body) if !ends_inside_quotes(body) => (body, true),
            _ => (trimmed, false),
        };

        let joined = match pending.take() {
            Some(mut prev) => {
                prev.push(' ');
                prev.push_str(body);
                prev
            }
            None => body.to_string(),
        };

        if continues {
            pending = Some(joined);
            continue;
        }
        push_canonical(&mut out, &joined);
    }

    if let Some(rest) = pending {
        push_canonical(&mut out, &rest);
    }
    out
}

fn push_canonical(out: &mut Vec<String>, line: &str) {
    let canonical = canonicalize_line(line);
    if !canonical.is_empty() {
        out.push(canonical);
    }
}

/// Canonical spacing for a single command line.
pub fn canonicalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_quotes = false;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in line.trim().chars() {
        if in_quotes {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            continue;
        }

        match ch {
            c if c.is_whitespace() => pending_space = true,
            '[' => {
                flush_space(&mut out, &mut pending_space);
                out.push('[');
                pending_space = true;
            }
            ']' => {
                pending_space = false;
                if !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push(']');
            }
            '"' => {
                flush_space(&mut out, &mut pending_space);
                out.push('"');
                in_quotes = true;
            }
            _ => {
                flush_space(&mut out, &mut pending_space);
                out.push(ch);
            }
        }
    }
    out
}

fn flush_space(out: &mut String, pending_space: &mut bool) {
    if *pending_space && !out.is_empty() {
        out.push(' ');
    }
    *pending_space = false;
}

// A trailing backslash inside an unterminated quote is an escape, not a
// continuation marker.
fn ends_inside_quotes(body: &str) -> bool {
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in body.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            _ => {}
        }
    }
    in_quotes || escaped
}
