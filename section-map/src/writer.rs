use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::format::{format_json, format_text};
use crate::map::{SectionKey, SectionMap};

/// Errors that can occur while writing a section map to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write output file.
    #[error("failed to write script file: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk rendering of a section map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    /// Device script (`.rsc`).
    Text,
    /// JSON object of section path to command lines.
    Json,
}

/// Render a section map in the requested format.
pub fn write<K: SectionKey>(map: &SectionMap<K>, format: ScriptFormat) -> String {
    match format {
        ScriptFormat::Text => format_text(map),
        ScriptFormat::Json => {
            let mut json = format_json(map);
            json.push('\n');
            json
        }
    }
}

/// Render a section map and write it to `path`.
pub fn write_file<K: SectionKey>(
    map: &SectionMap<K>,
    path: &Path,
    format: ScriptFormat,
) -> Result<(), WriteError> {
    fs::write(path, write(map, format))?;
    Ok(())
}
