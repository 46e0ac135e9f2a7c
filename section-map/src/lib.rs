//! Ordered command-section maps for line-oriented device configuration.
//!
//! A [`SectionMap`] maps configuration contexts (`/interface wifi`,
//! `/ip route`, ...) to the ordered command lines that belong in them. It is
//! the output contract of configuration generators: section order and line
//! order are significant, and nothing in this crate reorders or deduplicates
//! lines.
//!
//! - [`map`] — the ordered map and the [`SectionKey`] trait
//! - [`merge`] — concatenating merge of any number of maps
//! - [`normalize`] — idempotent, semantic-preserving line cleanup
//! - [`command`] — `verb key=value` line builder with value quoting
//! - [`format`], [`writer`], [`parser`] — script and JSON rendering, reading scripts back

pub mod command;
pub mod format;
pub mod map;
pub mod merge;
pub mod normalize;
pub mod parser;
pub mod writer;

pub use command::{find_by, quote_value, yes_no, Command};
pub use format::{format_json, format_summary, format_text};
pub use map::{SectionKey, SectionMap};
pub use merge::merge;
pub use normalize::normalize;
pub use parser::{parse, parse_file, ParseError};
pub use writer::{write, write_file, ScriptFormat, WriteError};
