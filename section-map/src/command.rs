use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

/// One command line in `verb [selector] key=value ...` form.
///
/// Values passed through [`Command::arg`] are quoted when needed; values
/// passed through [`Command::raw`] are emitted verbatim, which is what
/// bracketed expressions such as `[ find default-name=wifi1 ]` need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: String,
    selector: Option<String>,
    args: Vec<(String, String)>,
}

impl Command {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            selector: None,
            args: Vec::new(),
        }
    }

    /// `add ...`
    pub fn add() -> Self {
        Self::new("add")
    }

    /// `set <selector> ...`
    pub fn set(selector: impl Into<String>) -> Self {
        let mut cmd = Self::new("set");
        cmd.selector = Some(selector.into());
        cmd
    }

    /// Append `key=value`, quoting the value when required.
    pub fn arg(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        let rendered = quote_value(&value).into_owned();
        self.args.push((key.to_string(), rendered));
        self
    }

    /// Append `key=value` only when a value is present.
    pub fn arg_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.arg(key, value),
            None => self,
        }
    }

    /// Append `key=value` without quoting.
    pub fn raw(mut self, key: &str, value: impl Into<String>) -> Self {
        self.args.push((key.to_string(), value.into()));
        self
    }

    /// Append a `yes`/`no` flag.
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.raw(key, yes_no(value))
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        if let Some(selector) = &self.selector {
            write!(f, " {selector}")?;
        }
        for (key, value) in &self.args {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

impl From<Command> for String {
    fn from(cmd: Command) -> Self {
        cmd.to_string()
    }
}

/// `[ find <property>=<value> ]` selector expression.
pub fn find_by(property: &str, value: &str) -> String {
    format!("[ find {property}={} ]", quote_value(value))
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Quote a value for the device CLI when it cannot be written bare.
///
/// Empty values and values containing whitespace, control characters or any
/// of `" ; $ [ ] { } \ =` are wrapped in double quotes. Inside, `"`, `\` and
/// `$` are backslash-escaped, line breaks and tabs become `\n`, `\r` and
/// `\t`, and any other control character becomes a `\XX` hex escape, so a
/// quoted value never spans more than one line.
pub fn quote_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | ';' | '$' | '[' | ']' | '{' | '}' | '\\' | '=')
        });
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                for byte in c.to_string().bytes() {
                    out.push_str(&format!("\\{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}
