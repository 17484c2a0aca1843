//! Parsing of `key = value` configuration files.
//!
//! Lines that are blank or start with `#`, `//` or `;` are ignored. Values may
//! be wrapped in matching single or double quotes, which are removed.

/// One `key = value` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEntry {
    /// 1-based line number in the file.
    pub line: usize,
    /// Lower-cased key.
    pub key: String,
    /// Value with surrounding whitespace and quotes removed.
    pub value: String,
}

/// Whether `line` carries no setting.
fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// Strip one pair of matching quotes around `value`.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// What: Split the setting lines of a configuration file.
///
/// Inputs:
/// - `text`: Whole file content
///
/// Output:
/// - Entries in file order, and the line numbers of lines that are neither
///   comments nor `key = value`.
///
/// Details:
/// - Splits on the first `=`; a value may itself contain `=` (URLs with queries).
/// - Lines with an empty key are reported as malformed.
#[must_use]
pub fn parse_entries(text: &str) -> (Vec<ConfigEntry>, Vec<usize>) {
    let mut entries = Vec::new();
    let mut malformed = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if is_comment_or_blank(raw) {
            continue;
        }
        match raw.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => entries.push(ConfigEntry {
                line: idx + 1,
                key: key.trim().to_ascii_lowercase(),
                value: unquote(value.trim()).to_string(),
            }),
            _ => malformed.push(idx + 1),
        }
    }
    (entries, malformed)
}
