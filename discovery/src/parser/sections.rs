//! Splits raw help output into named sections.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Key of the bucket collecting the remainder of every `Usage:` line.
pub const USAGE: &str = "usage";

static USAGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*usage:(.+)$").expect("static regex must compile"));
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S.*):$").expect("static regex must compile"));

/// Section name (lower-cased) to body lines, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<String, Vec<String>>,
}

impl SectionMap {
    /// Lines of `key`, or an empty slice when the section never appeared.
    pub fn get(&self, key: &str) -> &[String] {
        self.sections.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the bucket for `key`, inserting an empty one first if needed.
    pub fn entry(&mut self, key: &str) -> &mut Vec<String> {
        self.sections.entry(key.to_string()).or_default()
    }

    /// First `Usage:` remainder, if any.
    pub fn usage(&self) -> Option<&str> {
        self.get(USAGE).first().map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Groups help lines by section header.
///
/// - `Usage: ...` anywhere appends its remainder to the `usage` bucket.
/// - An unindented line ending in `:` opens the section named by the text
///   before the colon, lower-cased.
/// - A blank line closes the open section.
/// - Any other line goes to the open section, if there is one.
pub fn parse_sections<S: AsRef<str>>(lines: &[S]) -> SectionMap {
    let mut map = SectionMap::default();
    let mut current: Option<String> = None;

    for line in lines {
        let line = line.as_ref();
        if let Some(caps) = USAGE_LINE.captures(line) {
            map.entry(USAGE).push(caps[1].to_string());
        } else if let Some(caps) = HEADER_LINE.captures(line) {
            let key = caps[1].to_lowercase();
            map.entry(&key);
            current = Some(key);
        } else if line.trim().is_empty() {
            current = None;
        } else if let Some(key) = &current {
            map.entry(key).push(line.to_string());
        }
    }

    map
}
