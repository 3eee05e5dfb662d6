//! Option-line parsing.

use std::sync::LazyLock;

use completion_gen_core::{Metavar, Switch};
use regex::Regex;
use tracing::debug;

use super::sections::SectionMap;

/// Two or more spaces separate the switch column from its description.
static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("static regex must compile"));

/// Metavars that the target tools declare wrongly (or too vaguely) in
/// their own help output.
fn metavar_override(flag: &str) -> Option<Metavar> {
    let name = flag.trim_start_matches('-');
    if ["tlscacert", "tlscert", "tlskey"]
        .iter()
        .any(|suffix| name.ends_with(suffix))
    {
        Some(Metavar::File)
    } else if name == "config" {
        Some(Metavar::Path)
    } else {
        None
    }
}

/// Parses one line of an options section.
///
/// Returns `None` for lines without a column gap and for lines whose
/// first column holds no hyphenated token (wrapped description text).
///
/// ```
/// use completion_gen_core::Metavar;
/// use completion_gen_discovery::parser::parse_switch;
///
/// let switch = parse_switch("  -f, --file FILE   Name of the Dockerfile").unwrap();
/// assert_eq!(switch.shorts, vec!["f"]);
/// assert_eq!(switch.longs, vec!["file"]);
/// assert_eq!(switch.metavar, Some(Metavar::File));
/// ```
pub fn parse_switch(line: &str) -> Option<Switch> {
    let line = line.trim();
    let mut columns = COLUMN_GAP.splitn(line, 2);
    let spec = columns.next()?;
    let description = columns.next()?;

    let mut names = Vec::new();
    let mut metavar = None;
    for token in spec.split(", ") {
        let flag = match token.split_once(' ') {
            Some((flag, declared)) => {
                metavar = Some(
                    metavar_override(flag)
                        .unwrap_or_else(|| Metavar::classify(declared.trim_start())),
                );
                flag
            }
            None => token,
        };
        if !flag.is_empty() {
            names.push(flag);
        }
    }

    if !names.iter().any(|name| name.starts_with('-')) {
        debug!(line, "Skipping options line without a flag");
        return None;
    }

    let (longs, shorts): (Vec<&str>, Vec<&str>) =
        names.into_iter().partition(|name| name.starts_with("--"));
    let strip = |names: Vec<&str>| {
        names
            .into_iter()
            .map(|name| name.trim_start_matches('-').to_string())
            .collect::<Vec<_>>()
    };

    Some(Switch::new(
        strip(shorts),
        strip(longs),
        Some(description.to_string()),
        metavar,
    ))
}

/// Parses every switch in the `options` section.
pub fn parse_switches(sections: &SectionMap) -> Vec<Switch> {
    sections
        .get("options")
        .iter()
        .filter_map(|line| parse_switch(line))
        .collect()
}
