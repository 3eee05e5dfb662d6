//! Subcommand listing and per-subcommand help parsing.

use std::sync::LazyLock;

use completion_gen_core::Subcommand;
use regex::Regex;
use tracing::{debug, info};

use super::sections::{SectionMap, parse_sections};
use super::switches::parse_switches;
use crate::error::{GenerateError, UsageParseError};
use crate::extractor::HelpSource;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Number of leading usage fields that never name a positional argument.
///
/// The usage remainder keeps the separator that followed `Usage:`, so the
/// first field is normally empty; the binary and subcommand names follow.
const USAGE_PREFIX_FIELDS: usize = 3;

/// Placeholders pinned for subcommands whose usage text is known to be
/// misleading.
pub fn argument_override(command: &str) -> Option<Vec<String>> {
    match command {
        "push" | "pull" => Some(vec!["REPOSITORY|IMAGE".to_string()]),
        "images" => Some(vec!["REPOSITORY".to_string()]),
        _ => None,
    }
}

/// Splits a command-listing line into name and description.
///
/// Only lines indented by at least two spaces are listings. A single
/// trailing `*` on the name is dropped.
///
/// ```
/// use completion_gen_discovery::parser::parse_subcommand_line;
///
/// let (name, description) = parse_subcommand_line("  buildx*     Docker Buildx").unwrap();
/// assert_eq!(name, "buildx");
/// assert_eq!(description.as_deref(), Some("Docker Buildx"));
/// ```
pub fn parse_subcommand_line(line: &str) -> Option<(String, Option<String>)> {
    if !line.starts_with("  ") {
        return None;
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (name, description) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim_start().to_string())),
        None => (trimmed, None),
    };
    let name = name.strip_suffix('*').unwrap_or(name);
    Some((name.to_string(), description))
}

/// Extracts raw positional placeholders from a usage remainder.
///
/// ```
/// use completion_gen_discovery::parser::parse_usage_arguments;
///
/// assert_eq!(
///     parse_usage_arguments("  docker rm [OPTIONS] CONTAINER [CONTAINER...]"),
///     vec!["CONTAINER", "[CONTAINER...]"]
/// );
/// ```
pub fn parse_usage_arguments(usage: &str) -> Vec<String> {
    let usage = usage.replace(" | ", "|");
    WHITESPACE
        .split(&usage)
        .skip(USAGE_PREFIX_FIELDS)
        .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("[OPTIONS]"))
        .map(ToOwned::to_owned)
        .collect()
}

/// Fetches and parses the help of one subcommand.
///
/// # Errors
///
/// [`GenerateError::UsageParse`] when the help output has no usage line;
/// errors of the help source are passed through.
pub fn build_subcommand(
    binary: &str,
    command: &str,
    description: Option<String>,
    source: &dyn HelpSource,
) -> Result<Subcommand, GenerateError> {
    info!("Building {binary} {command}");
    let lines = source.help_lines(&["help", command])?;
    let sections = parse_sections(&lines);

    let Some(usage) = sections.usage() else {
        return Err(UsageParseError {
            command: command.to_string(),
            help_lines: lines,
            usage: None,
            arguments: Vec::new(),
        }
        .into());
    };

    let arguments = match argument_override(command) {
        Some(pinned) => {
            debug!(command, ?pinned, "Using pinned argument placeholders");
            pinned
        }
        None => parse_usage_arguments(usage),
    };
    let switches = parse_switches(&sections);
    debug!(
        command,
        arguments = ?arguments,
        switches = switches.len(),
        "Parsed subcommand"
    );

    Ok(Subcommand::new(command, description, arguments, switches))
}

/// Builds every subcommand listed in the `group` section, in listing
/// order. Stops at the first failure.
pub fn parse_subcommands(
    binary: &str,
    sections: &SectionMap,
    group: &str,
    source: &dyn HelpSource,
) -> Result<Vec<Subcommand>, GenerateError> {
    sections
        .get(group)
        .iter()
        .filter_map(|line| parse_subcommand_line(line))
        .map(|(name, description)| build_subcommand(binary, &name, description, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(ToOwned::to_owned).collect()
    }

    #[test]
    fn test_listing_requires_indentation() {
        assert_eq!(parse_subcommand_line("ps  List containers"), None);
        assert_eq!(parse_subcommand_line("   "), None);
        assert_eq!(
            parse_subcommand_line("  ps          List containers"),
            Some(("ps".to_string(), Some("List containers".to_string())))
        );
    }

    #[test]
    fn test_listing_without_description() {
        assert_eq!(
            parse_subcommand_line("  version"),
            Some(("version".to_string(), None))
        );
    }

    #[test]
    fn test_only_one_trailing_marker_is_stripped() {
        let (name, _) = parse_subcommand_line("  compose**  Docker Compose").unwrap();
        assert_eq!(name, "compose*");
    }

    #[test]
    fn test_usage_alternatives_are_joined() {
        assert_eq!(
            parse_usage_arguments("  docker cp [OPTIONS] CONTAINER:SRC_PATH DEST_PATH | -"),
            vec!["CONTAINER:SRC_PATH", "DEST_PATH|-"]
        );
    }

    #[test]
    fn test_usage_options_marker_is_case_insensitive() {
        assert_eq!(
            parse_usage_arguments(" docker stats [options] [CONTAINER...]"),
            vec!["[CONTAINER...]"]
        );
    }

    #[test]
    fn test_usage_without_arguments() {
        assert!(parse_usage_arguments("  docker version [OPTIONS]").is_empty());
        assert!(parse_usage_arguments("  docker info  ").is_empty());
    }

    #[test]
    fn test_pinned_arguments_win_over_usage() {
        let source = |args: &[&str]| {
            assert_eq!(args, ["help", "push"]);
            Ok::<_, GenerateError>(lines("Usage: tool push [OPTIONS] SOMETHING\n"))
        };
        let sub = build_subcommand("tool", "push", None, &source).unwrap();
        assert_eq!(sub.arguments, vec!["REPOSITORY|IMAGE"]);

        let names = completion_gen_core::expand_placeholders(&sub.arguments);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["IMAGE", "REPOSITORY"]);
    }

    #[test]
    fn test_images_is_pinned_to_repository() {
        let source = |_: &[&str]| {
            Ok::<_, GenerateError>(lines("Usage:  docker images [OPTIONS] [REPOSITORY[:TAG]]"))
        };
        let sub = build_subcommand("docker", "images", None, &source).unwrap();
        assert_eq!(sub.arguments, vec!["REPOSITORY"]);
    }

    #[test]
    fn test_missing_usage_carries_diagnostics() {
        let source = |_: &[&str]| {
            Ok::<_, GenerateError>(lines("docker: 'frob' is not a docker command.\nSee 'docker --help'"))
        };
        let err = build_subcommand("docker", "frob", None, &source).unwrap_err();
        let diag = err.usage_parse().expect("usage parse error");
        assert_eq!(diag.command, "frob");
        assert_eq!(diag.help_lines.len(), 2);
        assert_eq!(diag.usage, None);
        assert!(diag.arguments.is_empty());
    }

    #[test]
    fn test_parse_subcommands_stops_at_first_failure() {
        let sections = parse_sections(&[
            "Commands:",
            "  attach      Attach to a running container",
            "  broken      Has no usage",
            "  start       Start one or more stopped containers",
        ]);
        let calls = RefCell::new(Vec::new());
        let source = |args: &[&str]| {
            calls.borrow_mut().push(args[1].to_string());
            let text = match args[1] {
                "broken" => "Nothing to see here",
                name => return Ok(vec![format!("Usage:  docker {name} [OPTIONS] CONTAINER")]),
            };
            Ok::<_, GenerateError>(lines(text))
        };

        let err = parse_subcommands("docker", &sections, "commands", &source).unwrap_err();
        assert_eq!(err.usage_parse().unwrap().command, "broken");
        assert_eq!(*calls.borrow(), vec!["attach", "broken"]);
    }

    #[test]
    fn test_parse_subcommands_reads_switches_and_arguments() {
        let sections = parse_sections(&["Commands:", "  logs   Fetch the logs of a container"]);
        let source = |_: &[&str]| {
            Ok::<_, GenerateError>(lines(
                "\nUsage:  docker logs [OPTIONS] CONTAINER\n\nFetch the logs of a container\n\nOptions:\n      --details        Show extra details\n  -n, --tail string    Number of lines to show\n",
            ))
        };
        let subs = parse_subcommands("docker", &sections, "commands", &source).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].name, "logs");
        assert_eq!(subs[0].description.as_deref(), Some("Fetch the logs of a container"));
        assert_eq!(subs[0].arguments, vec!["CONTAINER"]);
        assert_eq!(subs[0].switches.len(), 2);
        assert!(subs[0].switches[1].exclusive());
    }
}
