//! Command model types derived from help output.
//!
//! A [`ToolModel`] is the parsed shape of one target tool: its top-level
//! switches and its subcommands. Every value here is built once during a
//! generation pass and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Classification of the metavar that follows a flag in help text.
///
/// Only file-like metavars matter for completion, so everything else is
/// kept verbatim as [`Metavar::Value`].
///
/// # Examples
///
/// ```
/// use completion_gen_core::Metavar;
///
/// assert_eq!(Metavar::classify("FILE"), Metavar::File);
/// assert_eq!(Metavar::classify("DEST_PATH"), Metavar::Path);
/// assert_eq!(Metavar::classify("string"), Metavar::Value("string".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metavar {
    /// The option takes a file name.
    File,
    /// The option takes a filesystem path.
    Path,
    /// Any other value placeholder (e.g. `string`, `list`, `NAME`).
    Value(String),
}

impl Metavar {
    /// Classifies a declared metavar. Matching is case-sensitive, so only
    /// upper-case `FILE` / `PATH` fragments count as file-like.
    pub fn classify(raw: &str) -> Self {
        if raw.contains("FILE") {
            Self::File
        } else if raw.contains("PATH") {
            Self::Path
        } else {
            Self::Value(raw.to_string())
        }
    }

    /// Returns `true` for [`Metavar::File`] and [`Metavar::Path`].
    pub fn is_file_like(&self) -> bool {
        matches!(self, Self::File | Self::Path)
    }
}

/// A command-line option definition.
///
/// Names are stored without their leading hyphens. Short names are single
/// characters; single-dash names longer than that (`-version`) are kept
/// as old-style long names.
///
/// # Examples
///
/// ```
/// use completion_gen_core::{Metavar, Switch};
///
/// let switch = Switch::new(
///     vec!["f".into()],
///     vec!["file".into()],
///     Some("Name of the Dockerfile".into()),
///     Some(Metavar::File),
/// );
/// assert!(switch.required());
/// assert!(!switch.exclusive());
/// assert_eq!(switch.canonical_name(), "file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub shorts: Vec<String>,
    pub longs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub old_style: Vec<String>,
    pub description: Option<String>,
    pub metavar: Option<Metavar>,
}

impl Switch {
    /// Builds a switch, moving any multi-character entry of `shorts` into
    /// the old-style list.
    pub fn new(
        shorts: Vec<String>,
        longs: Vec<String>,
        description: Option<String>,
        metavar: Option<Metavar>,
    ) -> Self {
        let (shorts, old_style): (Vec<String>, Vec<String>) =
            shorts.into_iter().partition(|name| name.chars().count() == 1);
        Self {
            shorts,
            longs,
            old_style,
            description,
            metavar,
        }
    }

    /// An option argument is required and may not be a file name.
    pub fn exclusive(&self) -> bool {
        self.metavar.as_ref().is_some_and(|m| !m.is_file_like())
    }

    /// An option argument is required and a file name is acceptable.
    pub fn required(&self) -> bool {
        self.metavar.as_ref().is_some_and(Metavar::is_file_like)
    }

    /// Long name if present, then short, then old-style.
    pub fn canonical_name(&self) -> &str {
        self.longs
            .first()
            .or(self.shorts.first())
            .or(self.old_style.first())
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    /// Returns `true` when the switch carries at least one name.
    pub fn has_name(&self) -> bool {
        !(self.shorts.is_empty() && self.longs.is_empty() && self.old_style.is_empty())
    }
}

/// A subcommand of the target tool.
///
/// `arguments` holds the raw placeholder tokens from the usage line, in
/// first-seen order with duplicates removed. Union and repetition
/// notation is expanded later by
/// [`expand_placeholders`](crate::expand_placeholders).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcommand {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<String>,
    pub switches: Vec<Switch>,
}

impl Subcommand {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<String>,
        switches: Vec<Switch>,
    ) -> Self {
        let mut unique = Vec::with_capacity(arguments.len());
        for arg in arguments {
            if !unique.contains(&arg) {
                unique.push(arg);
            }
        }
        Self {
            name: name.into(),
            description,
            arguments: unique,
            switches,
        }
    }
}

/// Parsed model of one target tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolModel {
    /// Executable name, e.g. `docker`.
    pub binary: String,
    /// Options accepted before any subcommand.
    pub common_options: Vec<Switch>,
    pub subcommands: Vec<Subcommand>,
}

impl ToolModel {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            common_options: Vec::new(),
            subcommands: Vec::new(),
        }
    }

    /// Subcommand names sorted and deduplicated.
    pub fn subcommand_names(&self) -> Vec<&str> {
        let mut names = self
            .subcommands
            .iter()
            .map(|sub| sub.name.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }
}
