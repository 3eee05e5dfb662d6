//! Error types for completion generation.

use thiserror::Error;

/// Fatal outcomes of a generation run. None of them is retried.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The target-tool selector is not one of the supported tools.
    #[error("unknown target tool {selector:?}: expected one of {expected}")]
    Validation { selector: String, expected: String },

    /// The selected executable is not in any search-path directory.
    #[error("no {binary:?} found in $PATH")]
    Discovery { binary: String },

    /// A subcommand's help output has no usage line.
    #[error(transparent)]
    UsageParse(#[from] Box<UsageParseError>),

    /// The help process could not be started at all.
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failure.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GenerateError {
    /// Diagnostic payload when this is a usage parse failure.
    pub fn usage_parse(&self) -> Option<&UsageParseError> {
        match self {
            Self::UsageParse(err) => Some(&**err),
            _ => None,
        }
    }
}

/// Missing usage line in a subcommand's help output.
///
/// Carries everything known at the point of failure so the caller can
/// show it to the operator.
#[derive(Debug, Clone, Error)]
#[error("can't find usage in help output of command {command:?}")]
pub struct UsageParseError {
    /// Subcommand whose help was being parsed.
    pub command: String,
    /// Raw help lines as captured.
    pub help_lines: Vec<String>,
    /// Usage text found, if any.
    pub usage: Option<String>,
    /// Argument placeholders derived so far.
    pub arguments: Vec<String>,
}

impl From<UsageParseError> for GenerateError {
    fn from(err: UsageParseError) -> Self {
        Self::UsageParse(Box::new(err))
    }
}
