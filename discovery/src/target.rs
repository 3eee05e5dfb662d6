//! Supported target tools.

use std::fmt;
use std::str::FromStr;

use completion_gen_core::{ComposePolicy, CompletionPolicy, DockerPolicy};

use crate::error::GenerateError;

/// A command-line tool completions can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTool {
    Docker,
    DockerCompose,
}

impl TargetTool {
    pub const ALL: [TargetTool; 2] = [TargetTool::Docker, TargetTool::DockerCompose];

    /// Executable name searched on the path.
    pub fn binary(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::DockerCompose => "docker-compose",
        }
    }

    /// Help sections that list subcommands, in processing order.
    pub fn subcommand_groups(self) -> &'static [&'static str] {
        match self {
            Self::Docker => &["commands", "management commands"],
            Self::DockerCompose => &["commands"],
        }
    }

    pub fn policy(self) -> &'static dyn CompletionPolicy {
        match self {
            Self::Docker => &DockerPolicy,
            Self::DockerCompose => &ComposePolicy,
        }
    }
}

impl fmt::Display for TargetTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for TargetTool {
    type Err = GenerateError;

    /// Case-insensitive match on the binary name.
    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        let lower = selector.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tool| tool.binary() == lower)
            .ok_or_else(|| GenerateError::Validation {
                selector: selector.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|tool| tool.binary())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
