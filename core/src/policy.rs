//! Argument completion policies.
//!
//! A [`CompletionPolicy`] decides, for one placeholder name in the context
//! of its owning subcommand, which [`CompletionStrategy`] to emit. The
//! docker and docker-compose generators share the whole pipeline and
//! differ only in the policy they plug in.

use crate::completion::{ArgSource, CompletionRecord, Condition};
use crate::Subcommand;

const PRINT_CONTAINERS: &str = "_halostatue_fish_docker_print_containers";
const PRINT_IMAGES: &str = "_halostatue_fish_docker_print_images";
const PRINT_REPOSITORIES: &str = "_halostatue_fish_docker_print_repositories";
const PRINT_COMPOSE_SERVICES: &str = "_halostatue_fish_docker_print_compose_services";

/// Which containers the container-listing provider offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerScope {
    Running,
    Stopped,
    All,
    /// All containers, each followed by `:` so a path can be appended.
    AllWithPath,
}

impl ContainerScope {
    /// Selection domain for a subcommand acting on containers.
    pub fn for_subcommand(name: &str) -> Self {
        match name {
            "start" | "rm" => Self::Stopped,
            "commit" | "diff" | "export" | "inspect" | "cp" => Self::All,
            _ => Self::Running,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::All => "all",
            Self::AllWithPath => "all :",
        }
    }
}

/// A dynamic value source backed by a fish helper function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueProvider {
    Containers(ContainerScope),
    Images,
    Repositories,
    ComposeServices,
}

impl ValueProvider {
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Containers(_) => PRINT_CONTAINERS,
            Self::Images => PRINT_IMAGES,
            Self::Repositories => PRINT_REPOSITORIES,
            Self::ComposeServices => PRINT_COMPOSE_SERVICES,
        }
    }

    pub fn to_arg_source(self) -> ArgSource {
        match self {
            Self::Containers(scope) => ArgSource::command(PRINT_CONTAINERS, [scope.as_str()]),
            other => ArgSource::command(other.function_name(), Vec::<String>::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Provider(ValueProvider),
    Literal(String),
}

impl ValueSource {
    fn to_arg_source(&self) -> ArgSource {
        match self {
            Self::Provider(provider) => provider.to_arg_source(),
            Self::Literal(value) => ArgSource::literal(value.clone()),
        }
    }
}

/// Value handling applied to a placeholder completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// A value is required and it is not a file name.
    Exclusive,
    /// A value is required and file names are offered.
    RequiredFiles,
    /// File names are not offered.
    NoFiles,
}

/// The completion chosen for one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionStrategy {
    pub description: String,
    pub source: Option<ValueSource>,
    pub mode: ValueMode,
}

impl CompletionStrategy {
    fn exclusive(description: impl Into<String>, source: Option<ValueSource>) -> Self {
        Self {
            description: description.into(),
            source,
            mode: ValueMode::Exclusive,
        }
    }

    /// Builds the completion record for this strategy under `sub`.
    pub fn to_record(&self, binary: &str, sub: &Subcommand) -> CompletionRecord {
        let mut record = CompletionRecord::new(binary);
        record
            .condition(Condition::subcommand(&sub.name))
            .description(&self.description);
        if let Some(source) = &self.source {
            record.arg(source.to_arg_source());
        }
        match self.mode {
            ValueMode::Exclusive => record.exclusive(),
            ValueMode::RequiredFiles => record.required().force_files(),
            ValueMode::NoFiles => record.no_files(),
        };
        record
    }
}

/// Placeholder classification policy for one target tool.
pub trait CompletionPolicy {
    /// Capabilities listed in the generated script header.
    fn supported(&self) -> &'static [&'static str];

    /// Extra header comment lines following the capability list.
    fn notes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns `None` when the placeholder gets no completion.
    fn classify(&self, sub: &Subcommand, placeholder: &str) -> Option<CompletionStrategy>;
}

/// Policy for the `docker` CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerPolicy;

impl CompletionPolicy for DockerPolicy {
    fn supported(&self) -> &'static [&'static str] {
        &["parameters", "commands", "containers", "images", "repositories"]
    }

    fn notes(&self) -> &'static [&'static str] {
        &["Management commands (commands with subcommands) are not yet supported."]
    }

    fn classify(&self, sub: &Subcommand, placeholder: &str) -> Option<CompletionStrategy> {
        let provider = |p| Some(ValueSource::Provider(p));
        let strategy = match placeholder {
            "CONTAINER" | "[CONTAINER...]" => CompletionStrategy::exclusive(
                "Container",
                provider(ValueProvider::Containers(ContainerScope::for_subcommand(
                    &sub.name,
                ))),
            ),
            "CONTAINER:SRC_PATH" => CompletionStrategy::exclusive(
                placeholder,
                provider(ValueProvider::Containers(ContainerScope::AllWithPath)),
            ),
            "IMAGE" | "SOURCE_IMAGE" | "TARGET_IMAGE" => {
                CompletionStrategy::exclusive("Image", provider(ValueProvider::Images))
            }
            "REPOSITORY" | "[REPOSITORY[:TAG]]" => {
                CompletionStrategy::exclusive("Repository", provider(ValueProvider::Repositories))
            }
            "PATH" | "FILE" | "DEST_PATH" | "file" => CompletionStrategy {
                description: placeholder.to_string(),
                source: None,
                mode: ValueMode::RequiredFiles,
            },
            "-" => CompletionStrategy::exclusive("STDIN", Some(ValueSource::Literal("-".into()))),
            other => CompletionStrategy::exclusive(other, None),
        };
        Some(strategy)
    }
}

/// Policy for `docker-compose`: only service placeholders are completed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposePolicy;

impl CompletionPolicy for ComposePolicy {
    fn supported(&self) -> &'static [&'static str] {
        &["parameters", "commands", "services"]
    }

    fn classify(&self, _sub: &Subcommand, placeholder: &str) -> Option<CompletionStrategy> {
        matches!(placeholder, "SERVICE" | "[SERVICE...]").then(|| CompletionStrategy {
            description: "Service".to_string(),
            source: Some(ValueSource::Provider(ValueProvider::ComposeServices)),
            mode: ValueMode::NoFiles,
        })
    }
}
