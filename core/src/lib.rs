//! Command model and fish completion records.
//!
//! This crate holds the pure half of completion generation:
//!
//! - [`Switch`], [`Subcommand`] and [`ToolModel`]: the typed model parsed
//!   from a tool's help output.
//! - [`expand_placeholders`] / [`classify_arguments`]: normalization of
//!   usage-line placeholders such as `[CONTAINER...]` or
//!   `REPOSITORY|IMAGE`.
//! - [`CompletionPolicy`]: per-tool mapping from a placeholder to a
//!   [`CompletionStrategy`], with [`DockerPolicy`] and [`ComposePolicy`].
//! - [`CompletionRecord`]: builder for one fish `complete` line.
//! - [`FishScript`]: the full script for one tool.
//!
//! Nothing here spawns processes or reads the environment.
//!
//! # Example
//!
//! ```
//! use completion_gen_core::*;
//!
//! let mut model = ToolModel::new("docker");
//! model.subcommands.push(Subcommand::new(
//!     "logs",
//!     Some("Fetch the logs of a container".into()),
//!     vec!["CONTAINER".into()],
//!     Vec::new(),
//! ));
//!
//! let script = FishScript::new(&model, &DockerPolicy).render();
//! assert!(script.contains("(_halostatue_fish_docker_print_containers running)"));
//! ```

mod completion;
mod placeholder;
mod policy;
mod script;
mod types;
mod validate;

pub use completion::{ArgSource, CompletionFlags, CompletionRecord, Condition, OptionKind};
pub use placeholder::{classify_arguments, expand_placeholders};
pub use policy::{
    ComposePolicy, CompletionPolicy, CompletionStrategy, ContainerScope, DockerPolicy,
    ValueMode, ValueProvider, ValueSource,
};
pub use script::{FishScript, no_subcommand_guard, no_subcommand_guard_name, switch_record};
pub use types::*;
pub use validate::{ModelViolation, validate_model, validate_subcommand, validate_switch};
