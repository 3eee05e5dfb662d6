//! Help-text driven completion generation for docker-style tools.
//!
//! This crate connects the pure model in `completion-gen-core` to the
//! outside world: it finds the target executable, captures `help` and
//! `help <subcommand>` output, parses it into a
//! [`ToolModel`](completion_gen_core::ToolModel) and renders the result.
//!
//! # Main entry points
//!
//! - [`generate`]: full run from a [`GenerateConfig`]. Validates the
//!   selector, locates the executable, parses and renders.
//! - [`load_tool_model`]: parse a tool through any
//!   [`HelpSource`], e.g. canned help text in tests.
//!
//! # Example
//!
//! ```
//! use completion_gen_discovery::{GenerateError, TargetTool, load_tool_model};
//!
//! let source = |args: &[&str]| -> Result<Vec<String>, GenerateError> {
//!     let text = match args {
//!         ["help"] => "Usage:  docker COMMAND\n\nCommands:\n  logs   Fetch the logs of a container\n",
//!         _ => "Usage:  docker logs [OPTIONS] CONTAINER\n",
//!     };
//!     Ok(text.lines().map(String::from).collect())
//! };
//!
//! let model = load_tool_model(TargetTool::Docker, &source).unwrap();
//! assert_eq!(model.subcommands[0].arguments, vec!["CONTAINER"]);
//! ```
//!
//! Generation is fail-fast: the first subcommand without a usage line
//! aborts the run with [`GenerateError::UsageParse`] and nothing is
//! rendered.

pub mod config;
pub mod discover;
pub mod error;
pub mod extractor;
pub mod output;
pub mod parser;
pub mod target;

use completion_gen_core::{ToolModel, validate_model};
use tracing::{info, warn};

pub use config::GenerateConfig;
pub use error::{GenerateError, UsageParseError};
pub use extractor::{HelpSource, ProcessHelpSource};
pub use output::{OutputFormat, format_model};
pub use target::TargetTool;

/// Parses the top-level help of `target` and every listed subcommand.
///
/// # Errors
///
/// Fails on the first subcommand whose help has no usage line, or when
/// the help source itself fails.
pub fn load_tool_model(
    target: TargetTool,
    source: &dyn HelpSource,
) -> Result<ToolModel, GenerateError> {
    let binary = target.binary();
    info!("Building parts for {binary}");
    let lines = source.help_lines(&["help"])?;
    let sections = parser::parse_sections(&lines);

    let mut model = ToolModel::new(binary);

    info!("Parsing switches for {binary}");
    model.common_options = parser::parse_switches(&sections);

    info!("Building subcommands for {binary}");
    for group in target.subcommand_groups() {
        let subs = parser::parse_subcommands(binary, &sections, group, source)?;
        model.subcommands.extend(subs);
    }

    for violation in validate_model(&model) {
        warn!(binary, %violation, "Parsed model violates an invariant");
    }

    Ok(model)
}

/// Runs a complete generation and returns the rendered output.
///
/// The selector is validated before the environment is consulted, so an
/// unsupported tool never triggers discovery or a process spawn.
pub fn generate(config: &GenerateConfig) -> Result<String, GenerateError> {
    let target: TargetTool = config.selector.parse()?;
    let search_path = config.resolved_search_path();
    let executable = discover::find_executable(target.binary(), search_path.as_deref())?;
    info!(executable = %executable.display(), "Generating completions for {target}");

    let source = ProcessHelpSource::new(executable);
    let model = load_tool_model(target, &source)?;
    let home = config.resolved_home_dir();
    format_model(&model, target, config.format, home.as_deref())
}
