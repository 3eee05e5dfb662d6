//! Output formatting for a parsed tool model.

use completion_gen_core::{FishScript, ToolModel};

use crate::error::GenerateError;
use crate::target::TargetTool;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Fish completion script.
    #[default]
    Fish,
    /// Parsed model as JSON.
    Json,
    /// Parsed model as YAML.
    Yaml,
}

/// Formats `model` in the requested output format.
pub fn format_model(
    model: &ToolModel,
    target: TargetTool,
    format: OutputFormat,
    home: Option<&str>,
) -> Result<String, GenerateError> {
    match format {
        OutputFormat::Fish => Ok(FishScript::new(model, target.policy())
            .with_home(home)
            .render()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(model)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(model)?),
    }
}
