//! Structural checks over a parsed [`ToolModel`].
//!
//! Violations are reported, not fixed; the generator logs them and carries
//! on.
//!
//! # Examples
//!
//! ```
//! use completion_gen_core::*;
//!
//! let mut model = ToolModel::new("docker");
//! model.common_options.push(Switch::new(vec!["D".into()], vec!["debug".into()], None, None));
//! assert!(validate_model(&model).is_empty());
//!
//! model.subcommands.push(Subcommand::new("", None, Vec::new(), Vec::new()));
//! assert_eq!(validate_model(&model), vec![ModelViolation::EmptySubcommandName]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Subcommand, Switch, ToolModel};

/// A broken model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelViolation {
    /// A switch has no short, long or old-style name.
    #[error("switch must define at least one name")]
    MissingSwitchName,
    /// A short name is not exactly one character.
    #[error("invalid short option name: {0}")]
    InvalidShortName(String),
    #[error("subcommand name cannot be empty")]
    EmptySubcommandName,
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),
}

pub fn validate_switch(switch: &Switch) -> Vec<ModelViolation> {
    let mut errors = Vec::new();
    if !switch.has_name() {
        errors.push(ModelViolation::MissingSwitchName);
    }
    errors.extend(
        switch
            .shorts
            .iter()
            .filter(|name| name.chars().count() != 1)
            .map(|name| ModelViolation::InvalidShortName(name.clone())),
    );
    errors
}

pub fn validate_subcommand(sub: &Subcommand) -> Vec<ModelViolation> {
    let mut errors = Vec::new();
    if sub.name.trim().is_empty() {
        errors.push(ModelViolation::EmptySubcommandName);
    }
    errors.extend(sub.switches.iter().flat_map(validate_switch));
    errors
}

/// Validates every switch and subcommand of `model`.
pub fn validate_model(model: &ToolModel) -> Vec<ModelViolation> {
    let mut errors = model
        .common_options
        .iter()
        .flat_map(validate_switch)
        .collect::<Vec<_>>();

    let mut seen = HashSet::new();
    for sub in &model.subcommands {
        errors.extend(validate_subcommand(sub));
        if !sub.name.is_empty() && !seen.insert(sub.name.as_str()) {
            errors.push(ModelViolation::DuplicateSubcommand(sub.name.clone()));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nameless_switch_is_rejected() {
        let switch = Switch::new(Vec::new(), Vec::new(), Some("orphan".into()), None);
        assert_eq!(validate_switch(&switch), vec![ModelViolation::MissingSwitchName]);
    }

    #[test]
    fn test_hand_built_long_short_name_is_rejected() {
        let mut switch = Switch::new(vec!["a".into()], Vec::new(), None, None);
        switch.shorts.push("ab".into());
        assert_eq!(
            validate_switch(&switch),
            vec![ModelViolation::InvalidShortName("ab".into())]
        );
    }

    #[test]
    fn test_duplicate_subcommands_are_reported_once_per_repeat() {
        let mut model = ToolModel::new("docker");
        for name in ["ps", "ps", "ps"] {
            model
                .subcommands
                .push(Subcommand::new(name, None, Vec::new(), Vec::new()));
        }
        let errors = validate_model(&model);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ModelViolation::DuplicateSubcommand(_))));
    }

    #[test]
    fn test_subcommand_switches_are_checked() {
        let sub = Subcommand::new(
            "run",
            None,
            Vec::new(),
            vec![Switch::new(Vec::new(), Vec::new(), None, None)],
        );
        assert_eq!(validate_subcommand(&sub), vec![ModelViolation::MissingSwitchName]);
    }
}
