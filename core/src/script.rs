//! Whole-script rendering for one target tool.

use crate::completion::{ArgSource, CompletionRecord, Condition};
use crate::placeholder::classify_arguments;
use crate::policy::CompletionPolicy;
use crate::{Subcommand, Switch, ToolModel};

/// Name of the fish function that succeeds while no subcommand of
/// `binary` has been typed yet.
///
/// ```
/// assert_eq!(
///     completion_gen_core::no_subcommand_guard_name("docker-compose"),
///     "_halostatue_fish_docker_compose_no_subcommand"
/// );
/// ```
pub fn no_subcommand_guard_name(binary: &str) -> String {
    format!("_halostatue_fish_{}_no_subcommand", binary.replace('-', "_"))
}

/// Renders the fish guard function for `binary`.
pub fn no_subcommand_guard(binary: &str, subcommands: &[&str]) -> String {
    format!(
        "function {name}\n    for i in (commandline -opc)\n        contains -- $i {commands}; and return 1\n    end\n    return 0\nend\n",
        name = no_subcommand_guard_name(binary),
        commands = subcommands.join(" "),
    )
}

/// Builds the completion record for a switch without any condition.
pub fn switch_record(binary: &str, switch: &Switch) -> CompletionRecord {
    let mut record = CompletionRecord::new(binary);
    if let Some(description) = &switch.description {
        record.description(description);
    }
    for name in &switch.shorts {
        record.short(name);
    }
    for name in &switch.longs {
        record.long(name);
    }
    for name in &switch.old_style {
        record.old(name);
    }
    if switch.exclusive() {
        record.exclusive();
    } else if switch.required() {
        record.required();
    }
    record
}

/// Fish completion script for a parsed [`ToolModel`].
pub struct FishScript<'a> {
    model: &'a ToolModel,
    policy: &'a dyn CompletionPolicy,
    home: Option<&'a str>,
}

impl<'a> FishScript<'a> {
    pub fn new(model: &'a ToolModel, policy: &'a dyn CompletionPolicy) -> Self {
        Self {
            model,
            policy,
            home: None,
        }
    }

    /// Home directory to redact from descriptions.
    pub fn with_home(mut self, home: Option<&'a str>) -> Self {
        self.home = home;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header());
        out.push('\n');
        out.push_str(&no_subcommand_guard(
            &self.model.binary,
            &self.model.subcommand_names(),
        ));
        out.push('\n');
        out.push_str(&self.common_options());
        out.push('\n');
        out.push_str(&self.subcommands());
        out
    }

    fn header(&self) -> String {
        let binary = &self.model.binary;
        let mut lines = vec![
            format!("# {binary} completions for fish shell"),
            "#".to_string(),
            "# This file is generated by `gen-completions` from the help output of".to_string(),
            format!("# the installed `{binary}` executable."),
            String::new(),
            format!("complete -e -c {binary}"),
            String::new(),
            "# Completions currently supported:".to_string(),
        ];
        lines.extend(self.policy.supported().iter().map(|item| format!("# - {item}")));
        let notes = self.policy.notes();
        if !notes.is_empty() {
            lines.push("#".to_string());
            lines.extend(notes.iter().map(|note| format!("# {note}")));
        }
        lines.join("\n") + "\n"
    }

    fn common_options(&self) -> String {
        let binary = &self.model.binary;
        let mut lines = vec!["# common options".to_string()];
        for switch in &self.model.common_options {
            let mut record = switch_record(binary, switch);
            record.condition(Condition::no_subcommand(binary));
            lines.push(record.render(self.home));
        }
        lines.join("\n") + "\n"
    }

    fn subcommands(&self) -> String {
        let mut lines = vec!["# subcommands".to_string()];
        for sub in &self.model.subcommands {
            lines.extend(self.subcommand_lines(sub));
            lines.push(String::new());
        }
        lines.join("\n") + "\n"
    }

    /// Lines for one subcommand: the name itself, its switches, then its
    /// positional placeholders.
    pub fn subcommand_lines(&self, sub: &Subcommand) -> Vec<String> {
        let binary = &self.model.binary;
        let mut lines = vec![format!("# {}", sub.name)];

        let mut help = CompletionRecord::new(binary);
        help.condition(Condition::no_subcommand(binary))
            .arg(ArgSource::literal(sub.name.clone()));
        if let Some(description) = &sub.description {
            help.description(description);
        }
        lines.push(help.render(self.home));

        for switch in &sub.switches {
            let mut record = switch_record(binary, switch);
            record.condition(Condition::subcommand(&sub.name));
            lines.push(record.render(self.home));
        }

        let records = classify_arguments(sub, |owner, placeholder| {
            self.policy
                .classify(owner, placeholder)
                .map(|strategy| strategy.to_record(binary, owner))
        });
        lines.extend(records.iter().map(|record| record.render(self.home)));
        lines
    }
}
