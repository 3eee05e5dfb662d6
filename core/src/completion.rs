//! Builder and renderer for a single fish `complete` definition.
//!
//! A [`CompletionRecord`] collects the target command, guard conditions,
//! argument sources, flags and option names of one completion rule, then
//! renders it as a single `complete ...` line.
//!
//! # Example
//!
//! ```
//! use completion_gen_core::{ArgSource, CompletionRecord, Condition};
//!
//! let mut record = CompletionRecord::new("docker");
//! record
//!     .description("Container")
//!     .condition(Condition::subcommand("logs"))
//!     .arg(ArgSource::command("_halostatue_fish_docker_print_containers", ["running"]))
//!     .exclusive();
//!
//! assert_eq!(
//!     record.render(None),
//!     "complete --command docker --description \"Container\" \
//!      --condition '__fish_seen_subcommand_from logs' \
//!      --arguments '(_halostatue_fish_docker_print_containers running)' --exclusive"
//! );
//! ```

/// Guard expression controlling when a completion applies.
///
/// Multiple conditions on one record are joined with `; and`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// None of the tool's subcommands appears earlier on the command line.
    /// Holds the name of the guard function emitted once per tool.
    NoSubcommand(String),
    /// The named subcommand appears earlier on the command line.
    Subcommand(String),
    /// Any other shell expression.
    Raw(String),
}

impl Condition {
    /// "No active subcommand" for the given binary.
    pub fn no_subcommand(binary: &str) -> Self {
        Self::NoSubcommand(crate::no_subcommand_guard_name(binary))
    }

    pub fn subcommand(name: impl Into<String>) -> Self {
        Self::Subcommand(name.into())
    }

    /// Renders the condition as a fish expression.
    pub fn expression(&self) -> String {
        match self {
            Self::NoSubcommand(guard) => guard.clone(),
            Self::Subcommand(name) => format!("__fish_seen_subcommand_from {name}"),
            Self::Raw(expr) => expr.clone(),
        }
    }
}

/// A value offered for completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSource {
    /// A fixed string.
    Literal(String),
    /// Output of a shell function or command, evaluated at completion time.
    Command { command: String, args: Vec<String> },
}

impl ArgSource {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn command<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Command { command, args } if args.is_empty() => format!("({command})"),
            Self::Command { command, args } => format!("({command} {})", args.join(" ")),
        }
    }
}

/// How an option name is introduced on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `-a`
    Short,
    /// `--all`
    Long,
    /// `-Wall`
    OldLong,
}

impl OptionKind {
    fn flag(self) -> &'static str {
        match self {
            Self::Short => "--short-option",
            Self::Long => "--long-option",
            Self::OldLong => "--old-option",
        }
    }
}

/// Boolean switches of a completion record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionFlags {
    pub keep_order: bool,
    pub no_files: bool,
    pub force_files: bool,
    pub required: bool,
    pub exclusive: bool,
}

/// Builder for one completion definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    command: String,
    description: Option<String>,
    conditions: Vec<Condition>,
    wraps: Vec<String>,
    arguments: Vec<ArgSource>,
    flags: CompletionFlags,
    options: Vec<(OptionKind, String)>,
}

impl CompletionRecord {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: None,
            conditions: Vec::new(),
            wraps: Vec::new(),
            arguments: Vec::new(),
            flags: CompletionFlags::default(),
            options: Vec::new(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn condition(&mut self, condition: Condition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn wrapped(&self) -> &[String] {
        &self.wraps
    }

    /// Inherit completions from another command.
    pub fn wraps(&mut self, command: impl Into<String>) -> &mut Self {
        self.wraps.push(command.into());
        self
    }

    pub fn arguments(&self) -> &[ArgSource] {
        &self.arguments
    }

    pub fn arg(&mut self, source: ArgSource) -> &mut Self {
        self.arguments.push(source);
        self
    }

    pub fn flags(&self) -> CompletionFlags {
        self.flags
    }

    /// Keep argument order instead of sorting alphabetically.
    pub fn keep_order(&mut self) -> &mut Self {
        self.flags.keep_order = true;
        self
    }

    /// Disallow file names. Has no effect once [`force_files`](Self::force_files)
    /// has been set.
    pub fn no_files(&mut self) -> &mut Self {
        if !self.flags.force_files {
            self.flags.no_files = true;
        }
        self
    }

    /// Allow file names; overrides [`no_files`](Self::no_files).
    pub fn force_files(&mut self) -> &mut Self {
        self.flags.no_files = false;
        self.flags.force_files = true;
        self
    }

    /// The option always takes an argument.
    pub fn required(&mut self) -> &mut Self {
        self.flags.required = true;
        self
    }

    /// Shorthand for required plus no files.
    pub fn exclusive(&mut self) -> &mut Self {
        self.flags.exclusive = true;
        self
    }

    pub fn options(&self) -> &[(OptionKind, String)] {
        &self.options
    }

    pub fn short(&mut self, name: &str) -> &mut Self {
        self.option(OptionKind::Short, name)
    }

    pub fn long(&mut self, name: &str) -> &mut Self {
        self.option(OptionKind::Long, name)
    }

    pub fn old(&mut self, name: &str) -> &mut Self {
        self.option(OptionKind::OldLong, name)
    }

    fn option(&mut self, kind: OptionKind, name: &str) -> &mut Self {
        self.options
            .push((kind, name.trim_start_matches('-').to_string()));
        self
    }

    /// Renders the record as one `complete` command line.
    ///
    /// When `home` is given, occurrences of it in the description are
    /// replaced with `~`.
    pub fn render(&self, home: Option<&str>) -> String {
        let mut parts = vec!["complete".to_string(), "--command".to_string(), self.command.clone()];

        if let Some(description) = &self.description {
            let description = match home {
                Some(home) if !home.is_empty() => description.replace(home, "~"),
                _ => description.clone(),
            };
            parts.push("--description".to_string());
            parts.push(double_quote(&description));
        }

        if !self.conditions.is_empty() {
            let joined = self
                .conditions
                .iter()
                .map(Condition::expression)
                .collect::<Vec<_>>()
                .join("; and ");
            parts.push(format!("--condition {}", single_quote(&joined)));
        }

        for wrap in &self.wraps {
            parts.push(format!("--wraps {wrap}"));
        }

        if !self.arguments.is_empty() {
            let joined = self
                .arguments
                .iter()
                .map(ArgSource::render)
                .collect::<Vec<_>>()
                .join("\n");
            parts.push(format!("--arguments {}", single_quote(&joined)));
        }

        let flags = [
            (self.flags.keep_order, "--keep-order"),
            (self.flags.no_files, "--no-files"),
            (self.flags.force_files, "--force-files"),
            (self.flags.required, "--require-parameter"),
            (self.flags.exclusive, "--exclusive"),
        ];
        parts.extend(
            flags
                .into_iter()
                .filter(|(set, _)| *set)
                .map(|(_, flag)| flag.to_string()),
        );

        for kind in [OptionKind::Short, OptionKind::Long, OptionKind::OldLong] {
            parts.extend(
                self.options
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, name)| format!("{} {name}", kind.flag())),
            );
        }

        parts.join(" ")
    }
}

fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
