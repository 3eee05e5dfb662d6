use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use completion_gen_core::{Metavar, ToolModel, expand_placeholders};
use completion_gen_discovery::{
    GenerateConfig, GenerateError, HelpSource, OutputFormat, TargetTool, format_model, generate,
    load_tool_model,
};

/// Serves help text from `tests/fixtures/<tool>/` and records every call.
struct FixtureHelp {
    tool: &'static str,
    missing_usage: Option<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl FixtureHelp {
    fn new(tool: &'static str) -> Self {
        Self {
            tool,
            missing_usage: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn without_usage_for(mut self, command: &'static str) -> Self {
        self.missing_usage = Some(command);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl HelpSource for FixtureHelp {
    fn help_lines(&self, args: &[&str]) -> Result<Vec<String>, GenerateError> {
        self.calls.borrow_mut().push(args.join(" "));
        let text = match args {
            ["help"] => fixture(self.tool, "help.txt"),
            ["help", command] if self.missing_usage == Some(*command) => {
                fixture("docker", "help-unknown.txt")
            }
            ["help", command] => fixture(self.tool, &format!("help-{command}.txt")),
            other => panic!("unexpected help request {other:?}"),
        };
        Ok(text.lines().map(ToOwned::to_owned).collect())
    }
}

fn fixture(tool: &str, name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(tool)
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}

fn docker_model() -> ToolModel {
    load_tool_model(TargetTool::Docker, &FixtureHelp::new("docker"))
        .expect("docker fixture should parse")
}

#[test]
fn test_docker_fixture_lists_commands_then_management_commands() {
    let model = docker_model();
    let names = model
        .subcommands
        .iter()
        .map(|sub| sub.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "attach", "cp", "images", "logs", "pull", "push", "rm", "start", "builder", "buildx"
        ]
    );
    assert_eq!(
        model.find_subcommand("buildx").unwrap().description.as_deref(),
        Some("Docker Buildx (Docker Inc., v0.10.4)")
    );
}

#[test]
fn test_docker_common_options_apply_metavar_overrides() {
    let model = docker_model();
    let find = |long: &str| {
        model
            .common_options
            .iter()
            .find(|switch| switch.longs.iter().any(|name| name == long))
            .unwrap_or_else(|| panic!("missing --{long}"))
    };

    assert_eq!(find("config").metavar, Some(Metavar::Path));
    assert_eq!(find("tlscacert").metavar, Some(Metavar::File));
    assert_eq!(find("tlskey").metavar, Some(Metavar::File));
    assert_eq!(find("context").metavar, Some(Metavar::Value("string".into())));
    assert_eq!(find("context").shorts, vec!["c"]);
    assert_eq!(find("debug").metavar, None);
    assert!(find("tlscacert").required());
    assert!(find("host").exclusive());
    assert!(!find("tls").exclusive() && !find("tls").required());
}

#[test]
fn test_docker_usage_placeholders() {
    let model = docker_model();
    let args = |name: &str| model.find_subcommand(name).unwrap().arguments.clone();

    assert_eq!(args("attach"), vec!["CONTAINER"]);
    assert_eq!(args("cp"), vec!["CONTAINER:SRC_PATH", "DEST_PATH|-"]);
    assert_eq!(args("rm"), vec!["CONTAINER", "[CONTAINER...]"]);
    assert_eq!(args("builder"), vec!["COMMAND"]);
    assert_eq!(args("images"), vec!["REPOSITORY"]);
    assert_eq!(args("pull"), vec!["REPOSITORY|IMAGE"]);
    assert_eq!(args("push"), vec!["REPOSITORY|IMAGE"]);
}

#[test]
fn test_docker_subcommand_switches() {
    let model = docker_model();
    let start = model.find_subcommand("start").unwrap();
    assert_eq!(start.switches.len(), 3);
    assert_eq!(start.switches[0].shorts, vec!["a"]);
    assert_eq!(start.switches[0].longs, vec!["attach"]);
    assert!(start.switches[1].exclusive());

    let logs = model.find_subcommand("logs").unwrap();
    assert_eq!(
        logs.switches
            .iter()
            .map(|switch| switch.canonical_name())
            .collect::<Vec<_>>(),
        vec!["details", "follow", "since", "tail", "timestamps"]
    );
}

#[test]
fn test_pinned_placeholders_ignore_usage_tokens() {
    let source = |args: &[&str]| -> Result<Vec<String>, GenerateError> {
        let text = match args {
            ["help"] => "Commands:\n  push   Push an image\n",
            _ => "Usage: tool push [OPTIONS] SOMETHING\n",
        };
        Ok(text.lines().map(String::from).collect())
    };

    let model = load_tool_model(TargetTool::Docker, &source).unwrap();
    let push = model.find_subcommand("push").unwrap();
    let names = expand_placeholders(&push.arguments)
        .into_iter()
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["IMAGE", "REPOSITORY"]);
}

#[test]
fn test_missing_usage_aborts_remaining_subcommands() {
    let source = FixtureHelp::new("docker").without_usage_for("logs");

    let err = load_tool_model(TargetTool::Docker, &source).unwrap_err();
    let diagnostics = err.usage_parse().expect("usage parse error");
    assert_eq!(diagnostics.command, "logs");
    assert_eq!(diagnostics.usage, None);
    assert!(diagnostics.arguments.is_empty());
    assert_eq!(
        diagnostics.help_lines,
        vec![
            "docker: 'plugin' is not a docker command.",
            "See 'docker --help'"
        ]
    );
    assert_eq!(
        err.to_string(),
        "can't find usage in help output of command \"logs\""
    );

    assert_eq!(
        source.calls(),
        vec!["help", "help attach", "help cp", "help images", "help logs"]
    );
}

#[test]
fn test_docker_fish_script() {
    let model = docker_model();
    let script = format_model(
        &model,
        TargetTool::Docker,
        OutputFormat::Fish,
        Some("/home/tester"),
    )
    .unwrap();

    assert!(script.starts_with("# docker completions for fish shell\n"));
    assert!(script.contains(
        "contains -- $i attach builder buildx cp images logs pull push rm start; and return 1"
    ));
    assert!(script.contains(
        "complete --command docker --description \"Location of client config files (default \\\"~/.docker\\\")\" \
         --condition '_halostatue_fish_docker_no_subcommand' --require-parameter --long-option config\n"
    ));
    assert!(!script.contains("/home/tester"));

    let rm_containers = "complete --command docker --description \"Container\" \
         --condition '__fish_seen_subcommand_from rm' \
         --arguments '(_halostatue_fish_docker_print_containers stopped)' --exclusive";
    assert_eq!(script.matches(rm_containers).count(), 1);

    assert!(script.contains(
        "complete --command docker --description \"CONTAINER:SRC_PATH\" \
         --condition '__fish_seen_subcommand_from cp' \
         --arguments '(_halostatue_fish_docker_print_containers all :)' --exclusive\n"
    ));
    assert!(script.contains(
        "complete --command docker --description \"DEST_PATH\" \
         --condition '__fish_seen_subcommand_from cp' --force-files --require-parameter\n"
    ));
    assert!(script.contains(
        "complete --command docker --description \"STDIN\" \
         --condition '__fish_seen_subcommand_from cp' --arguments '-' --exclusive\n"
    ));
    assert!(script.contains("--condition '__fish_seen_subcommand_from push' --arguments '(_halostatue_fish_docker_print_images)'"));
    assert!(script.contains(
        "--condition '__fish_seen_subcommand_from push' --arguments '(_halostatue_fish_docker_print_repositories)'"
    ));
}

#[test]
fn test_compose_fixture_completes_services_only() {
    let model = load_tool_model(TargetTool::DockerCompose, &FixtureHelp::new("docker-compose"))
        .expect("compose fixture should parse");

    assert_eq!(
        model.subcommand_names(),
        vec!["build", "exec", "logs", "run", "version"]
    );
    assert!(model.find_subcommand("version").unwrap().arguments.is_empty());
    let exec = model.find_subcommand("exec").unwrap();
    assert!(exec.arguments.contains(&"SERVICE".to_string()));
    assert!(exec.switches.iter().any(|switch| switch.shorts == ["T"]));

    let file = &model.common_options[0];
    assert_eq!(file.longs, vec!["file"]);
    assert_eq!(file.metavar, Some(Metavar::File));

    let script = format_model(&model, TargetTool::DockerCompose, OutputFormat::Fish, None).unwrap();
    assert!(script.contains("function _halostatue_fish_docker_compose_no_subcommand\n"));
    assert_eq!(
        script
            .matches("--arguments '(_halostatue_fish_docker_print_compose_services)' --no-files")
            .count(),
        3,
        "build, exec and logs take services"
    );
    assert!(!script.contains("--description \"COMMAND\""));
    assert!(!script.contains("_halostatue_fish_docker_print_containers"));
}

#[test]
fn test_json_output_dumps_parsed_model() {
    let model = docker_model();
    let json = format_model(&model, TargetTool::Docker, OutputFormat::Json, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["binary"], "docker");
    assert_eq!(value["subcommands"][1]["name"], "cp");
    assert_eq!(value["subcommands"][1]["arguments"][0], "CONTAINER:SRC_PATH");
}

#[test]
fn test_unsupported_selector_fails_before_discovery() {
    let config = GenerateConfig::new("podman").with_search_path("");
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, GenerateError::Validation { .. }), "{err:?}");
}

#[cfg(unix)]
#[test]
fn test_unsupported_selector_never_runs_a_tool() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    for name in ["podman", "docker"] {
        let script = dir.path().join(name);
        fs::write(&script, format!("#!/bin/sh\ntouch '{}'\n", marker.display())).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let config = GenerateConfig::new("podman").with_search_path(dir.path().as_os_str());
    let err = generate(&config).unwrap_err();
    assert!(matches!(err, GenerateError::Validation { ref selector, .. } if selector == "podman"));
    assert!(!marker.exists(), "a tool was executed for a rejected selector");
}

#[test]
fn test_missing_executable_is_discovery_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerateConfig::new("docker").with_search_path(dir.path().as_os_str());
    let err = generate(&config).unwrap_err();
    assert!(
        matches!(err, GenerateError::Discovery { ref binary } if binary == "docker"),
        "{err:?}"
    );
}
