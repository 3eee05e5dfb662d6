use clap::{ArgAction, Parser};
use completion_gen_discovery::output::OutputFormat;
use completion_gen_discovery::{GenerateConfig, GenerateError, generate};
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Fish,
    Json,
    Yaml,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Fish => Self::Fish,
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gen-completions")]
#[command(about = "Generate fish completions from docker or docker-compose help output")]
struct Cli {
    /// Tool to generate completions for (docker or docker-compose).
    tool: String,
    /// Output format: the fish script, or the parsed model for debugging.
    #[arg(long, default_value = "fish")]
    format: CliOutputFormat,
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn init_logging(verbose: u8) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| format!("Failed to install log subscriber: {err}"))
}

/// Logs the captured help output behind a usage parse failure.
fn report_diagnostics(err: &GenerateError) {
    let Some(diagnostics) = err.usage_parse() else {
        return;
    };
    error!(
        command = %diagnostics.command,
        usage = ?diagnostics.usage,
        arguments = ?diagnostics.arguments,
        "Can't parse help output"
    );
    for line in &diagnostics.help_lines {
        error!("  {line}");
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = GenerateConfig::new(cli.tool).with_format(cli.format.into());
    let output = generate(&config).map_err(|err| {
        report_diagnostics(&err);
        err.to_string()
    })?;
    print!("{output}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = init_logging(cli.verbose).and_then(|()| run(cli));

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
