use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use argi_core::{ParserConfig, Schema};
use argi_parser::{ParseResult, Parser as ArgParser};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argi", version)]
#[command(about = "Parse command-line arguments against a declarative schema")]
struct Cli {
    /// Log parser stages to stderr (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument vector and print the result.
    Parse(ParseArgs),
    /// Check schema files for structural problems.
    Validate(ValidateArgs),
    /// Print the help text generated for a schema.
    Usage(UsageArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Schema document (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Parser configuration document (.json, .yaml or .yml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format for the parse result.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse, given after `--`.
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    #[command(flatten)]
    schema: SchemaArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
        Command::Usage(args) => run_usage(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Builds a parser from a schema file and optional config file.
///
/// Without a config file the program name is the schema file stem.
fn load_parser(args: &SchemaArgs) -> Result<ArgParser> {
    let schema = Schema::load(&args.schema)
        .with_context(|| format!("failed to load schema '{}'", args.schema.display()))?;
    let config = match &args.config {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => ParserConfig::new(&program_name(&args.schema)),
    };

    let parser = ArgParser::new(config, schema);
    let problems = parser.validate();
    if !problems.is_empty() {
        let details: Vec<String> = problems.iter().map(ToString::to_string).collect();
        bail!(
            "schema '{}' is invalid: {}",
            args.schema.display(),
            details.join("; ")
        );
    }
    Ok(parser)
}

fn program_name(schema_path: &Path) -> String {
    schema_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("app")
        .to_string()
}

fn render(result: &ParseResult, format: CliOutputFormat) -> Result<String> {
    let output = match format {
        CliOutputFormat::Json => {
            serde_json::to_string_pretty(result).context("failed to serialize result")? + "\n"
        }
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(result).context("failed to serialize result")?
        }
    };
    Ok(output)
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn run_parse(args: ParseArgs) -> Result<ExitCode> {
    let parser = load_parser(&args.schema)?;
    debug!(args = ?args.args, "parsing");

    match parser.parse(args.args) {
        Ok(result) => {
            print!("{}", render(&result, args.format)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if !err.is_fatal() => {
            println!("{err}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(exit_code(err.exit_code()))
        }
    }
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let mut invalid = 0usize;

    for path in &args.inputs {
        let problems: Vec<String> = match Schema::load(path) {
            Ok(schema) => ArgParser::with_schema(schema)
                .validate()
                .iter()
                .map(ToString::to_string)
                .collect(),
            Err(err) => vec![err.to_string()],
        };

        if problems.is_empty() {
            continue;
        }
        invalid += 1;
        for problem in problems {
            eprintln!("{}: {problem}", path.display());
        }
    }

    if invalid > 0 {
        eprintln!(
            "{invalid} of {} schema file(s) failed validation.",
            args.inputs.len()
        );
        return Ok(ExitCode::FAILURE);
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(ExitCode::SUCCESS)
}

fn run_usage(args: UsageArgs) -> Result<ExitCode> {
    let parser = load_parser(&args.schema)?;
    print!("{}", parser.help_text());
    Ok(ExitCode::SUCCESS)
}
