mod definition;
mod error;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cmd_parser_core::CmdParser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::definition::ParserDefinition;
use crate::report::{OutputFormat, ParseReport};

#[derive(Debug, Parser)]
#[command(name = "argprobe")]
#[command(about = "Try command-line parser definitions against argument vectors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments given after `--` and report flags, values and rest.
    Parse(ParseArgs),
    /// Print the usage text of a definition.
    Usage(DefinitionArgs),
    /// Check that a definition builds without configuration errors.
    Validate(DefinitionArgs),
}

#[derive(Debug, Args)]
struct DefinitionArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Parser definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// Force strict mode regardless of the definition.
    #[arg(long)]
    strict: bool,
    /// Output format for the report.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to parse (program name excluded).
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn load(path: &Path) -> Result<ParserDefinition, String> {
    ParserDefinition::load(path)
        .map_err(|err| format!("Failed to load definition '{}': {err}", path.display()))
}

/// Builds the parser, naming the program after the file when the
/// definition leaves it unset.
fn build(definition: &ParserDefinition, path: &Path) -> Result<CmdParser, String> {
    let mut parser = definition.build().map_err(|err| err.to_string())?;
    if parser.program_name().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            parser.set_program_name(stem);
        }
    }
    Ok(parser)
}

fn run_parse(args: ParseArgs) -> Result<bool, String> {
    let definition = load(&args.definition)?;
    let mut parser = build(&definition, &args.definition)?;
    if args.strict {
        parser.enable_strict_mode();
    }

    let result = parser.try_parse_tokens(&args.args);
    if let Err(err) = &result {
        tracing::warn!(error = %err, "Failed to parse arguments");
    }

    let report = ParseReport::new(&parser, &result);
    println!("{}", report.render(args.format)?);
    Ok(report.ok)
}

fn run_usage(args: DefinitionArgs) -> Result<bool, String> {
    let definition = load(&args.definition)?;
    let parser = build(&definition, &args.definition)?;
    parser.print_usage();
    Ok(true)
}

fn run_validate(args: DefinitionArgs) -> Result<bool, String> {
    let definition = load(&args.definition)?;
    definition.build().map_err(|err| err.to_string())?;
    println!(
        "Validated {} flag(s) and {} option(s).",
        definition.flags.len(),
        definition.options.len()
    );
    Ok(true)
}
