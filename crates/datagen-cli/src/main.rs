mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use datagen_dsl::{DslError, ast_json_schema, load_document};
use datagen_generate::{GenerationError, write_json};
use datagen_interpreter::{Interpreter, InterpreterError};
use thiserror::Error;

const DEFAULT_DEST: &str = "entities.json";

#[derive(Debug, Error)]
enum CliError {
    #[error("File passed '{}' does not exist", .0.display())]
    MissingInput(PathBuf),
    #[error("no document given; pass a document path or a subcommand")]
    NoInput,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid document: {0}")]
    Document(#[from] DslError),
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
    #[error("output error: {0}")]
    Output(#[from] GenerationError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "datagen",
    version,
    about = "Generate synthetic entities from a datagen document",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate entities from a document (the default).
    Generate(GenerateArgs),
    /// Print the JSON Schema of datagen documents.
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Syntax tree document (JSON).
    #[arg(value_name = "DOCUMENT")]
    input: Option<PathBuf>,
    /// Output path for generated entities.
    #[arg(long)]
    dest: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Date used as "today" by date defaults (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    base_date: Option<NaiveDate>,
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write compact JSON.
    #[arg(long, default_value_t = false)]
    compact: bool,
    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Write the schema here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Schema(args)) => run_schema(args),
        None => run_generate(cli.generate),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let input = args.input.ok_or(CliError::NoInput)?;
    if !input.exists() {
        return Err(CliError::MissingInput(input));
    }

    logging::init_logging(args.log_json)?;

    let settings = config::load_settings(args.config.as_deref())?;
    let mut options = settings.generate;
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.base_date.is_some() {
        options.base_date = args.base_date;
    }
    if args.compact {
        options.pretty = false;
    }
    let dest = args
        .dest
        .or(settings.dest)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DEST));

    tracing::info!(event = "run_started", input = %input.display());
    let timer = Instant::now();

    let content = std::fs::read_to_string(&input)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    let root = load_document(&document)?;
    tracing::info!(event = "document_loaded", statements = root.children().len());

    let pretty = options.pretty;
    let mut interpreter = Interpreter::new(options);
    tracing::info!(event = "seed_resolved", seed = interpreter.seed());

    let outputs = interpreter.run(&root)?;
    let records: usize = outputs.iter().map(|output| output.records.len()).sum();
    tracing::info!(event = "generation_finished", directives = outputs.len(), records);

    let bytes = write_json(&dest, &outputs, pretty)?;
    tracing::info!(event = "output_written", path = %dest.display(), bytes);

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let schema = serde_json::to_string_pretty(&ast_json_schema())?;
    match args.out {
        Some(path) => std::fs::write(path, format!("{schema}\n"))?,
        None => println!("{schema}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_document_runs_generate() {
        let cli = Cli::try_parse_from(["datagen", "--seed", "9", "people.json"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.generate.input, Some(PathBuf::from("people.json")));
        assert_eq!(cli.generate.seed, Some(9));
    }

    #[test]
    fn schema_subcommand() {
        let cli = Cli::try_parse_from(["datagen", "schema"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Schema(_))));
    }

    #[test]
    fn base_date_is_parsed() {
        let cli = Cli::try_parse_from(["datagen", "--base-date", "2017-07-19", "x.json"])
            .expect("parse");
        assert_eq!(cli.generate.base_date, NaiveDate::from_ymd_opt(2017, 7, 19));
        assert!(Cli::try_parse_from(["datagen", "--base-date", "yesterday", "x.json"]).is_err());
    }

    #[test]
    fn missing_document_is_reported() {
        let args = GenerateArgs {
            input: Some(PathBuf::from("/no/such/document.json")),
            ..GenerateArgs::default()
        };
        let err = run_generate(args).expect_err("missing input");
        assert_eq!(
            err.to_string(),
            "File passed '/no/such/document.json' does not exist"
        );
    }
}
