mod input;
mod logging;
mod output;
mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use pgen_core::{Error as SchemaError, validate_metadata};
use pgen_parse::{DecodeError, DecodeOptions, parse_str_with_options};
use pgen_render::render;
use settings::{OutputFormat, Settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("error: model not found")]
    ModelNotFound,
    #[error("error: model should be a YAML file")]
    ModelIsDirectory,
    #[error("unknown error: {0}")]
    Stat(io::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::Decode(err) => err.code(),
            CliError::Schema(err) => err.code(),
            CliError::ModelNotFound | CliError::ModelIsDirectory | CliError::Stat(_) => "model",
            CliError::Io(_) => "io",
            CliError::Config(_) | CliError::InvalidConfig(_) => "config",
            CliError::Json(_) => "json",
            CliError::Logging(_) => "logging",
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "pgen", version, about = "Compile a YAML schema into PostgreSQL DDL")]
struct Cli {
    /// Schema document to compile. Nothing is done when no model is configured.
    #[arg(short, long, value_name = "PATH")]
    model: Option<PathBuf>,
    /// Write output to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Reject unknown enum/table attributes and unknown index columns.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Optional TOML config file; command-line flags take precedence.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter directive (e.g. `info`, `pgen_parse=debug`).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Emit log records as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            model: self.model.clone(),
            out: self.out.clone(),
            format: self.format,
            strict: self.strict,
            log_level: self.log_level.clone(),
            log_json: self.log_json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Print the single-line diagnostic for a failed run.
fn report(err: &CliError, out: &mut impl Write) {
    tracing::debug!(event = "compile_failed", error_code = err.code(), error = %err);
    let _ = writeln!(out, "{err}");
}

fn run(cli: Cli) -> CliResult<()> {
    let file_settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = file_settings.merge(cli.overrides());

    logging::init_logging(settings.log_level(), settings.log_json)?;

    let Some(model) = settings.model.as_deref() else {
        tracing::debug!(event = "no_model_configured");
        return Ok(());
    };

    let timer = Instant::now();
    tracing::info!(
        event = "compile_started",
        model = %model.display(),
        strict = settings.strict,
        format = ?settings.format()
    );

    let rendered = compile(model, settings.format(), settings.strict)?;

    match settings.out.as_deref() {
        Some(path) => {
            output::write_output(path, rendered.as_bytes())?;
            tracing::info!(event = "output_written", path = %path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "compile_finished", status = "success", duration_ms = duration_ms);

    Ok(())
}

/// Load, decode and validate a model, then produce the requested output.
fn compile(model: &Path, format: OutputFormat, strict: bool) -> CliResult<String> {
    let source = input::read_model(model)?;
    let metadata = parse_str_with_options(&source, &DecodeOptions { strict })?;
    validate_metadata(&metadata)?;
    tracing::info!(
        event = "decode_finished",
        enums = metadata.enums.len(),
        tables = metadata.tables.len()
    );

    let output = match format {
        OutputFormat::Sql => render(&metadata),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&metadata)?;
            json.push('\n');
            json
        }
    };

    Ok(output)
}
