use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::{CliError, CliResult};

/// Install the process-wide subscriber. Logs go to stderr so stdout stays
/// reserved for generated output.
pub fn init_logging(level: &str, json: bool) -> CliResult<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|err| CliError::Logging(format!("invalid log level '{level}': {err}")))?;

    let layer = tracing_subscriber::fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let installed = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    installed.map_err(|err| CliError::Logging(err.to_string()))
}
