use std::io;
use std::path::Path;

use crate::{CliError, CliResult};

/// Ensure the model path names a readable regular file.
pub fn check_model_file(path: &Path) -> CliResult<()> {
    match std::fs::metadata(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(CliError::ModelNotFound),
        Err(err) => Err(CliError::Stat(err)),
        Ok(meta) if meta.is_dir() => Err(CliError::ModelIsDirectory),
        Ok(_) => Ok(()),
    }
}

pub fn read_model(path: &Path) -> CliResult<String> {
    check_model_file(path)?;
    let source = std::fs::read_to_string(path)?;
    tracing::info!(event = "model_loaded", path = %path.display(), bytes = source.len());
    Ok(source)
}
