use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{CliError, CliResult};

/// Write `data` to a temp file beside `path`, then persist it over `path`.
///
/// The temp file is deleted when any step fails, so a rejected write leaves
/// the directory as it was.
pub fn write_output(path: &Path, data: &[u8]) -> CliResult<()> {
    if path.file_name().is_none() {
        return Err(CliError::InvalidConfig(format!(
            "invalid output path: {}",
            path.display()
        )));
    }

    let dir = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| CliError::Io(err.error))?;
    sync_dir(dir)?;

    Ok(())
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
