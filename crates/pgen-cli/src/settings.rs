use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CliResult;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// PostgreSQL DDL.
    #[default]
    Sql,
    /// The resolved schema model as JSON.
    Json,
}

/// Settings read from a `pgen.toml` file or collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub model: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub strict: bool,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Settings {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Layer `overrides` on top of `self`. Values set in `overrides` win;
    /// boolean switches are enabled if either side enables them.
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            model: overrides.model.or(self.model),
            out: overrides.out.or(self.out),
            format: overrides.format.or(self.format),
            strict: overrides.strict || self.strict,
            log_level: overrides.log_level.or(self.log_level),
            log_json: overrides.log_json || self.log_json,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
