use thiserror::Error;

/// Errors produced while turning schema text into a [`pgen_core::Metadata`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Schema(#[from] pgen_core::Error),
}

impl DecodeError {
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::Yaml(_) => "yaml",
            DecodeError::Schema(err) => err.code(),
        }
    }
}
