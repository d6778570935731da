use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("invalid candidate data: {0}")]
    Candidates(#[from] serde_json::Error),

    #[error("failed to render row markup: {0}")]
    Render(#[from] askama::Error),
}

pub type Result<T> = std::result::Result<T, PickerError>;
