use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Path Error: '{path}' {reason}")]
    Path { path: PathBuf, reason: String },

    #[error("Configuration Error in {origin}: {message}")]
    Config { origin: String, message: String },

    #[error(
        "Ambiguous Redaction: token '{token}' maps to both '{existing}' and '{incoming}'"
    )]
    AmbiguousRedaction {
        token: String,
        existing: String,
        incoming: String,
    },

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("Glob Pattern Error: {0}")]
    Glob(String),

    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File Read Error: Path '{path}', Error: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{path}', Error: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output Path Error: '{path}' {reason}")]
    OutputPath { path: PathBuf, reason: String },

    #[error("WalkDir Error: {0}")]
    WalkDir(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),
}

impl AppError {
    pub fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn config(origin: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Config {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

impl From<globset::Error> for AppError {
    fn from(err: globset::Error) -> Self {
        AppError::Glob(format!("Globset error: {}", err))
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::WalkDir(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::TomlParse(err.to_string())
    }
}
