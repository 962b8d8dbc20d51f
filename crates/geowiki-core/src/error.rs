use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {stream} stream: {message}")]
    Decode { stream: String, message: String },

    #[error("Unsupported output format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pipeline stage '{stage}' failed: {message}")]
    Stage { stage: &'static str, message: String },
}

impl Error {
    pub fn decode(stream: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode { stream: stream.into(), message: message.to_string() }
    }

    pub fn stage(stage: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Stage { stage, message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
