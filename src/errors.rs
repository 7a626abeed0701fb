// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A command string is blank after trimming.
    #[error("No command configured for this task")]
    EmptyCommand,

    #[error("Unknown tool \"{0}\" (no bundled check with that identifier)")]
    UnknownTool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ReadyError>;
