use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to register window class `{class}` (os error {code})")]
    RegisterClass { class: String, code: u32 },

    #[error("failed to create message-only window (os error {0})")]
    CreateWindow(u32),

    #[error("failed to register raw input devices (os error {0})")]
    RegisterDevices(u32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
