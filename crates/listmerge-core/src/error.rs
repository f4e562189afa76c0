use thiserror::Error;

/// All errors that can occur in listmerge-core.
#[derive(Debug, Error)]
pub enum ListmergeError {
    #[error("Unknown comparable field: {0}")]
    InvalidField(String),

    #[error("Invalid record status: {0}")]
    InvalidStatus(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Exit codes used by the `listmerge` binary.
#[repr(i32)]
pub enum ExitCode {
    NotFound = 2,
    InvalidArgs = 3,
    Conflict = 7,
    ConfirmRequired = 8,
}

pub type Result<T> = std::result::Result<T, ListmergeError>;
