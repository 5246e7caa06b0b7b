use thiserror::Error;

/// Main error type for ridl operations
#[derive(Error, Debug)]
pub enum RidlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to get service: {0}")]
    ServiceNotFound(String),

    #[error("No interface descriptor returned for service: '{0}'")]
    NoInterface(String),

    #[error("Class not found for {0} (C++ services not supported)")]
    ClassNotFound(String),

    #[error("Duplicate transaction code {code}: '{first}' and '{second}'")]
    DuplicateCode {
        code: i64,
        first: String,
        second: String,
    },

    #[error("Codename doesn't look like a transaction code constant: {0}")]
    InvalidTransactionName(String),

    #[error("Remote communication failure: {0}")]
    Remote(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RidlError>;
