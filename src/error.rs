//! Error types for the controller, the host binding and the app registry.

use thiserror::Error;

/// Main error type for controller operations.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// A string passed to the host contained an interior NUL byte.
    #[error("String contains an interior NUL byte: {0}")]
    InvalidString(#[from] std::ffi::NulError),

    /// The host returned a non-UTF-8 string.
    #[error("Host returned invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The host reported a failure when saving the profile configuration.
    #[error("Failed to save profile configuration (code {0})")]
    ConfigSave(i32),

    /// The host has no active profile configuration.
    #[error("No active profile configuration")]
    NoProfileConfig,

    /// App registry I/O failure.
    #[error("Registry I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// App registry entry could not be encoded or decoded.
    #[error("Registry encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    /// App registry file is truncated or malformed.
    #[error("Corrupt app registry: {0}")]
    CorruptRegistry(String),

    /// An app with this UUID is already registered.
    #[error("App {0} is already registered")]
    DuplicateApp(uuid::Uuid),

    /// Key material could not be parsed.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;
