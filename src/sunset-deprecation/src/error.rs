//! Error types.

use thiserror::Error;

/// Errors raised by the deprecation subsystem.
///
/// Warnings themselves never fail; these cover caller mistakes, enum lookups
/// and configuration.
#[derive(Error, Debug)]
pub enum DeprecationError {
    /// A call passed both the deprecated argument name and its replacement.
    #[error("{func_name} received both {new_arg} and {old_arg} (deprecated).")]
    ConflictingArguments {
        func_name: String,
        new_arg: String,
        old_arg: String,
    },
    #[error("'{name}' is not a member of {enum_name}")]
    UnknownMemberName { enum_name: String, name: String },
    #[error("{value} is not a valid {enum_name}")]
    UnknownMemberValue { enum_name: String, value: String },
    #[error("Global deprecation emitter is already installed")]
    EmitterAlreadyInstalled,
    #[error("Invalid deprecation config: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for DeprecationError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeprecationError>;
