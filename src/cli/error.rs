//! CLI-level errors (wraps tree and configuration errors)

use thiserror::Error;

use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) | CliError::ConfigSerialize(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::NOINPUT,
            CliError::InvalidInput(_) => crate::exitcode::DATAERR,
            CliError::Tree(e) => match e {
                TreeError::Json(_)
                | TreeError::Malformed(_)
                | TreeError::PayloadNotAnObject(_)
                | TreeError::ReservedKey(_)
                | TreeError::CycleDetected(_) => crate::exitcode::DATAERR,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), crate::exitcode::USAGE);
        assert_eq!(
            CliError::Tree(TreeError::CycleDetected("x".into())).exit_code(),
            crate::exitcode::DATAERR
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CliError::io("read", io).exit_code(), crate::exitcode::NOINPUT);
    }
}
