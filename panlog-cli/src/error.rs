//! CLI-specific error types and exit code mapping

use panlog_core::error::PanlogError;
use panlog_pan_parser::PanParseError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// One or more templates failed to build.
    #[error("template error: {0}")]
    Template(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration or template error  |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Template(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<PanlogError> for CliError {
    fn from(e: PanlogError) -> Self {
        match e {
            PanlogError::Config(inner) => Self::Config(inner.to_string()),
            PanlogError::Template(summary) => Self::Template(summary),
            PanlogError::Io(inner) => Self::Io(inner),
            other => Self::Command(other.to_string()),
        }
    }
}

impl From<PanParseError> for CliError {
    fn from(e: PanParseError) -> Self {
        PanlogError::from(e).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panlog_core::error::{ConfigError, ParseError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_template_error() {
        let err = CliError::Template("[SYSTEM] LINE 2".to_owned());
        assert_eq!(err.exit_code(), 2, "template error should return exit code 2");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("test error".to_owned());
        assert_eq!(err.exit_code(), 1, "command error should return exit code 1");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = err.to_string();
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }

    #[test]
    fn test_from_core_config_error() {
        let core_err = PanlogError::Config(ConfigError::FileNotFound {
            path: "panlog.toml".to_owned(),
        });
        let cli_err: CliError = core_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert_eq!(cli_err.exit_code(), 2);
    }

    #[test]
    fn test_from_core_parse_error_is_command() {
        let core_err = PanlogError::Parse(ParseError::Failed {
            reason: "bad".to_owned(),
        });
        let cli_err: CliError = core_err.into();
        assert_eq!(cli_err.exit_code(), 1);
    }

    #[test]
    fn test_from_invalid_templates() {
        let cli_err: CliError = PanParseError::InvalidTemplates("LINE 1".to_owned()).into();
        match cli_err {
            CliError::Template(summary) => assert_eq!(summary, "LINE 1"),
            other => panic!("expected Template error variant, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parser_config_error() {
        let cli_err: CliError = PanParseError::Config {
            field: "max_input_size".to_owned(),
            reason: "must be 1-16777216".to_owned(),
        }
        .into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }
}
