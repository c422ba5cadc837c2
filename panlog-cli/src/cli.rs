//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// panlog -- Palo Alto Networks syslog parser.
///
/// Use `panlog <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "panlog", version, about, long_about = None)]
pub struct Cli {
    /// Path to a panlog.toml configuration file (default: built-in defaults + env).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for reports.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse PAN syslog lines into typed records.
    Parse(ParseArgs),

    /// Validate or print field templates.
    Templates(TemplatesArgs),
}

// ---- parse ----

/// Parse PAN syslog lines from a file or stdin.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Input file, one message per line (default: stdin).
    pub input: Option<PathBuf>,

    /// Record output format (one JSON object per line, or text).
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,
}

// ---- templates ----

/// Manage field templates.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub action: TemplatesAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesAction {
    /// Build all templates and report line errors.
    Check,
    /// Print the effective template for one category.
    Show {
        /// Message category.
        category: CategoryArg,
    },
}

/// Message category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    System,
    Threat,
    Traffic,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["panlog", "parse"]).expect("parse should succeed");
        assert!(cli.config.is_none());
        assert_eq!(cli.output, OutputFormat::Text);
        match cli.command {
            Commands::Parse(args) => {
                assert!(args.input.is_none());
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected parse command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_file_and_text_format() {
        let cli = Cli::try_parse_from([
            "panlog",
            "parse",
            "/var/log/pan.log",
            "--format",
            "text",
            "--config",
            "panlog.toml",
        ])
        .expect("parse should succeed");
        assert_eq!(cli.config, Some(PathBuf::from("panlog.toml")));
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.input, Some(PathBuf::from("/var/log/pan.log")));
                assert_eq!(args.format, OutputFormat::Text);
            }
            other => panic!("expected parse command, got {other:?}"),
        }
    }

    #[test]
    fn test_templates_show_category() {
        let cli = Cli::try_parse_from(["panlog", "templates", "show", "threat"])
            .expect("parse should succeed");
        match cli.command {
            Commands::Templates(TemplatesArgs {
                action: TemplatesAction::Show { category },
            }) => assert_eq!(category, CategoryArg::Threat),
            other => panic!("expected templates show, got {other:?}"),
        }
    }

    #[test]
    fn test_templates_show_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["panlog", "templates", "show", "config"]).is_err());
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["panlog", "templates", "check", "--output", "json"])
            .expect("parse should succeed");
        assert_eq!(cli.output, OutputFormat::Json);
    }
}
