//! Command handlers -- one module per subcommand

pub mod parse;
pub mod templates;

use std::path::Path;

use tracing::debug;

use panlog_core::config::PanlogConfig;

use crate::error::CliError;

/// Load the effective configuration.
///
/// With a path: file + env overrides + validation + template files.
/// Without one: built-in defaults + env overrides.
pub async fn load_config(path: Option<&Path>) -> Result<PanlogConfig, CliError> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            PanlogConfig::load(path).await?
        }
        None => {
            debug!("no configuration file given, using defaults");
            PanlogConfig::from_env().await?
        }
    };
    Ok(config)
}
