//! Configuration file loading for the CLI
//!
//! Finds the TOML file holding a [`GeneratorConfig`], parses it and
//! validates it before any declaration is expanded.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use tagsmith_codegen::config::GeneratorConfig;

use crate::error::{CliError, ConfigError};

/// Configuration looked up relative to the working directory.
const LOCAL_CONFIG: &str = "tagsmith/config.toml";

/// Find and load the generator configuration
///
/// An explicit path must exist. Otherwise the first existing file among
/// [`candidate_paths`] is used, falling back to the default configuration.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<GeneratorConfig, CliError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    for candidate in candidate_paths() {
        if candidate.exists() {
            info!(path = candidate.display().to_string(); "Loading configuration");
            return load_config_file(&candidate);
        }
        debug!(path = candidate.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(GeneratorConfig::default())
}

/// Implicit configuration locations, most specific first: the local
/// project directory, then the platform config directory.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    match ProjectDirs::from("com", "tagsmith", "tagsmith") {
        Some(dirs) => paths.push(dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<GeneratorConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: GeneratorConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .validate()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(config)
}
