//! Configuration layer: typed settings with layered precedence
//! (defaults → file → env → CLI).
//!
//! An explicit `-t/--template` flag wins over `MDP_TEMPLATE`, which in turn
//! wins over the built-in page template.

mod cli;

use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub use cli::{CliArgs, LoggingOverrides};

const LOCAL_CONFIG_BASENAME: &str = "mdp";
const ENV_PREFIX: &str = "MDP";
const DEFAULT_CLEANUP_DELAY_MS: u64 = 2_000;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Template override; `None` selects the built-in page.
    pub template: Option<PathBuf>,
    pub logging: LoggingSettings,
    pub artifact: ArtifactSettings,
    pub viewer: ViewerSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Default)]
pub struct ArtifactSettings {
    /// Directory for artifacts; `None` uses the system temp directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// Grace period after the opener exits before the artifact is removed.
    pub cleanup_delay: Duration,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            cleanup_delay: Duration::from_millis(DEFAULT_CLEANUP_DELAY_MS),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    load_with_environment(cli, None)
}

/// Same as [`load`], but reads environment variables from `environment`
/// instead of the process environment when it is given.
pub fn load_with_environment(
    cli: &CliArgs,
    environment: Option<Map<String, String>>,
) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(environment),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli_overrides(cli);

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    template: Option<PathBuf>,
    logging: RawLoggingSettings,
    artifact: RawArtifactSettings,
    viewer: RawViewerSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawArtifactSettings {
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawViewerSettings {
    cleanup_delay_ms: Option<u64>,
}

impl RawSettings {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(template) = cli.template.as_ref() {
            self.template = Some(template.clone());
        }
        self.apply_logging_overrides(&cli.logging);
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            template,
            logging,
            artifact,
            viewer,
        } = raw;

        Ok(Self {
            template: non_empty_path(template),
            logging: build_logging_settings(logging)?,
            artifact: build_artifact_settings(artifact),
            viewer: build_viewer_settings(viewer),
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_artifact_settings(artifact: RawArtifactSettings) -> ArtifactSettings {
    ArtifactSettings {
        directory: non_empty_path(artifact.directory),
    }
}

fn build_viewer_settings(viewer: RawViewerSettings) -> ViewerSettings {
    let delay_ms = viewer
        .cleanup_delay_ms
        .unwrap_or(DEFAULT_CLEANUP_DELAY_MS);

    ViewerSettings {
        cleanup_delay: Duration::from_millis(delay_ms),
    }
}

/// An empty value (e.g. `MDP_TEMPLATE=`) counts as unset.
fn non_empty_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().is_empty())
}

#[cfg(test)]
mod tests;
