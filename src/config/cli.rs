use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the `mdp` binary.
#[derive(Debug, Parser)]
#[command(
    name = "mdp",
    version,
    about = "Render a markdown document to HTML and open it in the default viewer"
)]
#[command(group(
    ArgGroup::new("input")
        .args(["file", "pipe"])
        .required(true)
        .multiple(true)
))]
pub struct CliArgs {
    /// Markdown file to preview. With --pipe it only names the document.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Read markdown from standard input.
    #[arg(long)]
    pub pipe: bool,

    /// Write the artifact but do not open or delete it.
    #[arg(short = 's', long = "skip-preview")]
    pub skip_preview: bool,

    /// Alternate page template (takes precedence over MDP_TEMPLATE).
    #[arg(
        short = 't',
        long = "template",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub template: Option<PathBuf>,

    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "MDP_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
