//! Launch the platform's default opener on a rendered artifact.

use std::{
    path::Path,
    process::{Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ViewerSettings;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no known opener for platform `{os}`")]
    UnsupportedPlatform { os: String },
    #[error("opener `{program}` not found: {source}")]
    ExecutableNotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited unsuccessfully (exit {exit_code:?})")]
    Exited {
        program: String,
        exit_code: Option<i32>,
    },
}

/// Program and leading arguments that open a path in the default viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opener {
    program: String,
    args: Vec<String>,
}

impl Opener {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Resolve the opener for an OS identifier as reported by
    /// [`std::env::consts::OS`]. Unknown identifiers are rejected without
    /// touching the process table.
    pub fn for_os(os: &str) -> Result<Self, ViewerError> {
        match os {
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
                Ok(Self::new("xdg-open", Vec::new()))
            }
            "macos" => Ok(Self::new("open", Vec::new())),
            // The empty argument is the window title `start` expects when the
            // path is quoted.
            "windows" => Ok(Self::new(
                "cmd.exe",
                vec!["/C".into(), "start".into(), String::new()],
            )),
            other => Err(ViewerError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Opener for the platform this binary was built for.
    pub fn current() -> Result<Self, ViewerError> {
        Self::for_os(std::env::consts::OS)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Opens artifacts and holds the caller until cleanup is reasonably safe.
#[derive(Debug, Clone)]
pub struct Viewer {
    opener: Opener,
    cleanup_delay: Duration,
}

impl Viewer {
    pub fn new(opener: Opener, settings: &ViewerSettings) -> Self {
        Self {
            opener,
            cleanup_delay: settings.cleanup_delay,
        }
    }

    /// Run the opener on `path` and wait for it to exit, then wait the
    /// configured grace period.
    ///
    /// Openers usually return before the viewer has read the file, so the grace
    /// period is a heuristic rather than a guarantee. It applies whether or not
    /// the opener succeeded.
    pub fn open(&self, path: &Path) -> Result<(), ViewerError> {
        let program = which::which(&self.opener.program).map_err(|source| {
            ViewerError::ExecutableNotFound {
                program: self.opener.program.clone(),
                source,
            }
        })?;

        let started_at = Instant::now();
        let status = Command::new(&program)
            .args(&self.opener.args)
            .arg(path)
            // Our stdout carries only the artifact path. Browsers started by the
            // opener may keep writing long after it exits, so nothing is piped.
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        thread::sleep(self.cleanup_delay);

        let status = status.map_err(|source| {
            warn!(
                target = "infra::viewer",
                op = "open",
                program = %program.display(),
                error = %source,
                "Failed to spawn opener"
            );
            ViewerError::Launch {
                program: self.opener.program.clone(),
                source,
            }
        })?;

        if !status.success() {
            return Err(ViewerError::Exited {
                program: self.opener.program.clone(),
                exit_code: status.code(),
            });
        }

        info!(
            target = "infra::viewer",
            op = "open",
            program = %program.display(),
            path = %path.display(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Artifact handed to viewer"
        );

        Ok(())
    }
}
