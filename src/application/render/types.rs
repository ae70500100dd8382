use std::{io, path::PathBuf};

use thiserror::Error;

/// Markdown handed to the render service. Bytes that are not valid UTF-8 are
/// decoded lossily, so every input renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub markdown: String,
}

impl RenderRequest {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes))
    }
}

/// HTML that has been through the sanitiser. Only the sanitise stage can
/// construct one, which keeps unsanitised markup out of the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Sanitised HTML fragment ready for embedding in a page template.
    pub html: SanitizedHtml,
}

/// Failures while loading a page template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse template `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },
}

/// Structured errors surfaced by the content pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read markdown input: {0}")]
    Input(#[source] io::Error),
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("failed to execute template `{name}`: {source}")]
    TemplateExecution {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Markdown to sanitised HTML. Implementations must be pure and deterministic:
/// given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError>;
}
