//! One preview invocation: render, write the artifact, hand it to a viewer and
//! clean up afterwards.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    application::{
        artifact::{Artifact, ArtifactWriter},
        error::AppError,
        render::{PreviewPipeline, render_service},
    },
    config::Settings,
    domain::document::DocumentSource,
    infra::viewer::{Opener, Viewer, ViewerError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub source: DocumentSource,
    /// Keep the artifact and do not launch a viewer.
    pub skip_preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The artifact was written and left on disk.
    Kept(Artifact),
    /// The artifact was opened in a viewer and then removed.
    Viewed { path: PathBuf },
}

/// Run a preview using the opener for the current platform.
pub fn run<W: Write>(
    request: &PreviewRequest,
    settings: &Settings,
    out: &mut W,
) -> Result<PreviewOutcome, AppError> {
    run_with_opener(request, settings, Opener::current, out)
}

/// Run a preview with an explicit opener resolver. The resolver is only
/// consulted once the artifact exists and skip-preview is off.
pub fn run_with_opener<W, F>(
    request: &PreviewRequest,
    settings: &Settings,
    resolve_opener: F,
    out: &mut W,
) -> Result<PreviewOutcome, AppError>
where
    W: Write,
    F: FnOnce() -> Result<Opener, ViewerError>,
{
    let input = request.source.open().map_err(|source| AppError::Source {
        path: request
            .source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        source,
    })?;

    let pipeline = PreviewPipeline::new(render_service());
    let page = pipeline.render(
        input,
        settings.template.as_deref(),
        &request.source.display_name(),
    )?;

    let artifact = ArtifactWriter::new(&settings.artifact).write(&page, out)?;

    info!(
        target = "application::preview",
        op = "run",
        path = %artifact.path().display(),
        bytes = page.len(),
        skip_preview = request.skip_preview,
        "Preview artifact ready"
    );

    if request.skip_preview {
        return Ok(PreviewOutcome::Kept(artifact));
    }

    let path = artifact.path().to_path_buf();
    let opened = resolve_opener()
        .and_then(|opener| Viewer::new(opener, &settings.viewer).open(&path));
    artifact.remove();
    opened?;

    Ok(PreviewOutcome::Viewed { path })
}
