use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{
    application::{artifact::ArtifactError, render::RenderError},
    config::LoadError,
    infra::{error::InfraError, viewer::ViewerError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to open `{path}`: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Viewer(#[from] ViewerError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
}
