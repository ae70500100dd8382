//! Persist the rendered page to a uniquely named temporary file.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ArtifactSettings;

const ARTIFACT_PREFIX: &str = "mdp";
const ARTIFACT_SUFFIX: &str = ".html";
/// Owner read/write, group and others read-only.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to create temporary artifact: {0}")]
    Create(#[source] io::Error),
    #[error("failed to report artifact path: {0}")]
    Report(#[source] io::Error),
    #[error("failed to write artifact `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A rendered page on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal; failures are logged and otherwise ignored.
    pub fn remove(self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(
                target = "application::artifact",
                op = "remove",
                path = %self.path.display(),
                "Artifact removed"
            ),
            Err(err) => warn!(
                target = "application::artifact",
                op = "remove",
                path = %self.path.display(),
                error = %err,
                "Failed to remove artifact"
            ),
        }
    }
}

/// Allocates temp files and writes rendered pages into them.
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    directory: Option<PathBuf>,
}

impl ArtifactWriter {
    pub fn new(settings: &ArtifactSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
        }
    }

    /// Create the artifact, report its path on `out`, then write `bytes` into it.
    ///
    /// The path is reported before any content is written so that it is visible
    /// even when the write fails. The file is created empty first and filled in
    /// place; a concurrent reader may briefly observe it empty.
    pub fn write<W: Write>(&self, bytes: &[u8], out: &mut W) -> Result<Artifact, ArtifactError> {
        let path = self.create()?;

        writeln!(out, "{}", path.display())
            .and_then(|()| out.flush())
            .map_err(ArtifactError::Report)?;

        fs::write(&path, bytes)
            .and_then(|()| set_permissions(&path))
            .map_err(|source| ArtifactError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(
            target = "application::artifact",
            op = "write",
            path = %path.display(),
            bytes = bytes.len(),
            "Artifact written"
        );

        Ok(Artifact { path })
    }

    fn create(&self) -> Result<PathBuf, ArtifactError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(ARTIFACT_PREFIX).suffix(ARTIFACT_SUFFIX);

        let temp = match self.directory.as_deref() {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ArtifactError::Create)?;

        let (file, path) = temp
            .keep()
            .map_err(|err| ArtifactError::Create(err.error))?;
        drop(file);

        Ok(path)
    }
}

#[cfg(unix)]
fn set_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer_in(dir: &Path) -> ArtifactWriter {
        ArtifactWriter::new(&ArtifactSettings {
            directory: Some(dir.to_path_buf()),
        })
    }

    #[test]
    fn writes_bytes_and_reports_path_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut out = Vec::new();
        let artifact = writer_in(dir.path())
            .write(b"<p>hi</p>", &mut out)
            .expect("write");

        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            format!("{}\n", artifact.path().display())
        );
        assert_eq!(fs::read(artifact.path()).expect("read"), b"<p>hi</p>");
    }

    #[test]
    fn file_name_has_prefix_and_suffix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = writer_in(dir.path())
            .write(b"", &mut io::sink())
            .expect("write");
        let name = artifact
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name");

        assert!(name.starts_with(ARTIFACT_PREFIX));
        assert!(name.ends_with(ARTIFACT_SUFFIX));
        assert_eq!(artifact.path().parent(), Some(dir.path()));
    }

    #[test]
    fn repeated_writes_get_distinct_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let writer = writer_in(dir.path());
        let first = writer.write(b"one", &mut io::sink()).expect("first");
        let second = writer.write(b"two", &mut io::sink()).expect("second");

        assert_ne!(first.path(), second.path());
        assert_eq!(fs::read(first.path()).expect("read"), b"one");
        assert_eq!(fs::read(second.path()).expect("read"), b"two");
    }

    #[cfg(unix)]
    #[test]
    fn artifact_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = writer_in(dir.path())
            .write(b"x", &mut io::sink())
            .expect("write");
        let mode = fs::metadata(artifact.path())
            .expect("metadata")
            .permissions()
            .mode();

        assert_eq!(mode & 0o777, ARTIFACT_MODE);
    }

    #[test]
    fn missing_directory_fails_creation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = writer_in(&dir.path().join("absent"))
            .write(b"x", &mut io::sink())
            .unwrap_err();

        assert!(matches!(err, ArtifactError::Create(_)));
    }

    #[test]
    fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = writer_in(dir.path())
            .write(b"x", &mut io::sink())
            .expect("write");
        let path = artifact.path().to_path_buf();

        artifact.remove();
        assert!(!path.exists());
    }
}
