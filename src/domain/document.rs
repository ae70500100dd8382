//! Where markdown input comes from and how it is labelled in the rendered page.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Origin of the markdown document processed by a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Markdown stored in a file on disk.
    File(PathBuf),
    /// Markdown read from standard input. The optional name is used only as
    /// the display name; no file is opened for it.
    Stdin { name: Option<PathBuf> },
}

impl DocumentSource {
    /// Resolve the source from the `--file`/`--pipe` pair. Returns `None` when
    /// neither was supplied.
    pub fn from_flags(file: Option<PathBuf>, pipe: bool) -> Option<Self> {
        match (file, pipe) {
            (name, true) => Some(Self::Stdin { name }),
            (Some(path), false) => Some(Self::File(path)),
            (None, false) => None,
        }
    }

    /// Path or name as supplied by the caller, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdin { name } => name.as_deref(),
        }
    }

    /// Raw path or name as supplied by the caller, before base-name reduction.
    /// Non-UTF-8 bytes are replaced rather than dropping the whole name.
    pub fn display_name(&self) -> Cow<'_, str> {
        self.path()
            .map(Path::to_string_lossy)
            .unwrap_or_default()
    }

    /// Open the byte stream for this source.
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        match self {
            Self::File(path) => Ok(Box::new(File::open(path)?)),
            Self::Stdin { .. } => Ok(Box::new(io::stdin().lock())),
        }
    }
}

/// Reduce a display name to its final path component. Empty names stay empty.
pub fn base_name(display_name: &str) -> String {
    let trimmed = display_name.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return String::new();
    }

    Path::new(trimmed)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_takes_precedence_over_file_for_reading() {
        let source = DocumentSource::from_flags(Some(PathBuf::from("notes/readme.md")), true);
        assert_eq!(
            source,
            Some(DocumentSource::Stdin {
                name: Some(PathBuf::from("notes/readme.md"))
            })
        );
    }

    #[test]
    fn no_flags_means_no_source() {
        assert!(DocumentSource::from_flags(None, false).is_none());
    }

    #[test]
    fn stdin_without_name_has_empty_display_name() {
        let source = DocumentSource::Stdin { name: None };
        assert_eq!(source.display_name(), "");
        assert_eq!(base_name(&source.display_name()), "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_keeps_readable_parts() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let path = PathBuf::from(OsStr::from_bytes(b"docs/notes\xff.md"));
        let source = DocumentSource::File(path);
        let name = base_name(&source.display_name());

        assert!(name.starts_with("notes"));
        assert!(name.ends_with(".md"));
        assert!(name.contains('\u{FFFD}'));
    }

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("docs/guide/intro.md"), "intro.md");
        assert_eq!(base_name("intro.md"), "intro.md");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = DocumentSource::File(dir.path().join("absent.md"));
        let err = source.open().err().expect("open should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
