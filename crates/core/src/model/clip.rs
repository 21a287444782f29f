use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipError {
    #[error("clip reference cannot be empty")]
    EmptyClipRef,

    #[error("clip URL failed to parse")]
    InvalidUrl,
}

//
// ─── CLIP REFERENCE ────────────────────────────────────────────────────────────
//

/// Address of a pre-recorded animal-sound clip.
///
/// Clips are static assets; the player decides how to resolve the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipRef {
    FilePath(PathBuf),
    Url(Url),
}

impl ClipRef {
    /// # Errors
    ///
    /// Returns `ClipError::EmptyClipRef` for an empty path.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ClipError> {
        let p = path.into();
        if p.as_os_str().is_empty() {
            return Err(ClipError::EmptyClipRef);
        }
        Ok(ClipRef::FilePath(p))
    }

    /// # Errors
    ///
    /// Returns `ClipError::EmptyClipRef` for blank input and
    /// `ClipError::InvalidUrl` when parsing fails.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self, ClipError> {
        let s = url.as_ref().trim();
        if s.is_empty() {
            return Err(ClipError::EmptyClipRef);
        }
        let u = Url::parse(s).map_err(|_| ClipError::InvalidUrl)?;
        Ok(ClipRef::Url(u))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ClipRef::FilePath(p) => Some(p.as_path()),
            ClipRef::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            ClipRef::Url(u) => Some(u),
            ClipRef::FilePath(_) => None,
        }
    }

    /// Display form used in logs and accessibility labels.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            ClipRef::FilePath(p) => p.display().to_string(),
            ClipRef::Url(u) => u.to_string(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_ref_is_rejected() {
        let err = ClipRef::from_file("").unwrap_err();
        assert_eq!(err, ClipError::EmptyClipRef);
    }

    #[test]
    fn file_ref_round_trips() {
        let clip = ClipRef::from_file("audios/animals/cow.mp3").unwrap();
        assert_eq!(
            clip.as_path(),
            Some(Path::new("audios/animals/cow.mp3"))
        );
        assert!(clip.as_url().is_none());
    }

    #[test]
    fn url_ref_parses() {
        let clip = ClipRef::from_url("https://example.org/lion.mp3").unwrap();
        assert!(clip.as_url().is_some());
    }

    #[test]
    fn garbage_url_is_rejected() {
        let err = ClipRef::from_url("not a url").unwrap_err();
        assert_eq!(err, ClipError::InvalidUrl);
    }
}
