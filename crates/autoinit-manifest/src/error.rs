//! Manifest error types

use std::io;
use std::path::PathBuf;

/// Raised when a manifest is missing, unreadable or not a JSON object of the
/// expected shape.
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse package.json file at {}: {cause}", .path.display())]
pub struct ManifestParseError {
    pub path: PathBuf,
    #[source]
    pub cause: ManifestErrorCause,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestErrorCause {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl ManifestParseError {
    pub fn new(path: impl Into<PathBuf>, cause: impl Into<ManifestErrorCause>) -> Self {
        Self {
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// One-based line and column of a JSON syntax or shape error.
    ///
    /// `None` for I/O failures, and for errors serde_json could not place.
    pub fn line_col(&self) -> Option<(usize, usize)> {
        match &self.cause {
            ManifestErrorCause::Json(err) if err.line() > 0 => Some((err.line(), err.column())),
            _ => None,
        }
    }

    /// The underlying failure without the path prefix.
    pub fn reason(&self) -> String {
        self.cause.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_have_no_location() {
        let err = ManifestParseError::new(
            "/pkgs/app/package.json",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.line_col(), None);
        assert!(err.to_string().contains("/pkgs/app/package.json"));
        assert!(err.to_string().ends_with("gone"));
    }

    #[test]
    fn test_json_errors_keep_location() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"name\": ,\n}").unwrap_err();
        let err = ManifestParseError::new("/pkgs/app/package.json", json_err);
        assert_eq!(err.line_col().map(|(line, _)| line), Some(2));
    }
}
