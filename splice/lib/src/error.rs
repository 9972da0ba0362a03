//! Error types for the splice library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Identifies which of the two markers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors emitted while locating or replacing a marker-bounded span.
///
/// Marker failures are always raised before anything is written.
#[derive(Debug, Error)]
pub enum SpliceError {
    /// The target (or a replacement source) does not exist.
    #[error("file not found: `{path}`")]
    FileNotFound { path: PathBuf },

    /// The file content is not valid UTF-8.
    #[error("`{path}` is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A marker does not occur anywhere in the buffer.
    #[error("{kind} marker not found: {marker:?}")]
    MarkerNotFound { kind: MarkerKind, marker: String },

    /// The end boundary lands at or before the start marker.
    #[error("end marker {end:?} (byte {end_at}) closes at or before start marker {start:?} (byte {start_at})")]
    MarkersOutOfOrder {
        start: String,
        start_at: usize,
        end: String,
        end_at: usize,
    },

    /// A marker was given as the empty string.
    #[error("{0} marker must not be empty")]
    EmptyMarker(MarkerKind),

    /// Any other filesystem failure.
    #[error("I/O error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recipe file could not be loaded or is inconsistent.
    #[error("invalid recipe `{path}`: {message}")]
    Recipe { path: PathBuf, message: String },
}

impl SpliceError {
    /// Maps an `io::Error` for `path`, promoting `NotFound` to [`SpliceError::FileNotFound`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns `true` for the marker-related failures.
    pub fn is_marker_error(&self) -> bool {
        matches!(
            self,
            Self::MarkerNotFound { .. } | Self::MarkersOutOfOrder { .. } | Self::EmptyMarker(_)
        )
    }
}

/// Convenience Result type for splice operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_io_error_becomes_file_not_found() {
        let err = SpliceError::from_io(
            "missing.js",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, SpliceError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "file not found: `missing.js`");
    }

    #[test]
    fn other_io_errors_keep_their_source() {
        let err = SpliceError::from_io(
            "locked.js",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, SpliceError::Io { .. }));
    }

    #[test]
    fn marker_not_found_names_the_marker() {
        let err = SpliceError::MarkerNotFound {
            kind: MarkerKind::Start,
            marker: "<A>".to_string(),
        };
        assert_eq!(err.to_string(), "start marker not found: \"<A>\"");
        assert!(err.is_marker_error());
    }
}
