//! Error types for OBJ input and output.

use cell_split::SplitError;
use thiserror::Error;

/// Errors raised while reading or writing OBJ files or job configuration.
#[derive(Debug, Error)]
pub enum ObjError {
    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A malformed statement.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A face referenced a vertex, texture or normal that does not exist.
    #[error("line {line}: {kind} index {index} out of range")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
    },

    /// Well-formed input that does not describe valid geometry.
    #[error("line {line}: invalid geometry")]
    Geometry {
        line: usize,
        #[source]
        source: SplitError,
    },

    /// The job configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ObjError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for OBJ operations.
pub type ObjResult<T> = std::result::Result<T, ObjError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn error_display() {
        let err = ObjError::IndexOutOfRange {
            line: 7,
            kind: "normal",
            index: -3,
        };
        assert_eq!(err.to_string(), "line 7: normal index -3 out of range");
        assert_eq!(ObjError::parse(2, "bad").to_string(), "line 2: bad");
    }

    #[test]
    fn geometry_error_keeps_source() {
        let err = ObjError::Geometry {
            line: 4,
            source: SplitError::TooFewVertices(2),
        };
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("polygon needs at least 3 vertices, got 2".to_owned())
        );
    }
}
