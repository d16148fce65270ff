//! Asset error types
//!
//! Errors raised while reading external model files.

use std::io;
use std::fmt;
use std::path::PathBuf;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// IO error while reading the file
    Io(io::Error),
    /// Parse error with the offending line number
    Parse { line: usize, message: String },
    /// The file contained no usable geometry
    Empty(PathBuf),
    /// The file does not exist
    NotFound(PathBuf),
}

impl AssetError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        AssetError::Parse { line, message: message.into() }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Parse { line, message } => {
                write!(f, "Asset parse error at line {}: {}", line, message)
            }
            AssetError::Empty(path) => write!(f, "Asset has no geometry: {}", path.display()),
            AssetError::NotFound(path) => write!(f, "Asset not found: {}", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}
