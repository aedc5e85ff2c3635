use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot read input `{}`: {source}", .path.display())]
    InputNotFound { path: PathBuf, source: io::Error },
    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("cannot write output `{}`: {source}", .path.display())]
    OutputWriteFailure { path: PathBuf, source: io::Error },
    #[error("invalid graph document: {0}")]
    InvalidDocument(String),
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
