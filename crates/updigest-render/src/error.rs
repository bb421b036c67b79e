use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chrome or Edge not found (searched PATH and standard install locations)")]
    BrowserNotFound,

    #[error("configured browser does not exist: {}", .0.display())]
    BrowserOverrideMissing(PathBuf),

    #[error("cannot express {} as a file URL", .0.display())]
    InvalidPath(PathBuf),

    #[error("browser exited with {status} while printing PDF: {stderr}")]
    BrowserFailed { status: String, stderr: String },
}
