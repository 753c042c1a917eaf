//! Custom error types for releasify.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Location of the list of descriptor elements a release needs.
pub const REQUIRED_FIELDS_DOC: &str =
    "see the list of required elements in the README";

/// Main error type for releasify operations.
#[derive(Error, Debug)]
pub enum ReleaseError {
    // Local path errors
    #[error("{what} not found: '{}'", path.display())]
    NotFound { what: String, path: PathBuf },

    // Descriptor errors
    #[error(
        "one of the elements required for release preparation doesn't exist ({}): {}",
        missing.join(", "),
        REQUIRED_FIELDS_DOC
    )]
    MissingField { missing: Vec<String> },

    // Packaging tool errors
    #[error("packaging tool failed: {0}")]
    ToolExecutionFailed(String),

    // Hosting service errors
    #[error("release upload failed: {0}")]
    UploadFailed(String),

    #[error("{0} is not supported yet")]
    NotSupported(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    // Parsing errors
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using ReleaseError
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a not found error for a local path
    pub fn not_found(what: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            what: what.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an upload error with context
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

// Every failure talking to the hosting service is an upload failure, whether
// it came from octocrab or from a raw reqwest call.
impl From<octocrab::Error> for ReleaseError {
    fn from(err: octocrab::Error) -> Self {
        Self::UploadFailed(format!("GitHub API error: {}", err))
    }
}

impl From<reqwest::Error> for ReleaseError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status()
            && (status.as_u16() == 401 || status.as_u16() == 403)
        {
            return Self::UploadFailed(format!(
                "authentication rejected: {}",
                err
            ));
        }

        Self::UploadFailed(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ReleaseError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::UploadFailed(format!("Invalid header value: {}", err))
    }
}

impl From<url::ParseError> for ReleaseError {
    fn from(err: url::ParseError) -> Self {
        Self::UploadFailed(format!("URL parse error: {}", err))
    }
}
