use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the facade. None of them are retried internally.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("local file not found: {}", .0.display())]
    LocalFileNotFound(PathBuf),

    #[error("access denied: {bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ObjectError {
    /// Short tag used as the `error_group` field in logs.
    pub fn group(&self) -> &'static str {
        match self {
            ObjectError::InvalidArgument(_) => "invalid_argument",
            ObjectError::ObjectNotFound { .. } => "object_not_found",
            ObjectError::BucketNotFound(_) => "bucket_not_found",
            ObjectError::LocalFileNotFound(_) => "local_file_not_found",
            ObjectError::AccessDenied { .. } => "access_denied",
            ObjectError::Transfer(_) => "transfer",
            ObjectError::Config(_) => "config",
        }
    }
}

impl From<std::io::Error> for ObjectError {
    fn from(err: std::io::Error) -> Self {
        ObjectError::Transfer(err.to_string())
    }
}
