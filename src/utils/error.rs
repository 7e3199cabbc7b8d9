//! Error types for the batch runner.
//!
//! Every failure is scoped to a single task. The batch as a whole only
//! surfaces one of these as its representative error.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use serde::Serialize;

/// Failure reason for one task.
///
/// `Clone` because the same reason travels to the notification sink, the
/// batch report and, for the first failure, back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum TaskError {
    /// Source file could not be read
    #[error("Cannot read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Decoding, resizing or encoding failed
    #[error("Transform error: {0}")]
    Transform(String),

    /// Output file could not be written
    #[error("Cannot write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Requested output format is missing or not recognized
    #[error("Unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    /// The executor panicked while processing the task
    #[error("Transform panicked: {0}")]
    Panicked(String),

    /// Outcomes were lost between the workers and the aggregator
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

/// Convenience result type for task operations.
pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    pub fn read(path: impl AsRef<Path>, err: io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn write(path: impl AsRef<Path>, err: io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            reason: err.to_string(),
        }
    }

    pub fn transform<T: Into<String>>(msg: T) -> Self {
        Self::Transform(msg.into())
    }

    pub fn unsupported_format<T: Into<String>>(format: T) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    pub fn dispatch<T: Into<String>>(msg: T) -> Self {
        Self::Dispatch(msg.into())
    }
}

impl From<image::ImageError> for TaskError {
    fn from(err: image::ImageError) -> Self {
        Self::Transform(err.to_string())
    }
}
