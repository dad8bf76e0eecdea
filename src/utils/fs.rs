//! Whole-file text I/O with path-carrying errors.
//!
//! Every read and write in the pipeline goes through here so a failure
//! always names the file that caused it.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// File I/O errors
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to open or read: {}", .0.display())]
    Unreadable(PathBuf, #[source] io::Error),

    #[error("unable to write: {}", .0.display())]
    Unwritable(PathBuf, #[source] io::Error),
}

impl FileError {
    /// Stage name reported in the terminal error line.
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Unreadable(..) => "read_file",
            Self::Unwritable(..) => "write_file",
        }
    }
}

/// Read a whole file as UTF-8 text.
///
/// Invalid UTF-8 is reported as [`FileError::Unreadable`], like a permission error.
pub fn read_file(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => FileError::Unreadable(path.to_path_buf(), err),
    })
}

/// Create or truncate `path` and write `text` to it.
///
/// Not atomic: a failed write may leave a truncated file behind.
pub fn write_file(path: &Path, text: &str) -> Result<(), FileError> {
    fs::write(path, text).map_err(|err| FileError::Unwritable(path.to_path_buf(), err))
}
