use std::path::{Path, PathBuf};

use thiserror::Error;

/// The primary error type for all operations in the `splitzip` crate.
#[derive(Debug, Error)]
pub enum SplitzipError {
    /// No fragment files matching the expected naming pattern were found.
    #[error("no .{extension} fragments found in '{dir}'")]
    NotFound { extension: String, dir: PathBuf },

    /// A configuration parameter was rejected before any I/O took place.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred, typically while reading or writing a file.
    /// Includes the path where the error happened.
    #[error("I/O error on path '{path}': {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// An error occurred when trying to strip a prefix from a file path.
    #[error("could not strip prefix '{prefix}' from path '{path}'")]
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// A fragment file did not hold valid base64 text.
    #[error("fragment '{path}' is not valid base64: {source}")]
    Decode {
        #[source]
        source: base64::DecodeError,
        path: PathBuf,
    },

    /// The container is not a valid ZIP archive, or an entry could not be
    /// written or expanded.
    #[error("container error: {0}")]
    Format(#[from] zip::result::ZipError),

    /// A container entry name would escape the extraction directory.
    #[error("entry '{name}' escapes the extraction directory")]
    UnsafeEntryName { name: String },
}

impl SplitzipError {
    /// Attaches the offending path to an `std::io::Error`.
    pub(crate) fn io_at(path: &Path) -> impl FnOnce(std::io::Error) -> SplitzipError + '_ {
        move |source| SplitzipError::Io {
            source,
            path: path.to_path_buf(),
        }
    }
}

// Generic IO error conversion that doesn't require a path
impl From<std::io::Error> for SplitzipError {
    fn from(err: std::io::Error) -> Self {
        SplitzipError::Io {
            source: err,
            path: PathBuf::new(),
        }
    }
}
