use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing a profiling report.
///
/// These never originate from the sampling path. Recording samples cannot fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The report destination could not be created, or the finished report could not
    /// replace the existing file.
    #[error("failed to open profiling report destination '{}'", .path.display())]
    OpenDestination {
        /// The destination the report was meant for.
        path: PathBuf,

        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Rendering the report into the new destination file failed.
    #[error("failed to write profiling report to '{}'", .path.display())]
    WriteDestination {
        /// The destination the report was meant for.
        path: PathBuf,

        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for report operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
