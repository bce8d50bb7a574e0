use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `-h` / `--help` was passed.
    #[error("help requested")]
    Help,

    #[error("missing value after {0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for {flag}: {reason}")]
    InvalidArgument {
        flag: String,
        value: String,
        reason: &'static str,
    },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}
