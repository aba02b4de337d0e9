//! The error surface shared by every operation of the core.
//!
//! Errors are ordinary values returned next to the absent result; there is no
//! panicking channel and the core never recovers internally. Each operation in
//! [`fs`](../fs/index.html) documents which of the kinds below it can produce.
//! A host bridge translates the kinds into POSIX error codes with
//! [`FsError::errno`]; the mapping is one-to-one on purpose, so the bridge
//! does not have to inspect payloads.
//!
//! The `&'static str` payloads carry a short context message for logs and
//! assertions. Use `String` instead if you ever need runtime-formatted
//! messages; for this crate the call sites are all known at compile time.
//!
//! [`FsError::errno`]: enum.FsError.html#method.errno

use thiserror::Error;

/// Error type used by all core operations.
///
/// The `#[error]` tag takes care of the `Display` implementation; the
/// `#[from]` tag on `Other` generates a `From<anyhow::Error>` conversion so
/// the `?` operator can funnel foreign errors into the surface.
#[derive(Error, Debug)]
pub enum FsError {
    /// A path component or directory entry name did not match anything
    #[error("no such entry: {0}")]
    NoEntry(&'static str),
    /// A non-directory inode was used where a directory is required
    #[error("not a directory: {0}")]
    NotDir(&'static str),
    /// The directory still contains entries other than `.` and `..`
    #[error("directory not empty: {0}")]
    NotEmpty(&'static str),
    /// The name to be created is already bound in the target directory
    #[error("entry already exists: {0}")]
    Exists(&'static str),
    /// An allocation failed; the graph is unchanged
    #[error("out of space: {0}")]
    NoSpace(&'static str),
    /// The argument violates the operation's contract
    #[error("invalid argument: {0}")]
    InvalidInput(&'static str),

    ///Catch-all for errors that originate outside the core.
    ///Kept deliberately rare: matching on it tells a caller nothing, and the
    ///errno mapping can only guess. The [`anyhow`](https://docs.rs/anyhow/1.0.33/anyhow/)
    ///package lets any error implementing the `Error` trait be cast into this
    ///variant via the `?` operator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FsError {
    /// The POSIX error code a host bridge should hand to its caller.
    pub fn errno(&self) -> libc::c_int {
        match self {
            FsError::NoEntry(_) => libc::ENOENT,
            FsError::NotDir(_) => libc::ENOTDIR,
            FsError::NotEmpty(_) => libc::ENOTEMPTY,
            FsError::Exists(_) => libc::EEXIST,
            FsError::NoSpace(_) => libc::ENOSPC,
            FsError::InvalidInput(_) => libc::EINVAL,
            FsError::Other(_) => libc::EIO,
        }
    }
}

/// Generic alias for a `Result` with the error type `FsError`.
pub type Result<T> = std::result::Result<T, FsError>;
