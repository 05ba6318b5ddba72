//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All fallible operations return [`Result<T, KdbcryptError>`](KdbcryptError).

use std::io;
use thiserror::Error;

/// The error type for all key-derivation and stream encryption operations.
#[derive(Error, Debug)]
pub enum KdbcryptError {
    /// I/O error from the underlying stream or key file.
    ///
    /// Propagated verbatim; nothing in this crate retries I/O.
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// The container's cipher flags name no cipher this crate recognizes.
    ///
    /// The contained value is the raw flag word.
    #[error("unsupported cipher flags: {0:#x}")]
    UnsupportedCipher(u32),

    /// A cipher name that does not map to any [`CipherId`](crate::CipherId).
    #[error("unknown cipher name: {0:?}")]
    UnknownCipherName(String),

    /// Ciphertext length is not a multiple of the 16-byte block size.
    #[error("data size not a multiple of 16")]
    MisalignedCiphertext,

    /// The decrypted final block carries inconsistent padding.
    ///
    /// Almost always means the wrong key, IV or cipher was used.
    #[error("invalid block padding")]
    InvalidPadding,

    /// A key-file hash was supplied with a length other than 32 bytes.
    #[error("key-file hash must be 32 bytes, got {0}")]
    InvalidKeyFileHash(usize),

    /// A precomputed key was supplied with a length other than 32 bytes.
    #[error("computed key must be 32 bytes, got {0}")]
    InvalidComputedKey(usize),
}

impl KdbcryptError {
    /// Wraps this error in an [`io::Error`] so it can cross a `Read`/`Write` boundary.
    pub(crate) fn into_io(self) -> io::Error {
        match self {
            KdbcryptError::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Unwraps errors that were raised by this crate inside a `Read`/`Write` impl,
/// so callers always see the typed variant rather than an opaque `io::Error`.
impl From<io::Error> for KdbcryptError {
    fn from(err: io::Error) -> Self {
        match err.downcast::<KdbcryptError>() {
            Ok(inner) => inner,
            Err(err) => KdbcryptError::Io(err),
        }
    }
}
