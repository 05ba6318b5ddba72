//! # Key Files
//!
//! Normalizes a key file into the 32-byte hash used as key material.
//!
//! | Size              | Interpretation                              |
//! |-------------------|---------------------------------------------|
//! | exactly 32 bytes  | the hash itself                             |
//! | exactly 64 bytes  | hex-encoded hash, if it decodes             |
//! | anything else     | Streebog-256 of the whole file              |

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::Digest;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::{DomainHash, KeyFileHash32};
use crate::consts::{KEY_FILE_HASH_SIZE, KEY_FILE_HEX_SIZE, KEY_FILE_PROBE_SIZE};
use crate::error::KdbcryptError;

/// Read a key file and return its hash for use in [`KeyMaterial`](crate::KeyMaterial).
///
/// At most [`KEY_FILE_PROBE_SIZE`] bytes are read up front to pick the format;
/// the rest of the stream is only consumed when the file has to be hashed.
/// A 64-byte file that is not valid hex is hashed like any other content.
///
/// # Errors
///
/// [`KdbcryptError::Io`] if reading `source` fails.
pub fn read_key_file<R: Read>(mut source: R) -> Result<KeyFileHash32, KdbcryptError> {
    let mut probe = Zeroizing::new(Vec::<u8>::with_capacity(KEY_FILE_PROBE_SIZE));
    source
        .by_ref()
        .take(KEY_FILE_PROBE_SIZE as u64)
        .read_to_end(&mut probe)?;

    match probe.len() {
        KEY_FILE_HASH_SIZE => {
            debug!("key file is a raw 32-byte hash");
            let mut hash = [0u8; KEY_FILE_HASH_SIZE];
            hash.copy_from_slice(&probe);
            return Ok(hash);
        }
        KEY_FILE_HEX_SIZE => {
            let mut hash = [0u8; KEY_FILE_HASH_SIZE];
            if hex::decode_to_slice(&probe[..], &mut hash).is_ok() {
                debug!("key file is a hex-encoded hash");
                return Ok(hash);
            }
        }
        _ => {}
    }

    let mut hasher = DomainHash::new();
    hasher.update(&probe[..]);
    let rest = io::copy(&mut source, &mut hasher)?;

    debug!(
        bytes = probe.len() as u64 + rest,
        "key file hashed as arbitrary content"
    );
    Ok(hasher.finalize().into())
}

/// Open `path` and run [`read_key_file`] on it.
///
/// # Errors
///
/// [`KdbcryptError::Io`] if the file cannot be opened or read.
pub fn read_key_file_path(path: impl AsRef<Path>) -> Result<KeyFileHash32, KdbcryptError> {
    let file = File::open(path.as_ref())?;
    read_key_file(io::BufReader::new(file))
}
