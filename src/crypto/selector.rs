//! src/crypto/selector.rs
//! Cipher identifiers and construction of the keyed block cipher

use std::fmt;
use std::str::FromStr;

use cipher::generic_array::GenericArray;
use cipher::KeyInit;
use tracing::trace;

use crate::aliases::BlockCipherInstance;
use crate::consts::{FLAG_RIJNDAEL, FLAG_TWOFISH};
use crate::error::KdbcryptError;
use crate::key::ComputedKey;

/// Cipher named by a database header.
///
/// Both identifiers currently construct the same Kuznyechik cipher; the
/// identifier is carried so the container layer can round-trip its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherId {
    #[default]
    Rijndael,
    Twofish,
}

impl CipherId {
    /// Map KeePass 1.x header flags to a cipher. Rijndael wins if both bits are set.
    pub fn from_flags(flags: u32) -> Result<Self, KdbcryptError> {
        if flags & FLAG_RIJNDAEL != 0 {
            Ok(CipherId::Rijndael)
        } else if flags & FLAG_TWOFISH != 0 {
            Ok(CipherId::Twofish)
        } else {
            Err(KdbcryptError::UnsupportedCipher(flags))
        }
    }

    /// The header flag bit for this cipher.
    #[must_use]
    pub const fn flag(self) -> u32 {
        match self {
            CipherId::Rijndael => FLAG_RIJNDAEL,
            CipherId::Twofish => FLAG_TWOFISH,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CipherId::Rijndael => "rijndael",
            CipherId::Twofish => "twofish",
        }
    }
}

impl fmt::Display for CipherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherId {
    type Err = KdbcryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rijndael" | "aes" => Ok(CipherId::Rijndael),
            "twofish" => Ok(CipherId::Twofish),
            _ => Err(KdbcryptError::UnknownCipherName(s.to_owned())),
        }
    }
}

/// Construct the block cipher for `id`, keyed by `key`.
pub fn select_cipher(id: CipherId, key: &ComputedKey) -> BlockCipherInstance {
    trace!(cipher = %id, "selecting block cipher");
    match id {
        CipherId::Rijndael | CipherId::Twofish => {
            BlockCipherInstance::new(GenericArray::from_slice(key.as_bytes()))
        }
    }
}
