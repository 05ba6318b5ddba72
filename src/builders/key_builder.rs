//! src/builders/key_builder.rs
//! KeyMaterial builder: defaults for new databases, validation for caller-supplied parts

use std::fmt;
use std::io::Read;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::aliases::{KeyFileHash32, MasterSeed16, TransformSeed32};
use crate::consts::{DEFAULT_TRANSFORM_ROUNDS, MASTER_SEED_SIZE, TRANSFORM_SEED_SIZE};
use crate::error::KdbcryptError;
use crate::key::{key_file_hash_from_slice, KeyMaterial};
use crate::keyfile::read_key_file;

/// Builder for [`KeyMaterial`].
///
/// Starts with no secrets, zero seeds and [`DEFAULT_TRANSFORM_ROUNDS`]. Opening
/// an existing database sets the seeds from its header; creating a new one
/// should call [`with_random_seeds`](Self::with_random_seeds).
#[derive(Clone)]
pub struct KeyMaterialBuilder {
    password: Zeroizing<Vec<u8>>,
    key_file_hash: Option<Zeroizing<KeyFileHash32>>,
    master_seed: MasterSeed16,
    transform_seed: TransformSeed32,
    transform_rounds: u32,
}

impl KeyMaterialBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            password: Zeroizing::new(Vec::new()),
            key_file_hash: None,
            master_seed: [0u8; MASTER_SEED_SIZE],
            transform_seed: [0u8; TRANSFORM_SEED_SIZE],
            transform_rounds: DEFAULT_TRANSFORM_ROUNDS,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl AsRef<[u8]>) -> Self {
        self.password = Zeroizing::new(password.as_ref().to_vec());
        self
    }

    /// Set an already-normalized key-file hash.
    #[must_use]
    pub fn with_key_file_hash(mut self, hash: KeyFileHash32) -> Self {
        self.key_file_hash = Some(Zeroizing::new(hash));
        self
    }

    /// Set a key-file hash from raw bytes; empty means "no key file".
    ///
    /// # Errors
    ///
    /// [`KdbcryptError::InvalidKeyFileHash`] unless `bytes` is empty or 32 bytes long.
    pub fn with_key_file_hash_slice(mut self, bytes: &[u8]) -> Result<Self, KdbcryptError> {
        self.key_file_hash = key_file_hash_from_slice(bytes)?.map(Zeroizing::new);
        Ok(self)
    }

    /// Read and normalize a key file.
    ///
    /// # Errors
    ///
    /// [`KdbcryptError::Io`] if reading `source` fails.
    pub fn with_key_file<R: Read>(self, source: R) -> Result<Self, KdbcryptError> {
        let hash = read_key_file(source)?;
        Ok(self.with_key_file_hash(hash))
    }

    #[must_use]
    pub fn with_master_seed(mut self, seed: MasterSeed16) -> Self {
        self.master_seed = seed;
        self
    }

    #[must_use]
    pub fn with_transform_seed(mut self, seed: TransformSeed32) -> Self {
        self.transform_seed = seed;
        self
    }

    /// Set the stretching round count. Zero is allowed and skips stretching.
    #[must_use]
    pub fn with_transform_rounds(mut self, rounds: u32) -> Self {
        self.transform_rounds = rounds;
        self
    }

    /// Fill both seeds from the operating system RNG.
    #[must_use]
    pub fn with_random_seeds(mut self) -> Self {
        OsRng.fill_bytes(&mut self.master_seed);
        OsRng.fill_bytes(&mut self.transform_seed);
        self
    }

    #[must_use]
    pub const fn transform_rounds(&self) -> u32 {
        self.transform_rounds
    }

    #[must_use]
    pub fn build(self) -> KeyMaterial {
        KeyMaterial::new(
            self.password.as_slice(),
            self.key_file_hash.as_deref().copied(),
            self.master_seed,
            self.transform_seed,
            self.transform_rounds,
        )
    }
}

impl fmt::Debug for KeyMaterialBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterialBuilder")
            .field("has_password", &!self.password.is_empty())
            .field("has_key_file", &self.key_file_hash.is_some())
            .field("transform_rounds", &self.transform_rounds)
            .finish_non_exhaustive()
    }
}

impl Default for KeyMaterialBuilder {
    fn default() -> Self {
        Self::new()
    }
}
