//! src/key.rs
//! Key material, derived keys, and the sum type choosing between them

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::aliases::{Hash32, KeyFileHash32, MasterSeed16, TransformSeed32};
use crate::builders::KeyMaterialBuilder;
use crate::error::KdbcryptError;

/// The user- and format-supplied inputs to key derivation.
///
/// An empty password counts as "no password". Neither secret is required;
/// with both absent the derivation starts from the SHA-256 of the empty string.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    pub(crate) password: Vec<u8>,
    pub(crate) key_file_hash: Option<KeyFileHash32>,
    pub(crate) master_seed: MasterSeed16,
    pub(crate) transform_seed: TransformSeed32,
    pub(crate) transform_rounds: u32,
}

impl KeyMaterial {
    /// Build key material from already-validated parts.
    #[must_use]
    pub fn new(
        password: impl Into<Vec<u8>>,
        key_file_hash: Option<KeyFileHash32>,
        master_seed: MasterSeed16,
        transform_seed: TransformSeed32,
        transform_rounds: u32,
    ) -> Self {
        Self {
            password: password.into(),
            key_file_hash,
            master_seed,
            transform_seed,
            transform_rounds,
        }
    }

    /// Fluent builder with default rounds and zero seeds.
    #[must_use]
    pub fn builder() -> KeyMaterialBuilder {
        KeyMaterialBuilder::new()
    }

    /// The password bytes, `None` when empty.
    #[must_use]
    pub fn password(&self) -> Option<&[u8]> {
        (!self.password.is_empty()).then_some(self.password.as_slice())
    }

    #[must_use]
    pub fn key_file_hash(&self) -> Option<&KeyFileHash32> {
        self.key_file_hash.as_ref()
    }

    #[must_use]
    pub const fn master_seed(&self) -> &MasterSeed16 {
        &self.master_seed
    }

    #[must_use]
    pub const fn transform_seed(&self) -> &TransformSeed32 {
        &self.transform_seed
    }

    #[must_use]
    pub const fn transform_rounds(&self) -> u32 {
        self.transform_rounds
    }

    /// Derive the cipher key. Cost grows linearly with the round count.
    #[must_use]
    pub fn compute(&self) -> ComputedKey {
        crate::crypto::kdf::derive_key(self)
    }
}

/// Checks a caller-supplied key-file hash against the 32-byte contract.
///
/// An empty slice means "no key file".
pub(crate) fn key_file_hash_from_slice(
    bytes: &[u8],
) -> Result<Option<KeyFileHash32>, KdbcryptError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let hash: KeyFileHash32 = bytes
        .try_into()
        .map_err(|_| KdbcryptError::InvalidKeyFileHash(bytes.len()))?;
    Ok(Some(hash))
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("password", &self.password().map(|_| "<redacted>"))
            .field("key_file_hash", &self.key_file_hash.map(|_| "<redacted>"))
            .field("master_seed", &hex::encode(self.master_seed))
            .field("transform_seed", &hex::encode(self.transform_seed))
            .field("transform_rounds", &self.transform_rounds)
            .finish()
    }
}

/// The key passed directly to the cipher.
///
/// Computing one costs the full stretching rounds; keep it around to encrypt and decrypt the
/// same database repeatedly, and drop it when done.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ComputedKey(Hash32);

impl ComputedKey {
    #[must_use]
    pub const fn new(bytes: Hash32) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &Hash32 {
        &self.0
    }
}

impl From<Hash32> for ComputedKey {
    fn from(bytes: Hash32) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for ComputedKey {
    type Error = KdbcryptError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: Hash32 = bytes
            .try_into()
            .map_err(|_| KdbcryptError::InvalidComputedKey(bytes.len()))?;
        Ok(Self(key))
    }
}

impl fmt::Debug for ComputedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComputedKey(<redacted>)")
    }
}

/// Where the cipher key comes from: raw inputs to derive, or a key derived earlier.
#[derive(Clone, Debug)]
pub enum KeySource {
    Material(KeyMaterial),
    Computed(ComputedKey),
}

impl KeySource {
    /// Resolve to a cipher key, deriving it when needed.
    #[must_use]
    pub fn resolve(&self) -> ComputedKey {
        match self {
            KeySource::Material(material) => material.compute(),
            KeySource::Computed(key) => key.clone(),
        }
    }
}

impl From<KeyMaterial> for KeySource {
    fn from(material: KeyMaterial) -> Self {
        KeySource::Material(material)
    }
}

impl From<ComputedKey> for KeySource {
    fn from(key: ComputedKey) -> Self {
        KeySource::Computed(key)
    }
}
