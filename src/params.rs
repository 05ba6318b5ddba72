//! src/params.rs
//! Per-call encryption parameters

use rand::rngs::OsRng;
use rand::RngCore;

use crate::aliases::Iv16;
use crate::consts::IV_SIZE;
use crate::crypto::selector::CipherId;
use crate::key::{ComputedKey, KeyMaterial, KeySource};

/// Everything needed to open an encrypting writer or decrypting reader.
#[derive(Debug, Clone)]
pub struct Params {
    pub key: KeySource,
    pub cipher: CipherId,
    pub iv: Iv16,
}

impl Params {
    #[must_use]
    pub fn new(key: impl Into<KeySource>, cipher: CipherId, iv: Iv16) -> Self {
        Self {
            key: key.into(),
            cipher,
            iv,
        }
    }

    /// Params that derive the key from `material` when used.
    #[must_use]
    pub fn from_material(material: KeyMaterial, cipher: CipherId, iv: Iv16) -> Self {
        Self::new(KeySource::Material(material), cipher, iv)
    }

    /// Params that skip derivation and use `key` directly.
    #[must_use]
    pub fn from_computed(key: ComputedKey, cipher: CipherId, iv: Iv16) -> Self {
        Self::new(KeySource::Computed(key), cipher, iv)
    }

    /// Replace the key source with its derived key, so later calls skip the
    /// stretching rounds.
    #[must_use]
    pub fn precompute(self) -> Self {
        let key = self.key.resolve();
        Self {
            key: KeySource::Computed(key),
            ..self
        }
    }

    /// A fresh IV from the operating system RNG.
    #[must_use]
    pub fn random_iv() -> Iv16 {
        let mut iv = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut iv);
        iv
    }
}
