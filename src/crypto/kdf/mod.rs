//! # Key Derivation
//!
//! Turns [`KeyMaterial`] into the [`ComputedKey`] handed to the cipher:
//!
//! 1. [`base_hash`] folds the password and key-file hash into 32 bytes.
//! 2. [`transform`] stretches both 16-byte halves through `transform_rounds`
//!    Magma encryptions of their leading 8 bytes, in parallel.
//! 3. The stretched value is hashed with SHA-256, then Streebog-256 over
//!    `master_seed ‖ sha256(stretched)` gives the final key.

pub mod transform;

use std::time::Instant;

use sha2::Digest;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::{DomainHash, GeneralHash, Hash32};
use crate::key::{ComputedKey, KeyMaterial};

pub use transform::{transform_key, transform_key_block, transform_key_sequential};

/// Derive the cipher key from `key`.
///
/// Deterministic and infallible; the only cost knob is `transform_rounds`.
pub fn derive_key(key: &KeyMaterial) -> ComputedKey {
    let started = Instant::now();

    let base = Zeroizing::new(base_hash(key));
    let stretched = Zeroizing::new(transform_key(
        &base,
        key.transform_seed(),
        key.transform_rounds(),
    ));
    let tk: Zeroizing<Hash32> = Zeroizing::new(GeneralHash::digest(&stretched[..]).into());

    let mut sum = DomainHash::new();
    sum.update(key.master_seed());
    sum.update(&tk[..]);
    let computed = ComputedKey::new(sum.finalize().into());

    debug!(
        rounds = key.transform_rounds(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "derived cipher key"
    );
    computed
}

/// The key's hash prior to the stretching rounds.
///
/// - no key-file hash: `sha256(password)`, password possibly empty
/// - key-file hash only: the key-file hash itself
/// - both: `streebog256(sha256(password) ‖ key_file_hash)`
pub fn base_hash(key: &KeyMaterial) -> Hash32 {
    let Some(key_file_hash) = key.key_file_hash() else {
        return GeneralHash::digest(&key.password).into();
    };
    let Some(password) = key.password() else {
        return *key_file_hash;
    };

    let password_hash: Zeroizing<Hash32> = Zeroizing::new(GeneralHash::digest(password).into());
    let mut h = DomainHash::new();
    h.update(&password_hash[..]);
    h.update(key_file_hash);
    h.finalize().into()
}
