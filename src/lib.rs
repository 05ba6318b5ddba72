// src/lib.rs

//! Key derivation and stream encryption for KeePass 1.x style databases,
//! GOST flavour: SHA-256 and Streebog-256 for hashing, Kuznyechik in CBC mode
//! with PKCS#7 padding for the payload.

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod key;
pub mod keyfile;
pub mod params;
pub mod stream;

// High-level API
pub use decryptor::{decrypt, new_decrypting_reader};
pub use encryptor::{encrypt, new_encrypting_writer};
pub use error::KdbcryptError;
pub use key::{ComputedKey, KeyMaterial, KeySource};
pub use params::Params;

pub use builders::KeyMaterialBuilder;
pub use crypto::kdf::{base_hash, derive_key};
pub use crypto::selector::{select_cipher, CipherId};
pub use keyfile::{read_key_file, read_key_file_path};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
