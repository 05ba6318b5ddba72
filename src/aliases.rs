//! # Type Aliases
//!
//! Names for the concrete primitives and fixed-size buffers used across the crate.
//!
//! ## Primitives
//! - [`GeneralHash`] - SHA-256, hashes the password and the stretched key
//! - [`DomainHash`] - Streebog-256 (GOST R 34.11-2012), combines seeds and key-file material
//! - [`BlockCipherInstance`] - Kuznyechik (GOST R 34.12-2015), 16-byte blocks, 32-byte keys
//! - [`StretchCipher`] - Magma (GOST R 34.12-2015), 8-byte blocks, keyed by the transform seed
//!
//! ## Fixed-size buffers
//! - [`Block16`], [`Iv16`], [`MasterSeed16`], [`TransformSeed32`], [`KeyFileHash32`], [`Hash32`]

use crate::consts::{
    BLOCK_SIZE, COMPUTED_KEY_SIZE, IV_SIZE, KEY_FILE_HASH_SIZE, MASTER_SEED_SIZE,
    TRANSFORM_SEED_SIZE,
};
use cipher::block_padding::Pkcs7;
use kuznyechik::Kuznyechik;
use magma::Magma;
use sha2::Sha256;
use streebog::Streebog256;

use crate::stream::{CbcReader, CbcWriter};

// ─────────────────────────────────────────────────────────────────────────────
// Primitives
// ─────────────────────────────────────────────────────────────────────────────
pub type GeneralHash = Sha256;
pub type DomainHash = Streebog256;
pub type BlockCipherInstance = Kuznyechik;
pub type StretchCipher = Magma;

pub type CbcEncryptor = cbc::Encryptor<BlockCipherInstance>;
pub type CbcDecryptor = cbc::Decryptor<BlockCipherInstance>;

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size buffers
// ─────────────────────────────────────────────────────────────────────────────
pub type Block16 = [u8; BLOCK_SIZE];
pub type Iv16 = [u8; IV_SIZE];
pub type MasterSeed16 = [u8; MASTER_SEED_SIZE];
pub type TransformSeed32 = [u8; TRANSFORM_SEED_SIZE];
pub type KeyFileHash32 = [u8; KEY_FILE_HASH_SIZE];
pub type Hash32 = [u8; COMPUTED_KEY_SIZE];

// ─────────────────────────────────────────────────────────────────────────────
// Stream adapters as returned by the high-level API
// ─────────────────────────────────────────────────────────────────────────────
pub type EncryptingWriter<W> = CbcWriter<W, CbcEncryptor, Pkcs7>;
pub type DecryptingReader<R> = CbcReader<R, CbcDecryptor, Pkcs7>;
