// src/crypto/mod.rs

//! Low-level crypto: key derivation and cipher selection.
//!
//! See crate root for re-exports (e.g., `derive_key`, `select_cipher`).

pub mod kdf;
pub mod selector;
