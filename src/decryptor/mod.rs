// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `new_decrypting_reader(source, &params)` for streaming use,
//! `decrypt(input, output, &params)?` to decrypt a whole stream.

pub(crate) mod decrypt;

pub use decrypt::{decrypt, new_decrypting_reader};
