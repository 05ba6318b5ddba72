// src/encryptor/mod.rs

//! High-level encryption facade.
//!
//! Core API: `new_encrypting_writer(sink, &params)` for streaming use,
//! `encrypt(input, output, &params)?` to encrypt a whole stream.

pub(crate) mod encrypt;

pub use encrypt::{encrypt, new_encrypting_writer};
