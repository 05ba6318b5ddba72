//! src/encryptor/encrypt.rs
//! Encrypting writer construction and whole-stream encryption

use std::io::{self, Read, Write};

use cipher::generic_array::GenericArray;
use cipher::InnerIvInit;
use tracing::debug;

use crate::aliases::{CbcEncryptor, EncryptingWriter};
use crate::crypto::selector::select_cipher;
use crate::error::KdbcryptError;
use crate::params::Params;
use crate::stream::CbcWriter;

/// Create a writer that encrypts into `sink`.
///
/// The key is resolved once: taken as-is when `params` carries a computed key,
/// derived otherwise. Finishing the writer writes the padded final block but
/// does not close `sink`.
pub fn new_encrypting_writer<W: Write>(sink: W, params: &Params) -> EncryptingWriter<W> {
    let key = params.key.resolve();
    let cipher = select_cipher(params.cipher, &key);
    let mode = CbcEncryptor::inner_iv_init(cipher, GenericArray::from_slice(&params.iv));
    CbcWriter::new(sink, mode)
}

/// Encrypt all of `input` into `output`.
///
/// # Errors
///
/// [`KdbcryptError::Io`] if reading `input` or writing `output` fails.
pub fn encrypt<R, W>(mut input: R, output: W, params: &Params) -> Result<(), KdbcryptError>
where
    R: Read,
    W: Write,
{
    let mut writer = new_encrypting_writer(output, params);
    let copied = io::copy(&mut input, &mut writer)?;
    writer.finish()?;

    debug!(bytes = copied, cipher = %params.cipher, "encrypted stream");
    Ok(())
}
