//! src/decryptor/decrypt.rs
//! Decrypting reader construction and whole-stream decryption

use std::io::{Read, Write};

use cipher::generic_array::GenericArray;
use cipher::InnerIvInit;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::{CbcDecryptor, DecryptingReader};
use crate::crypto::selector::select_cipher;
use crate::error::KdbcryptError;
use crate::params::Params;
use crate::stream::CbcReader;

/// Create a reader that decrypts `source` and strips the padding.
///
/// The key is resolved once, as in [`new_encrypting_writer`](crate::new_encrypting_writer).
pub fn new_decrypting_reader<R: Read>(source: R, params: &Params) -> DecryptingReader<R> {
    let key = params.key.resolve();
    let cipher = select_cipher(params.cipher, &key);
    let mode = CbcDecryptor::inner_iv_init(cipher, GenericArray::from_slice(&params.iv));
    CbcReader::new(source, mode)
}

/// Decrypt all of `input` into `output`.
///
/// The plaintext is collected in a zeroizing buffer and written only once the
/// whole stream has decrypted and its padding checked, so a failure leaves
/// `output` untouched.
///
/// # Errors
///
/// - [`KdbcryptError::MisalignedCiphertext`] if `input` is not a whole number of blocks
/// - [`KdbcryptError::InvalidPadding`] if the final block does not unpad
/// - [`KdbcryptError::Io`] on read or write failure
pub fn decrypt<R, W>(input: R, mut output: W, params: &Params) -> Result<(), KdbcryptError>
where
    R: Read,
    W: Write,
{
    let mut reader = new_decrypting_reader(input, params);
    let mut plaintext = Zeroizing::new(Vec::<u8>::new());
    reader.read_to_end(&mut plaintext)?;

    output.write_all(&plaintext)?;
    output.flush()?;

    debug!(bytes = plaintext.len(), cipher = %params.cipher, "decrypted stream");
    Ok(())
}
