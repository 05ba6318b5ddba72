//! src/batch_ops.rs
//! Parallel encryption/decryption of many streams under one set of params

use rayon::prelude::*;
use std::io::{Read, Write};

use crate::params::Params;
use crate::{decrypt, encrypt, KdbcryptError};

/// Encrypt every `(source, destination)` pair in parallel.
///
/// The key is derived once up front, not once per stream. Stops at the first
/// error; pairs already processed keep their output.
pub fn encrypt_batch<R, W>(batch: &mut [(R, W)], params: &Params) -> Result<(), KdbcryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    let params = params.clone().precompute();
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt(src, dst, &params))
}

/// Decrypt every `(source, destination)` pair in parallel.
pub fn decrypt_batch<R, W>(batch: &mut [(R, W)], params: &Params) -> Result<(), KdbcryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    let params = params.clone().precompute();
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| decrypt(src, dst, &params))
}
