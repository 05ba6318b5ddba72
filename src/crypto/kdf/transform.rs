//! src/crypto/kdf/transform.rs
//! Key stretching: repeated Magma encryption of the leading 8 bytes of each 16-byte half

use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use zeroize::Zeroize;

use crate::aliases::{Block16, Hash32, StretchCipher, TransformSeed32};
use crate::consts::{BLOCK_SIZE, STRETCH_BLOCK_SIZE};

/// Encrypt the first 8 bytes of `half` with Magma keyed by `seed`, `rounds`
/// times, feeding each output back in as the next input.
///
/// Magma has a 64-bit block, so bytes `8..16` of the half are returned unchanged.
#[inline]
pub fn transform_key_block(half: &Block16, seed: &TransformSeed32, rounds: u32) -> Block16 {
    let cipher = StretchCipher::new(GenericArray::from_slice(seed));
    let mut block = GenericArray::clone_from_slice(&half[..STRETCH_BLOCK_SIZE]);

    for _ in 0..rounds {
        cipher.encrypt_block(&mut block);
    }

    let mut out = *half;
    out[..STRETCH_BLOCK_SIZE].copy_from_slice(&block);
    block.as_mut_slice().zeroize();
    out
}

/// Stretch both halves of `base` concurrently and join the results.
///
/// The halves share nothing, so this is bit-identical to
/// [`transform_key_sequential`].
pub fn transform_key(base: &Hash32, seed: &TransformSeed32, rounds: u32) -> Hash32 {
    let (lo, hi) = split_halves(base);
    let (lo, hi) = rayon::join(
        || transform_key_block(&lo, seed, rounds),
        || transform_key_block(&hi, seed, rounds),
    );
    join_halves(&lo, &hi)
}

/// Single-threaded reference for [`transform_key`].
pub fn transform_key_sequential(base: &Hash32, seed: &TransformSeed32, rounds: u32) -> Hash32 {
    let (lo, hi) = split_halves(base);
    let lo = transform_key_block(&lo, seed, rounds);
    let hi = transform_key_block(&hi, seed, rounds);
    join_halves(&lo, &hi)
}

fn split_halves(base: &Hash32) -> (Block16, Block16) {
    let mut lo = [0u8; BLOCK_SIZE];
    let mut hi = [0u8; BLOCK_SIZE];
    lo.copy_from_slice(&base[..BLOCK_SIZE]);
    hi.copy_from_slice(&base[BLOCK_SIZE..]);
    (lo, hi)
}

fn join_halves(lo: &Block16, hi: &Block16) -> Hash32 {
    let mut out = [0u8; 2 * BLOCK_SIZE];
    out[..BLOCK_SIZE].copy_from_slice(lo);
    out[BLOCK_SIZE..].copy_from_slice(hi);
    out
}
