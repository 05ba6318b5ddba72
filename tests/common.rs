//! tests/common.rs
//! Common constants and helpers shared across test files

use kdbcrypt_rs::{CipherId, KeyMaterial, Params};

/// Fast round count for tests - performance testing is in benches/
pub const TEST_ROUNDS: u32 = 5;

#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "Hello";

#[allow(dead_code)] // Used across multiple test files
pub const TEST_IV: [u8; 16] = [0x1F; 16];

/// Plaintext lengths covering empty, sub-block, exact-block and multi-block input
#[allow(dead_code)] // Used across multiple test files
pub const TEST_LENGTHS: &[usize] = &[0, 1, 15, 16, 17, 1000];

#[allow(dead_code)] // Used across multiple test files
pub fn test_material() -> KeyMaterial {
    KeyMaterial::builder()
        .with_password(TEST_PASSWORD)
        .with_master_seed([0xA1; 16])
        .with_transform_seed([0xB2; 32])
        .with_transform_rounds(TEST_ROUNDS)
        .build()
}

#[allow(dead_code)] // Used across multiple test files
pub fn test_params() -> Params {
    Params::from_material(test_material(), CipherId::Rijndael, TEST_IV)
}

#[allow(dead_code)] // Used across multiple test files
pub fn sample_plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}
