//! # Constants
//!
//! Sizes and defaults shared by key derivation, key-file handling and the
//! stream codec.

/// Cipher block size in bytes. Every cipher this crate selects uses 16-byte blocks.
pub const BLOCK_SIZE: usize = 16;

/// Length of the derived cipher key (and of both hash outputs).
pub const COMPUTED_KEY_SIZE: usize = 32;

/// Length of a key-file hash.
///
/// Legacy documentation of the format claims 16; every consumer treats it as a
/// full 256-bit hash output, so 32 is enforced.
pub const KEY_FILE_HASH_SIZE: usize = 32;

/// Length of the master seed mixed into the final hash.
pub const MASTER_SEED_SIZE: usize = 16;

/// Length of the transform seed that keys the stretching cipher.
pub const TRANSFORM_SEED_SIZE: usize = 32;

/// Block size of the stretching cipher. Only this many leading bytes of each
/// 16-byte key half are transformed; the rest pass through.
pub const STRETCH_BLOCK_SIZE: usize = 8;

/// Initialization vector length for CBC mode.
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Size of a hex-encoded key file.
pub const KEY_FILE_HEX_SIZE: usize = 2 * KEY_FILE_HASH_SIZE;

/// Bytes read from a key file before deciding its format: one past the
/// largest fixed-size format, to tell "exactly 64" from "more than 64".
pub const KEY_FILE_PROBE_SIZE: usize = KEY_FILE_HEX_SIZE + 1;

/// Default stretching round count used by [`KeyMaterialBuilder`](crate::KeyMaterialBuilder).
pub const DEFAULT_TRANSFORM_ROUNDS: u32 = 50_000;

/// KeePass 1.x header flag selecting the Rijndael cipher.
pub const FLAG_RIJNDAEL: u32 = 0x2;

/// KeePass 1.x header flag selecting the Twofish cipher.
pub const FLAG_TWOFISH: u32 = 0x8;
