//! tests/kdf_tests.rs
//! Key derivation: determinism, base-hash branches, parallel vs sequential stretching

mod common;
use common::{test_material, TEST_PASSWORD, TEST_ROUNDS};

use kdbcrypt_rs::aliases::{DomainHash, GeneralHash};
use kdbcrypt_rs::crypto::kdf::{transform_key, transform_key_block, transform_key_sequential};
use kdbcrypt_rs::{base_hash, derive_key, KeyMaterial};
use proptest::prelude::*;
use sha2::Digest;
use tracing_test::traced_test;

fn material(password: &[u8], key_file_hash: Option<[u8; 32]>) -> KeyMaterial {
    KeyMaterial::new(password.to_vec(), key_file_hash, [7; 16], [9; 32], TEST_ROUNDS)
}

#[test]
fn derive_key_is_deterministic() {
    let key = test_material();
    let first = derive_key(&key);
    for _ in 0..3 {
        assert_eq!(derive_key(&key), first);
    }
    assert_eq!(key.compute(), first);
}

#[test]
fn derive_key_known_answers() {
    let key_file: [u8; 32] = core::array::from_fn(|i| i as u8);
    let cases = [
        (
            TEST_PASSWORD.as_bytes(),
            None,
            "9f6066539d34d6bb5bb4895f8c713577b968915a1af41896fa8dbb3b26b02e56",
            "password only",
        ),
        (
            &b""[..],
            Some(key_file),
            "b93db27f3b448e5e7233bd06799503bdd416cfc2ea5ab1f6a818822ba0267db0",
            "key file only",
        ),
        (
            TEST_PASSWORD.as_bytes(),
            Some(key_file),
            "00ac3b6eeb26c8c2cbf9fe6376d20eda61f8555d8f4438012d80d254c2f53759",
            "password and key file",
        ),
        (
            &b""[..],
            None,
            "bd49769ff289cf672c9441b02b41af90d40c75719f8866b7b73733d32d4dd827",
            "no secrets",
        ),
    ];

    for (password, key_file_hash, expected, desc) in cases {
        let key = KeyMaterial::new(password, key_file_hash, [0xA1; 16], [0xB2; 32], TEST_ROUNDS);
        assert_eq!(hex::encode(derive_key(&key).as_bytes()), expected, "{desc}");
    }
    assert_eq!(
        hex::encode(test_material().compute().as_bytes()),
        "9f6066539d34d6bb5bb4895f8c713577b968915a1af41896fa8dbb3b26b02e56"
    );
}

#[test]
fn stretching_leaves_upper_half_bytes_untouched() {
    let half: [u8; 16] = core::array::from_fn(|i| 0x40 + i as u8);
    for rounds in [1, TEST_ROUNDS, 500] {
        let out = transform_key_block(&half, &[0x22; 32], rounds);
        assert_ne!(out[..8], half[..8], "rounds {rounds}");
        assert_eq!(out[8..], half[8..], "rounds {rounds}");
    }

    let base: [u8; 32] = core::array::from_fn(|i| i as u8);
    let out = transform_key(&base, &[0x22; 32], 3);
    assert_eq!(
        hex::encode(out),
        "c9c670cafacada6008090a0b0c0d0e0fe20f9eff4615a85118191a1b1c1d1e1f"
    );
}

#[test]
fn every_input_changes_the_key() {
    let base = KeyMaterial::new(b"pw".to_vec(), Some([1; 32]), [2; 16], [3; 32], 4);
    let variants = [
        KeyMaterial::new(b"pW".to_vec(), Some([1; 32]), [2; 16], [3; 32], 4),
        KeyMaterial::new(b"pw".to_vec(), Some([0; 32]), [2; 16], [3; 32], 4),
        KeyMaterial::new(b"pw".to_vec(), None, [2; 16], [3; 32], 4),
        KeyMaterial::new(b"pw".to_vec(), Some([1; 32]), [0; 16], [3; 32], 4),
        KeyMaterial::new(b"pw".to_vec(), Some([1; 32]), [2; 16], [0; 32], 4),
        KeyMaterial::new(b"pw".to_vec(), Some([1; 32]), [2; 16], [3; 32], 5),
    ];

    let reference = derive_key(&base);
    for (i, variant) in variants.iter().enumerate() {
        assert_ne!(derive_key(variant), reference, "variant {i} collided");
    }
}

#[test]
fn base_hash_branches() {
    let password = b"correct horse battery staple";
    let key_file: [u8; 32] = core::array::from_fn(|i| i as u8);

    // password only
    let expected: [u8; 32] = GeneralHash::digest(password).into();
    assert_eq!(base_hash(&material(password, None)), expected);

    // key file only
    assert_eq!(base_hash(&material(b"", Some(key_file))), key_file);

    // both: domain hash over sha256(password) || key-file hash
    let mut h = DomainHash::new();
    h.update(GeneralHash::digest(password));
    h.update(key_file);
    let expected: [u8; 32] = h.finalize().into();
    assert_eq!(base_hash(&material(password, Some(key_file))), expected);
}

#[test]
fn no_secrets_at_all_still_derives() {
    let key = material(b"", None);
    let expected: [u8; 32] = GeneralHash::digest(b"").into();
    assert_eq!(base_hash(&key), expected);
    assert_eq!(derive_key(&key), derive_key(&key));
}

#[test]
#[traced_test]
fn derivation_logs_rounds_but_not_secrets() {
    let _ = derive_key(&material(b"do-not-log-me", None));
    assert!(logs_contain("derived cipher key"));
    assert!(logs_contain("rounds=5"));
    assert!(!logs_contain("do-not-log-me"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parallel_stretching_matches_sequential(
        base in any::<[u8; 32]>(),
        seed in any::<[u8; 32]>(),
        rounds in 0u32..64,
    ) {
        prop_assert_eq!(
            transform_key(&base, &seed, rounds),
            transform_key_sequential(&base, &seed, rounds)
        );
    }

    #[test]
    fn derivation_is_deterministic(
        password in proptest::collection::vec(any::<u8>(), 0..64),
        key_file in proptest::option::of(any::<[u8; 32]>()),
        master_seed in any::<[u8; 16]>(),
        rounds in 0u32..16,
    ) {
        let key = KeyMaterial::new(password, key_file, master_seed, [0x42; 32], rounds);
        prop_assert_eq!(derive_key(&key), derive_key(&key.clone()));
    }
}
