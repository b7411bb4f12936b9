// Copyright 2025 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHOR DISCLAIMS ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

#![forbid(
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    warnings
)]

use std::path::Path;

use rsabench::keys::{default_keys_dir, keys_dir, KeyPair, PROVIDER};
use rsabench::Error;

const PRV_2048: &str = "keys/rsa-2048-prv.pem";
const PUB_2048: &str = "keys/rsa-2048-pub.pem";

const KEY_PAIRS: &[(usize, &str, &str)] = &[
    (2048, "keys/rsa-2048-prv.pem", "keys/rsa-2048-pub.pem"),
    (3072, "keys/rsa-3072-prv.pem", "keys/rsa-3072-pub.pem"),
    (4096, "keys/rsa-4096-prv.pem", "keys/rsa-4096-pub.pem"),
];

fn load_2048() -> KeyPair {
    KeyPair::load(Path::new(PRV_2048), Path::new(PUB_2048)).unwrap()
}

// `KeyPair` has no `Debug`, so `unwrap_err()` can't be used on `load`.
fn load_err(private_file: &str, public_file: &str) -> Error {
    match KeyPair::load(Path::new(private_file), Path::new(public_file)) {
        Ok(_) => panic!("loading {private_file} with {public_file} unexpectedly succeeded"),
        Err(err) => err,
    }
}

#[test]
fn loads_every_checked_in_key_pair() {
    for &(bits, private_file, public_file) in KEY_PAIRS {
        let keypair = KeyPair::load(Path::new(private_file), Path::new(public_file)).unwrap();
        assert_eq!(keypair.algorithm(), "RSA");
        assert_eq!(keypair.bits(), bits);
        assert_eq!(keypair.max_output_len(), bits / 8);
        assert_eq!(keypair.pss_digest_len(), 32);
    }
}

#[test]
fn oaep_round_trips_and_is_randomized() {
    let mut rng = rand::thread_rng();
    for &(_, private_file, public_file) in KEY_PAIRS {
        let keypair = KeyPair::load(Path::new(private_file), Path::new(public_file)).unwrap();
        let plaintext = vec![0xA5u8; keypair.max_output_len() / 2];

        let c1 = keypair.encrypt(&mut rng, &plaintext).unwrap();
        let c2 = keypair.encrypt(&mut rng, &plaintext).unwrap();
        assert_eq!(c1.len(), keypair.max_output_len());
        assert_ne!(c1, c2);

        assert_eq!(keypair.decrypt(&c1).unwrap(), plaintext);
        assert_eq!(keypair.decrypt(&c2).unwrap(), plaintext);
    }
}

#[test]
fn oaep_rejects_a_corrupted_ciphertext() {
    let keypair = load_2048();
    let mut rng = rand::thread_rng();
    let plaintext = vec![0xA5u8; keypair.max_output_len() / 2];

    let mut ciphertext = keypair.encrypt(&mut rng, &plaintext).unwrap();
    let last = ciphertext.len() - 1;
    ciphertext[last] ^= 0x01;
    let err = keypair.decrypt(&ciphertext).unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
}

#[test]
fn pss_signs_and_verifies_with_fresh_salts() {
    let mut rng = rand::thread_rng();
    for &(_, private_file, public_file) in KEY_PAIRS {
        let keypair = KeyPair::load(Path::new(private_file), Path::new(public_file)).unwrap();
        let message = vec![0xA5u8; keypair.max_output_len() / 2];

        let sig1 = keypair.sign(&mut rng, &message).unwrap();
        let sig2 = keypair.sign(&mut rng, &message).unwrap();
        assert_eq!(sig1.len(), keypair.max_output_len());
        assert_ne!(sig1, sig2);

        keypair.verify(&message, &sig1).unwrap();
        keypair.verify(&message, &sig2).unwrap();
    }
}

#[test]
fn pss_rejects_the_wrong_message() {
    let keypair = load_2048();
    let mut rng = rand::thread_rng();

    let signature = keypair.sign(&mut rng, b"benchmark input").unwrap();
    let err = keypair.verify(b"some other input", &signature).unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
}

#[test]
fn pss_rejects_a_truncated_signature() {
    let keypair = load_2048();
    let mut rng = rand::thread_rng();

    let signature = keypair.sign(&mut rng, b"benchmark input").unwrap();
    let err = keypair
        .verify(b"benchmark input", &signature[..signature.len() - 1])
        .unwrap_err();
    assert!(matches!(err, Error::Provider { .. }));
}

#[test]
fn mismatched_halves_are_rejected() {
    let err = load_err(PRV_2048, "keys/rsa-3072-pub.pem");
    match err {
        Error::KeySizeMismatch {
            private_bits,
            public_bits,
            ..
        } => {
            assert_eq!(private_bits, 2048);
            assert_eq!(public_bits, 3072);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_key_file_error_names_the_path() {
    let err = load_err("keys/no-such-key.pem", PUB_2048);
    assert!(matches!(err, Error::KeyRead { .. }));
    assert!(err.to_string().contains("no-such-key.pem"));
}

#[test]
fn corrupt_key_file_error_names_the_path() {
    let err = load_err("tests/rsa_corrupt_prv.pem", PUB_2048);
    assert!(matches!(err, Error::KeyParse { .. }));
    assert!(err.to_string().contains("rsa_corrupt_prv.pem"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn keys_dir_walks_up_from_the_executable() {
    let dir = default_keys_dir().unwrap();
    assert!(dir.ends_with("keys"));
    assert!(dir.join("rsa-2048-prv.pem").is_file());
}

#[test]
fn keys_dir_prefers_the_nearest_ancestor() {
    let base = std::env::temp_dir().join(format!("rsabench-keys-test-{}", std::process::id()));
    let nested = base.join("a").join("b");
    std::fs::create_dir_all(nested.join("keys")).unwrap();
    std::fs::create_dir_all(base.join("keys")).unwrap();

    let found = keys_dir(&nested.join("prog")).unwrap();
    assert_eq!(found, nested.join("keys"));

    std::fs::remove_dir_all(&base).unwrap();
}

#[test]
fn keys_dir_failure_reports_the_start_path() {
    let start = Path::new("/nonexistent-rsabench-walk/bin/prog");
    let err = keys_dir(start).unwrap_err();
    assert!(matches!(&err, Error::KeysDirNotFound { start: s } if s == start));
    assert!(err.to_string().contains("nonexistent-rsabench-walk"));
}

#[test]
fn provider_banner_names_an_implementation_and_version() {
    assert!(PROVIDER.starts_with("RustCrypto rsa "));
}
