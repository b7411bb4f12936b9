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
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use rsabench::keys::KeyPair;
use std::path::{Path, PathBuf};

static KEY_SIZES: &[usize] = &[2048, 3072, 4096];

fn key_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../keys")
        .join(name)
}

fn load(bits: usize) -> KeyPair {
    KeyPair::load(
        &key_path(&format!("rsa-{bits}-prv.pem")),
        &key_path(&format!("rsa-{bits}-pub.pem")),
    )
    .unwrap()
}

fn oaep_encrypt(c: &mut Criterion) {
    for &bits in KEY_SIZES {
        let keypair = load(bits);
        let mut rng = rand::thread_rng();
        let input = vec![0xA5u8; keypair.max_output_len() / 2];
        c.bench_function(&format!("oaep_encrypt_{bits}"), |b| {
            b.iter(|| keypair.encrypt(&mut rng, &input).unwrap());
        });
    }
}

fn oaep_decrypt(c: &mut Criterion) {
    for &bits in KEY_SIZES {
        let keypair = load(bits);
        let mut rng = rand::thread_rng();
        let input = vec![0xA5u8; keypair.max_output_len() / 2];
        let ciphertext = keypair.encrypt(&mut rng, &input).unwrap();
        c.bench_function(&format!("oaep_decrypt_{bits}"), |b| {
            b.iter(|| keypair.decrypt(&ciphertext).unwrap());
        });
    }
}

fn pss_sign(c: &mut Criterion) {
    for &bits in KEY_SIZES {
        let keypair = load(bits);
        let mut rng = rand::thread_rng();
        let input = vec![0xA5u8; keypair.max_output_len() / 2];
        c.bench_function(&format!("pss_sign_{bits}"), |b| {
            b.iter(|| keypair.sign(&mut rng, &input).unwrap());
        });
    }
}

fn pss_verify(c: &mut Criterion) {
    for &bits in KEY_SIZES {
        let keypair = load(bits);
        let mut rng = rand::thread_rng();
        let input = vec![0xA5u8; keypair.max_output_len() / 2];
        let signature = keypair.sign(&mut rng, &input).unwrap();
        c.bench_function(&format!("pss_verify_{bits}"), |b| {
            b.iter(|| keypair.verify(&input, &signature).unwrap());
        });
    }
}

criterion_group!(rsa, oaep_encrypt, oaep_decrypt, pss_sign, pss_verify);
criterion_main!(rsa);
