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

//! RSA key pairs and the provider operations measured on them.
//!
//! Key pairs are pre-generated PEM files checked in under `keys/`: a PKCS#8
//! private key and an SPKI public key per modulus size, both encoding the
//! same key. To regenerate one pair:
//!
//! ```sh
//! openssl genpkey -algorithm RSA \
//!       -pkeyopt rsa_keygen_bits:2048 -pkeyopt rsa_keygen_pubexp:65537 \
//!       -out rsa-2048-prv.pem
//! openssl pkey -in rsa-2048-prv.pem -pubout -out rsa-2048-pub.pem
//! ```
//!
//! Loading keys from files instead of generating them per run keeps runs
//! comparable with each other and keeps key generation cost out of the
//! process entirely.

use std::fs;
use std::path::{Path, PathBuf};

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pss::{BlindedSigningKey, Signature, VerifyingKey};
use rsa::rand_core::CryptoRngCore;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::error::Error;

/// The crypto implementation every operation is dispatched to.
///
/// Keep the version in sync with the `rsa` entry in Cargo.toml. Recorded at
/// the top of every run so results from different builds are never compared
/// as if they measured the same code.
pub const PROVIDER: &str = "RustCrypto rsa 0.9";

/// Locates the `keys` directory by walking up the parent directories of
/// `start`.
///
/// `start` is normally the path of the running executable, so an installation
/// keeps working no matter which directory it is invoked from.
pub fn keys_dir(start: &Path) -> Result<PathBuf, Error> {
    for dir in start.ancestors().skip(1) {
        let keys = dir.join("keys");
        if keys.is_dir() {
            return Ok(keys);
        }
    }
    Err(Error::KeysDirNotFound {
        start: start.to_path_buf(),
    })
}

/// Locates the `keys` directory relative to the current executable.
pub fn default_keys_dir() -> Result<PathBuf, Error> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    keys_dir(&exe)
}

/// One RSA key pair plus the signing and verification state derived from it.
///
/// All per-key setup happens in [`KeyPair::load`] so that none of it is
/// charged to a measurement phase. The private key material is zeroized when
/// the pair is dropped.
pub struct KeyPair {
    public: RsaPublicKey,
    private: RsaPrivateKey,
    signer: BlindedSigningKey<Sha256>,
    verifier: VerifyingKey<Sha256>,
    bits: usize,
    max_output_len: usize,
}

impl KeyPair {
    /// Loads a key pair from a PEM private key file and a PEM public key
    /// file, then cross-checks that the two halves agree on the modulus size.
    ///
    /// The size check catches the easiest deployment mistake, pairing the
    /// private key of one size with the public key of another, before it can
    /// produce garbage measurements.
    pub fn load(private_path: &Path, public_path: &Path) -> Result<Self, Error> {
        let private = read_private_pem(private_path)?;
        let public = read_public_pem(public_path)?;

        let private_bits = private.n().bits();
        let private_len = private.size();
        let public_bits = public.n().bits();
        let public_len = public.size();
        if private_bits != public_bits || private_len != public_len {
            return Err(Error::KeySizeMismatch {
                private_bits,
                private_len,
                public_bits,
                public_len,
            });
        }

        let signer = BlindedSigningKey::<Sha256>::new(private.clone());
        let verifier = VerifyingKey::<Sha256>::new(public.clone());
        Ok(Self {
            public,
            private,
            signer,
            verifier,
            bits: private_bits,
            max_output_len: private_len,
        })
    }

    /// The algorithm name reported in the result stream.
    pub fn algorithm(&self) -> &'static str {
        "RSA"
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Modulus size in bytes, which is also the size of every ciphertext and
    /// signature this pair produces.
    pub fn max_output_len(&self) -> usize {
        self.max_output_len
    }

    /// Size in bytes of the message digest used for PSS signing.
    pub fn pss_digest_len(&self) -> usize {
        Sha256::output_size()
    }

    /// Encrypts `plaintext` with the public key using OAEP (SHA-256).
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        self.public
            .encrypt(rng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| Error::provider("OAEP encryption", e))
    }

    /// Decrypts `ciphertext` with the private key using OAEP (SHA-256).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        self.private
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|e| Error::provider("OAEP decryption", e))
    }

    /// Signs `message` with the private key using PSS (SHA-256).
    pub fn sign<R: CryptoRngCore>(&self, rng: &mut R, message: &[u8]) -> Result<Vec<u8>, Error> {
        let signature = self
            .signer
            .try_sign_with_rng(rng, message)
            .map_err(|e| Error::provider("PSS signing", e))?;
        Ok(signature.to_vec())
    }

    /// Verifies a PSS (SHA-256) `signature` over `message` with the public
    /// key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), Error> {
        let signature =
            Signature::try_from(signature).map_err(|e| Error::provider("PSS verification", e))?;
        self.verifier
            .verify(message, &signature)
            .map_err(|e| Error::provider("PSS verification", e))
    }
}

fn read_private_pem(path: &Path) -> Result<RsaPrivateKey, Error> {
    let pem = read_to_string(path)?;
    // PKCS#8 first, then the legacy PKCS#1 encoding. When both decoders
    // reject the file, report the PKCS#8 error.
    let mut private = RsaPrivateKey::from_pkcs8_pem(&pem)
        .or_else(|e| RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|_| e))
        .map_err(|e| key_parse(path, e))?;
    // CRT parameters must be ready before any phase starts timing decryption
    // and signing.
    private.precompute().map_err(|e| key_parse(path, e))?;
    Ok(private)
}

fn read_public_pem(path: &Path) -> Result<RsaPublicKey, Error> {
    let pem = read_to_string(path)?;
    RsaPublicKey::from_public_key_pem(&pem)
        .or_else(|e| RsaPublicKey::from_pkcs1_pem(&pem).map_err(|_| e))
        .map_err(|e| key_parse(path, e))
}

fn read_to_string(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::KeyRead {
        path: path.to_path_buf(),
        source,
    })
}

fn key_parse(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::KeyParse {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}
