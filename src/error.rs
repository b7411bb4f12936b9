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

//! Error reporting.

use std::io;
use std::path::PathBuf;

/// A fatal benchmark failure.
///
/// Every variant ends the run. A partial measurement is worse than none, so
/// nothing here is retried or papered over; callers propagate the error up to
/// `main`, which prints it and exits nonzero.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `keys` directory was found in any ancestor of the start path.
    #[error("cannot find 'keys' directory above {}", .start.display())]
    KeysDirNotFound {
        /// The path the ancestor walk started from.
        start: PathBuf,
    },

    /// A key file could not be read from disk.
    #[error("cannot read key file {}: {source}", .path.display())]
    KeyRead {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A key file was readable but did not contain a usable RSA key.
    #[error("malformed key in {}: {source}", .path.display())]
    KeyParse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The decoder's rejection.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The private and public halves of a nominal key pair disagree on size.
    #[error(
        "key pair size mismatch: private key is {private_bits} bits \
         ({private_len} bytes), public key is {public_bits} bits \
         ({public_len} bytes)"
    )]
    KeySizeMismatch {
        /// Modulus size of the private key, in bits.
        private_bits: usize,
        /// Modulus size of the private key, in bytes.
        private_len: usize,
        /// Modulus size of the public key, in bits.
        public_bits: usize,
        /// Modulus size of the public key, in bytes.
        public_len: usize,
    },

    /// Decrypting the benchmark ciphertext did not reproduce the plaintext.
    #[error("decrypted data does not match the original input")]
    RoundTripMismatch,

    /// The crypto provider rejected or failed an operation.
    #[error("{op} failed: {source}")]
    Provider {
        /// The operation that failed.
        op: &'static str,
        /// The provider's own error value.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The OS refused the process CPU time query.
    #[error("cannot query process CPU time: {source}")]
    CpuTime {
        /// The reported OS error.
        #[source]
        source: io::Error,
    },

    /// An I/O failure outside of key loading, e.g. writing a result line.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn provider(
        op: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            op,
            source: Box::new(source),
        }
    }
}
