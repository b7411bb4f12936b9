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

//! RSA throughput measurement.
//!
//! Benchmarks OAEP encryption, OAEP decryption, PSS signing, and PSS
//! verification for 2048-, 3072-, and 4096-bit key pairs, and writes a
//! `key: value` result stream suitable for machine consumption. Each
//! operation is repeated until it has consumed at least two seconds of
//! process CPU time, so a result is a statement about sustained throughput,
//! not a single timing.
//!
//! The binary locates its key pairs in a `keys` directory found by walking
//! up from the executable's own location; see [`keys`] for the expected file
//! layout and how to regenerate the PEM files.
//!
//! # Feature Flags
//!
//! <table>
//! <tr><th>Feature
//!     <th>Description
//! <tr><td><code>slow_tests</code>
//!     <td>Enable the tests that run measurement phases at the full
//!         CPU-time threshold. Each such test takes several seconds.
//! </table>

#![allow(missing_copy_implementations, missing_debug_implementations)]
#![deny(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]

pub mod bench;
pub mod cpu_time;
mod error;
pub mod keys;
pub mod report;

pub use self::bench::run;
pub use self::error::Error;
