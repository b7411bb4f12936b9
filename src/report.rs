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

//! The `key: value` result stream.
//!
//! Each measurement phase becomes five lines, e.g. for the `oaep-encrypt`
//! label:
//!
//! ```text
//! oaep-encrypt-microsec: 2000413
//! oaep-encrypt-size: 13255040
//! oaep-encrypt-bitrate: 53009213
//! oaep-encrypt-count: 103555
//! oaep-encrypt-oprate: 51766
//! ```
//!
//! Analysis tooling reads the stream line by line, so the `-microsec` line
//! always precedes the `-count` line for a label.

use std::io::{self, Write};

use crate::cpu_time::USEC_PER_SEC;

/// One finished measurement phase: how many operations ran, how many bytes
/// they processed, and how much CPU time they took.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Sample {
    count: u64,
    bytes: u64,
    micros: u64,
}

impl Sample {
    /// Records a finished phase.
    ///
    /// The measurement loop cannot legitimately produce an empty or
    /// instantaneous phase, and the rate computations divide by `micros`, so
    /// both being nonzero is asserted rather than reported as a runtime
    /// error.
    pub fn new(count: u64, bytes: u64, micros: u64) -> Self {
        assert!(count > 0, "phase ran no operations");
        assert!(micros > 0, "phase consumed no CPU time");
        Self {
            count,
            bytes,
            micros,
        }
    }

    /// Number of operations the phase completed.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total bytes processed across all operations.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// CPU time the phase consumed, in microseconds.
    pub fn micros(&self) -> u64 {
        self.micros
    }

    /// Throughput in integer arithmetic, truncating toward zero.
    pub fn rates(&self) -> Rates {
        Rates {
            bits_per_sec: 8 * self.bytes * USEC_PER_SEC / self.micros,
            ops_per_sec: self.count * USEC_PER_SEC / self.micros,
        }
    }
}

/// Throughput derived from a [`Sample`] at reporting time; never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rates {
    /// Payload throughput in bits per second.
    pub bits_per_sec: u64,
    /// Operations per second.
    pub ops_per_sec: u64,
}

/// Writes the five metric lines for one phase under `label`.
pub fn report(w: &mut impl Write, label: &str, sample: &Sample) -> io::Result<()> {
    let rates = sample.rates();
    writeln!(w, "{label}-microsec: {}", sample.micros())?;
    writeln!(w, "{label}-size: {}", sample.bytes())?;
    writeln!(w, "{label}-bitrate: {}", rates.bits_per_sec)?;
    writeln!(w, "{label}-count: {}", sample.count())?;
    writeln!(w, "{label}-oprate: {}", rates.ops_per_sec)?;
    Ok(())
}
