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

//! The timed measurement loop and the per-key-size pipeline built on it.

use std::io::Write;
use std::path::Path;

use crate::cpu_time::{cpu_time, USEC_PER_SEC};
use crate::error::Error;
use crate::keys::{default_keys_dir, KeyPair, PROVIDER};
use crate::report::{report, Sample};

/// Minimum CPU time each measurement phase must accumulate, in microseconds.
///
/// Running until a time threshold instead of a fixed iteration count keeps
/// relative measurement noise comparable across operations whose per-call
/// cost differs by orders of magnitude, such as RSA-4096 verification vs.
/// RSA-4096 decryption.
pub const MIN_CPU_TIME: u64 = 2 * USEC_PER_SEC;

/// Operations performed per clock query. The CPU time clock is coarse and
/// not free to read; batching keeps it off the hot path.
pub const INNER_LOOP_COUNT: usize = 10;

/// Byte value the plaintext input buffer is filled with.
const INPUT_FILL: u8 = 0xA5;

/// The key pair files benchmarked by [`run`], in reporting order.
const KEY_PAIR_FILES: &[(&str, &str)] = &[
    ("rsa-2048-prv.pem", "rsa-2048-pub.pem"),
    ("rsa-3072-prv.pem", "rsa-3072-pub.pem"),
    ("rsa-4096-prv.pem", "rsa-4096-pub.pem"),
];

/// Runs the whole benchmark: the provider banner, then the four-phase
/// pipeline for every key size, writing the result stream to `w`.
pub fn run(w: &mut impl Write) -> Result<(), Error> {
    writeln!(w, "provider: {PROVIDER}")?;
    let dir = default_keys_dir()?;
    for &(private_file, public_file) in KEY_PAIR_FILES {
        bench_key_pair(w, &dir.join(private_file), &dir.join(public_file))?;
    }
    Ok(())
}

/// Benchmarks one key pair loaded from explicit PEM paths.
pub fn bench_key_pair(
    w: &mut impl Write,
    private_path: &Path,
    public_path: &Path,
) -> Result<(), Error> {
    bench_key_pair_with(w, private_path, public_path, MIN_CPU_TIME)
}

fn bench_key_pair_with(
    w: &mut impl Write,
    private_path: &Path,
    public_path: &Path,
    min_cpu_time: u64,
) -> Result<(), Error> {
    let keypair = KeyPair::load(private_path, public_path)?;
    let mut rng = rand::thread_rng();

    // Half the modulus size: large enough to be interesting, small enough to
    // leave room for the OAEP padding overhead at every key size.
    let input = vec![INPUT_FILL; keypair.max_output_len() / 2];

    writeln!(w, "algo: {}", keypair.algorithm())?;
    writeln!(w, "key-size: {}", keypair.bits())?;
    writeln!(w, "data-size: {}", input.len())?;
    writeln!(w, "output-size: {}", keypair.max_output_len())?;

    // OAEP encryption. The last ciphertext feeds the decryption phase.
    let mut ciphertext = Vec::new();
    let sample = measure(min_cpu_time, || {
        ciphertext = keypair.encrypt(&mut rng, &input)?;
        Ok(input.len())
    })?;
    writeln!(w, "encrypted-size: {}", ciphertext.len())?;
    report(w, "oaep-encrypt", &sample)?;

    // OAEP decryption of that one ciphertext over and over; decryption is
    // deterministic, so the repetition measures exactly the same work an
    // all-fresh-ciphertext loop would.
    let mut decrypted = Vec::new();
    let sample = measure(min_cpu_time, || {
        decrypted = keypair.decrypt(&ciphertext)?;
        Ok(ciphertext.len())
    })?;
    writeln!(w, "decrypted-size: {}", decrypted.len())?;
    if decrypted != input {
        return Err(Error::RoundTripMismatch);
    }
    report(w, "oaep-decrypt", &sample)?;

    // PSS signing. The last signature feeds the verification phase.
    writeln!(w, "pss-digest-size: {}", keypair.pss_digest_len())?;
    let mut signature = Vec::new();
    let sample = measure(min_cpu_time, || {
        signature = keypair.sign(&mut rng, &input)?;
        Ok(input.len())
    })?;
    writeln!(w, "signature-size: {}", signature.len())?;
    report(w, "pss-sign", &sample)?;

    // PSS verification. A verification failure here surfaces as a provider
    // error and aborts the run, so every counted operation really verified.
    let sample = measure(min_cpu_time, || {
        keypair.verify(&input, &signature)?;
        Ok(signature.len())
    })?;
    report(w, "pss-verify", &sample)?;

    Ok(())
}

/// Repeats `op` in batches of [`INNER_LOOP_COUNT`] until at least
/// `min_cpu_time` microseconds of CPU time have elapsed, then returns the
/// totals. `op` reports how many bytes one invocation processed.
///
/// The clock is re-read only between batches, so the operation count is
/// always a whole multiple of the batch size and the recorded duration can
/// overshoot the threshold, never undershoot it.
fn measure(
    min_cpu_time: u64,
    mut op: impl FnMut() -> Result<usize, Error>,
) -> Result<Sample, Error> {
    assert!(min_cpu_time > 0);
    let mut count: u64 = 0;
    let mut bytes: u64 = 0;
    let start = cpu_time()?;
    loop {
        for _ in 0..INNER_LOOP_COUNT {
            bytes += op()? as u64;
            count += 1;
        }
        let elapsed = cpu_time()? - start;
        if elapsed >= min_cpu_time {
            return Ok(Sample::new(count, bytes, elapsed));
        }
    }
}
