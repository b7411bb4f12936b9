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

//! Process CPU time.
//!
//! All measurements use CPU time (user plus system) charged to this process,
//! not wall-clock time, so results are insulated from scheduler delays and
//! other load on the machine.

use crate::error::Error;

/// Microseconds per second.
pub const USEC_PER_SEC: u64 = 1_000_000;

/// Returns the total CPU time consumed by this process so far, in
/// microseconds.
///
/// The value is monotonically non-decreasing over the life of the process.
pub fn cpu_time() -> Result<u64, Error> {
    imp::cpu_time()
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod imp {
            use super::USEC_PER_SEC;
            use crate::error::Error;

            pub(super) fn cpu_time() -> Result<u64, Error> {
                // `rusage` is plain data; zeroed is a valid initial value.
                let mut ru: libc::rusage = unsafe { core::mem::zeroed() };
                let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut ru) };
                if rc != 0 {
                    return Err(Error::CpuTime {
                        source: std::io::Error::last_os_error(),
                    });
                }
                Ok(timeval_usec(&ru.ru_utime) + timeval_usec(&ru.ru_stime))
            }

            fn timeval_usec(tv: &libc::timeval) -> u64 {
                (tv.tv_sec as u64) * USEC_PER_SEC + (tv.tv_usec as u64)
            }
        }
    } else if #[cfg(windows)] {
        mod imp {
            use crate::error::Error;
            use windows_sys::Win32::Foundation::FILETIME;
            use windows_sys::Win32::System::Threading::{GetCurrentProcess, GetProcessTimes};

            pub(super) fn cpu_time() -> Result<u64, Error> {
                let mut creation = zeroed();
                let mut exit = zeroed();
                let mut kernel = zeroed();
                let mut user = zeroed();
                let ok = unsafe {
                    GetProcessTimes(
                        GetCurrentProcess(),
                        &mut creation,
                        &mut exit,
                        &mut kernel,
                        &mut user,
                    )
                };
                if ok == 0 {
                    return Err(Error::CpuTime {
                        source: std::io::Error::last_os_error(),
                    });
                }
                // `FILETIME` counts 100ns ticks.
                Ok((ticks(&kernel) + ticks(&user)) / 10)
            }

            fn zeroed() -> FILETIME {
                FILETIME {
                    dwLowDateTime: 0,
                    dwHighDateTime: 0,
                }
            }

            fn ticks(ft: &FILETIME) -> u64 {
                (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
            }
        }
    } else {
        compile_error!("no process CPU time source for this target");
    }
}

#[cfg(test)]
mod tests {
    use super::cpu_time;

    #[test]
    fn non_decreasing() {
        let a = cpu_time().unwrap();
        let b = cpu_time().unwrap();
        assert!(b >= a);
    }

    #[test]
    fn advances_under_load() {
        let start = cpu_time().unwrap();
        let mut spins = 0u64;
        loop {
            // Enough work per spin that coarse-grained clocks still tick.
            let mut acc = 0u64;
            for i in 0..1_000_000u64 {
                acc = acc.wrapping_add(std::hint::black_box(i));
            }
            let _ = std::hint::black_box(acc);

            if cpu_time().unwrap() > start {
                return;
            }
            spins += 1;
            assert!(spins < 100_000, "CPU time never advanced");
        }
    }
}
