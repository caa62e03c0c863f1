//! Time sources for the timed runs.

use std::time::Instant;

/// Something that can be sampled before and after a timed run.
///
/// The harness only ever looks at differences between two samples, so the
/// origin is arbitrary.
pub trait Clock {
    /// Current reading in seconds.
    fn now_secs(&mut self) -> f64;
}

/// Process CPU time, the same quantity `clock()` reports.
///
/// On Unix this samples `CLOCK_PROCESS_CPUTIME_ID`. If that clock cannot be
/// read (or on other platforms) it falls back to a monotonic wall clock.
#[derive(Debug, Clone)]
pub struct CpuClock {
    origin: Instant,
}

impl CpuClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    #[cfg(unix)]
    fn process_cpu_secs() -> Option<f64> {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
        let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
        (rc == 0).then(|| ts.tv_sec as f64 + ts.tv_nsec as f64 * 1e-9)
    }

    #[cfg(not(unix))]
    fn process_cpu_secs() -> Option<f64> {
        None
    }
}

impl Default for CpuClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for CpuClock {
    fn now_secs(&mut self) -> f64 {
        Self::process_cpu_secs().unwrap_or_else(|| self.origin.elapsed().as_secs_f64())
    }
}

/// Run `f` once and return the elapsed time in milliseconds.
///
/// ```
/// use blockbench::harness::clock::{CpuClock, time_ms};
///
/// let mut clock = CpuClock::new();
/// let ms = time_ms(&mut clock, || std::hint::black_box((0..1000).sum::<u64>()));
/// assert!(ms >= 0.0);
/// ```
pub fn time_ms<C, F, T>(clock: &mut C, f: F) -> f64
where
    C: Clock + ?Sized,
    F: FnOnce() -> T,
{
    let start = clock.now_secs();
    std::hint::black_box(f());
    let end = clock.now_secs();
    (end - start) * 1000.0
}
