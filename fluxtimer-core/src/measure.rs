//! High-Precision Timing
//!
//! A [`Clock`] brackets exactly one invocation of a unit of work. The default
//! [`MonotonicClock`] uses `std::time::Instant` for wall-clock time and also
//! reads the CPU cycle counter (RDTSCP on x86_64, CNTVCT_EL0 on AArch64).

use std::time::Duration;

// ─── Inline cycle counter helpers ────────────────────────────────────────────

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006 and waits
    // for all prior instructions to complete before reading the counter.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides real cycle counters.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

// ─── Timer ───────────────────────────────────────────────────────────────────

/// A started measurement window
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: std::time::Instant,
    cycles_start: u64,
}

impl Timer {
    /// Open a window
    #[inline(always)]
    pub fn start() -> Self {
        let cycles_start = read_cycles();
        Self {
            start: std::time::Instant::now(),
            cycles_start,
        }
    }

    /// Close the window, returning elapsed wall-clock time and cycles
    #[inline(always)]
    pub fn stop(&self) -> (Duration, u64) {
        let elapsed = self.start.elapsed();
        let cycles = read_cycles().saturating_sub(self.cycles_start);
        (elapsed, cycles)
    }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Measures the elapsed time of a single unit of work.
///
/// Implementations must invoke `work` exactly once and must not allocate or
/// perform I/O between opening and closing the measurement window.
pub trait Clock {
    /// Run `work` once and return its result together with the elapsed time
    fn measure<R, F>(&mut self, work: F) -> (R, Duration)
    where
        F: FnOnce() -> R;
}

/// Monotonic clock backed by `std::time::Instant`
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    total_cycles: u64,
    total_elapsed: Duration,
    measurements: u64,
}

impl MonotonicClock {
    /// Create a clock with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycles counted across every measurement (0 without a cycle counter)
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Wall-clock time accumulated across every measurement
    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    /// Number of measurements taken
    pub fn measurements(&self) -> u64 {
        self.measurements
    }

    /// Cycles per nanosecond (approximates CPU frequency in GHz)
    pub fn cycles_per_ns(&self) -> f64 {
        let nanos = self.total_elapsed.as_nanos() as f64;
        if nanos > 0.0 {
            self.total_cycles as f64 / nanos
        } else {
            0.0
        }
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn measure<R, F>(&mut self, work: F) -> (R, Duration)
    where
        F: FnOnce() -> R,
    {
        let timer = Timer::start();
        let value = std::hint::black_box(work());
        let (elapsed, cycles) = timer.stop();

        self.total_cycles = self.total_cycles.saturating_add(cycles);
        self.total_elapsed += elapsed;
        self.measurements += 1;

        (value, elapsed)
    }
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// This improves TSC stability by avoiding core migrations.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is a no-op outside Linux
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
