//! Benchmark runner: warmup, measured phase, per-sample timing.
//!
//! Everything runs on the calling thread. Thunk results go through
//! [`black_box`] so the optimizer cannot drop the call, and thunk panics are
//! never caught.

use std::convert::Infallible;
use std::hint::black_box;
use std::time::Duration;

use crate::clock::Clock;
use crate::schema::BenchResult;

/// Configured runner. The defaults keep every sample.
#[derive(Clone, Copy, Debug)]
pub struct Runner {
    capture_samples: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            capture_samples: true,
        }
    }

    /// Keep (the default) or drop per-iteration samples.
    ///
    /// Without samples the record only carries totals and the JSON omits the
    /// `samples` key, which keeps memory flat for very large iteration counts.
    pub fn capture_samples(mut self, capture: bool) -> Self {
        self.capture_samples = capture;
        self
    }

    pub fn captures_samples(&self) -> bool {
        self.capture_samples
    }

    /// Run `f` `warmup` times unmeasured, then `iterations` times measured.
    pub fn run<T>(&self, iterations: u64, warmup: u64, mut f: impl FnMut() -> T) -> BenchResult {
        match self.try_run(iterations, warmup, || Ok::<T, Infallible>(f())) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Like [`Runner::run`] for thunks that can fail.
    ///
    /// The first error, whether raised during warmup or measurement, is returned
    /// unchanged and nothing measured so far is kept.
    pub fn try_run<T, E>(
        &self,
        iterations: u64,
        warmup: u64,
        mut f: impl FnMut() -> Result<T, E>,
    ) -> Result<BenchResult, E> {
        let mut samples = if self.capture_samples {
            Vec::with_capacity(usize::try_from(iterations).unwrap_or(0))
        } else {
            Vec::new()
        };

        for _ in 0..warmup {
            black_box(f()?);
        }

        let mut total_nanos: u64 = 0;
        for _ in 0..iterations {
            let start = Clock::now();
            let out = f();
            let elapsed = Clock::elapsed_nanos(start);
            black_box(out?);

            if self.capture_samples {
                samples.push(elapsed);
            }
            total_nanos = total_nanos.saturating_add(elapsed);
        }

        let result = BenchResult::with_totals(iterations, total_nanos, samples);
        tracing::debug!(
            iterations,
            warmup,
            total_nanos,
            nanos_per_op = result.nanos_per_op(),
            "benchmark run complete"
        );
        Ok(result)
    }
}

/// Run `f` `warmup` times unmeasured, then time each of `iterations` calls.
///
/// With `iterations == 0` the record has zero totals, no samples and both
/// rates set to 0.
pub fn run_benchmark<T>(f: impl FnMut() -> T, iterations: u64, warmup: u64) -> BenchResult {
    Runner::new().run(iterations, warmup, f)
}

/// [`run_benchmark`] for fallible thunks; the thunk's error comes back as-is.
pub fn try_run_benchmark<T, E>(
    f: impl FnMut() -> Result<T, E>,
    iterations: u64,
    warmup: u64,
) -> Result<BenchResult, E> {
    Runner::new().try_run(iterations, warmup, f)
}

/// Time exactly one call of `f`.
pub fn measure_once<T>(f: impl FnOnce() -> T) -> Duration {
    let start = Clock::now();
    black_box(f());
    Duration::from_nanos(Clock::elapsed_nanos(start))
}
