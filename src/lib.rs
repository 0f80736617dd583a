//! Micro-benchmark harness for generated benchmark plugins.
//!
//! A plugin hands a thunk to [`run_benchmark`], gets back an immutable
//! [`BenchResult`] and prints it as one JSON line for the outer runner:
//!
//! ```no_run
//! use poly_bench_harness::run_benchmark;
//!
//! let result = run_benchmark(|| (0..1_000u64).sum::<u64>(), 3_000, 200);
//! println!("{}", result.to_json()?);
//! # Ok::<(), poly_bench_harness::HarnessError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod harness;
pub mod schema;
pub mod workloads;

pub use clock::Clock;
pub use error::HarnessError;
pub use harness::{measure_once, run_benchmark, try_run_benchmark, Runner};
pub use schema::BenchResult;
