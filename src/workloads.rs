//! Built-in workloads the reference plugin can measure.
//!
//! Inputs are generated up front from the configured seed so repeated runs
//! time the same work.

use std::thread;
use std::time::Duration;

use clap::ValueEnum;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::config::PluginConfig;
use crate::schema::BenchResult;

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum Workload {
    /// Empty thunk; measures harness and clock overhead.
    Noop,
    /// Wrapping sum over `size` random u64 values.
    #[default]
    Sum,
    /// SHA-256 digest of a `size`-byte buffer.
    Sha256,
    /// Allocate and fill a `size`-byte vector.
    Alloc,
    /// Sleep for one millisecond.
    Sleep,
}

impl Workload {
    pub fn as_str(&self) -> &'static str {
        match self {
            Workload::Noop => "noop",
            Workload::Sum => "sum",
            Workload::Sha256 => "sha256",
            Workload::Alloc => "alloc",
            Workload::Sleep => "sleep",
        }
    }
}

pub fn run(cfg: &PluginConfig, workload: Workload) -> BenchResult {
    let runner = cfg.runner();
    let iters = cfg.iters();
    let warmup = cfg.warmup_iters();
    let mut rng = cfg.rng();

    tracing::info!(
        workload = workload.as_str(),
        profile = cfg.profile.as_str(),
        iters,
        warmup,
        size = cfg.size,
        "running workload"
    );

    match workload {
        Workload::Noop => runner.run(iters, warmup, || ()),
        Workload::Sum => {
            let values: Vec<u64> = (0..cfg.size).map(|_| rng.gen()).collect();
            runner.run(iters, warmup, || {
                values.iter().fold(0u64, |acc, v| acc.wrapping_add(*v))
            })
        }
        Workload::Sha256 => {
            let mut data = vec![0u8; cfg.size];
            rng.fill(data.as_mut_slice());
            runner.run(iters, warmup, || Sha256::digest(&data))
        }
        Workload::Alloc => {
            let fill: u8 = rng.gen();
            let size = cfg.size;
            runner.run(iters, warmup, || vec![fill; size])
        }
        Workload::Sleep => runner.run(iters, warmup, || thread::sleep(Duration::from_millis(1))),
    }
}
