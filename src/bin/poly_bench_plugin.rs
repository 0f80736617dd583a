use clap::{Parser, ValueEnum};
use poly_bench_harness::config::{PluginConfig, Profile};
use poly_bench_harness::workloads::{self, Workload};
use poly_bench_harness::HarnessError;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Quick,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "poly-bench-plugin")]
#[command(about = "Reference benchmark plugin: runs one workload, prints one JSON result line")]
struct Args {
    /// Workload to measure.
    #[arg(long, value_enum, default_value_t = Workload::Sum)]
    workload: Workload,

    /// Iteration preset used when --iterations/--warmup are not given.
    #[arg(long, value_enum, default_value_t = ProfileArg::Quick)]
    profile: ProfileArg,

    /// Measured iterations (overrides the profile).
    #[arg(long)]
    iterations: Option<u64>,

    /// Unmeasured warmup iterations (overrides the profile).
    #[arg(long)]
    warmup: Option<u64>,

    /// Input size in bytes/elements for data workloads.
    #[arg(long, default_value_t = 1024)]
    size: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Only report totals; omit per-iteration samples.
    #[arg(long, default_value_t = false)]
    no_samples: bool,

    /// Where to write the JSON record. If omitted, prints to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), HarnessError> {
    // stdout is reserved for the result record.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = PluginConfig {
        profile: args.profile.into(),
        seed: args.seed,
        iterations: args.iterations,
        warmup: args.warmup,
        size: args.size,
        capture_samples: !args.no_samples,
    };

    let result = workloads::run(&cfg, args.workload);
    tracing::info!(workload = args.workload.as_str(), "{result}");

    if let Some(out) = args.out {
        result.write_json(BufWriter::new(File::create(out)?))?;
    } else {
        result.write_json(io::stdout().lock())?;
    }

    Ok(())
}
