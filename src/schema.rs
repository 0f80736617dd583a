use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Result record of one benchmark run.
///
/// Produced by the runner and immutable afterwards: fields are only readable
/// through accessors. Allocation figures are attached with [`BenchResult::with_allocs`],
/// which consumes the record and returns a new one.
///
/// Wire format (compact JSON, one object per run):
///
/// ```text
/// {"iterations":3,"total_nanos":3000,"nanos_per_op":1000.0,"ops_per_sec":1000000.0,
///  "bytes_per_op":0,"allocs_per_op":0,"samples":[1100,900,1000]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    iterations: u64,
    total_nanos: u64,
    nanos_per_op: f64,
    ops_per_sec: f64,
    #[serde(default)]
    bytes_per_op: u64,
    #[serde(default)]
    allocs_per_op: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    samples: Vec<u64>,
}

/// Sum with the same saturating accumulator the runner uses.
fn saturating_sum(samples: &[u64]) -> u64 {
    samples.iter().fold(0u64, |acc, s| acc.saturating_add(*s))
}

/// `(nanos_per_op, ops_per_sec)`; both zero when nothing measurable happened.
fn rates(iterations: u64, total_nanos: u64) -> (f64, f64) {
    if iterations == 0 || total_nanos == 0 {
        return (0.0, 0.0);
    }
    let nanos_per_op = total_nanos as f64 / iterations as f64;
    (nanos_per_op, NANOS_PER_SEC / nanos_per_op)
}

impl BenchResult {
    /// Record for a run whose per-iteration samples were kept.
    ///
    /// `iterations` is the sample count and `total_nanos` their (saturating) sum.
    pub fn from_samples(samples: Vec<u64>) -> Self {
        let iterations = samples.len() as u64;
        let total_nanos = saturating_sum(&samples);
        Self::with_totals(iterations, total_nanos, samples)
    }

    /// Record for a run that only accumulated a total.
    pub fn from_totals(iterations: u64, total_nanos: u64) -> Self {
        Self::with_totals(iterations, total_nanos, Vec::new())
    }

    pub(crate) fn with_totals(iterations: u64, total_nanos: u64, samples: Vec<u64>) -> Self {
        let (nanos_per_op, ops_per_sec) = rates(iterations, total_nanos);
        Self {
            iterations,
            total_nanos,
            nanos_per_op,
            ops_per_sec,
            bytes_per_op: 0,
            allocs_per_op: 0,
            samples,
        }
    }

    /// Attach allocation figures supplied by an allocator shim or profiler.
    #[must_use]
    pub fn with_allocs(self, bytes_per_op: u64, allocs_per_op: u64) -> Self {
        Self {
            bytes_per_op,
            allocs_per_op,
            ..self
        }
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn total_nanos(&self) -> u64 {
        self.total_nanos
    }

    pub fn nanos_per_op(&self) -> f64 {
        self.nanos_per_op
    }

    pub fn ops_per_sec(&self) -> f64 {
        self.ops_per_sec
    }

    pub fn bytes_per_op(&self) -> u64 {
        self.bytes_per_op
    }

    pub fn allocs_per_op(&self) -> u64 {
        self.allocs_per_op
    }

    /// Per-iteration nanoseconds in execution order; empty when capture was off.
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Check the schema invariants.
    ///
    /// Rates must be finite, non-negative and agree with the totals: zero
    /// iterations means zero totals and zero rates, otherwise `nanos_per_op` is
    /// `total_nanos / iterations` and `ops_per_sec` its reciprocal in seconds
    /// (both zero for a run below clock resolution). When samples are present
    /// there must be one per iteration and they must add up to `total_nanos`.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("nanos_per_op", self.nanos_per_op),
            ("ops_per_sec", self.ops_per_sec),
        ] {
            if !value.is_finite() {
                return Err(HarnessError::ill_formed(field, format!("is not finite ({value})")));
            }
            if value < 0.0 {
                return Err(HarnessError::ill_formed(field, format!("is negative ({value})")));
            }
        }

        self.validate_rates()?;

        if !self.samples.is_empty() {
            if self.samples.len() as u64 != self.iterations {
                return Err(HarnessError::ill_formed(
                    "samples",
                    format!(
                        "has {} entries but iterations is {}",
                        self.samples.len(),
                        self.iterations
                    ),
                ));
            }
            if saturating_sum(&self.samples) != self.total_nanos {
                return Err(HarnessError::ill_formed(
                    "samples",
                    format!("do not sum to total_nanos ({})", self.total_nanos),
                ));
            }
        }

        Ok(())
    }

    fn validate_rates(&self) -> Result<()> {
        if self.iterations == 0 {
            if self.total_nanos != 0 {
                return Err(HarnessError::ill_formed(
                    "total_nanos",
                    format!("is {} with zero iterations", self.total_nanos),
                ));
            }
            return self.require_zero_rates("with zero iterations");
        }

        let total = self.total_nanos as f64;
        let expected = total / self.iterations as f64;
        if (self.nanos_per_op - expected).abs() > 1e-9 * total.max(1.0) {
            return Err(HarnessError::ill_formed(
                "nanos_per_op",
                format!(
                    "is {} but total_nanos / iterations is {expected}",
                    self.nanos_per_op
                ),
            ));
        }

        if self.nanos_per_op > 0.0 {
            let product = self.ops_per_sec * self.nanos_per_op;
            if (product - NANOS_PER_SEC).abs() > 1e-6 * NANOS_PER_SEC {
                return Err(HarnessError::ill_formed(
                    "ops_per_sec",
                    format!(
                        "is {} but nanos_per_op is {}",
                        self.ops_per_sec, self.nanos_per_op
                    ),
                ));
            }
            Ok(())
        } else {
            self.require_zero_rates("below clock resolution")
        }
    }

    fn require_zero_rates(&self, context: &str) -> Result<()> {
        for (field, value) in [
            ("nanos_per_op", self.nanos_per_op),
            ("ops_per_sec", self.ops_per_sec),
        ] {
            if value != 0.0 {
                return Err(HarnessError::ill_formed(
                    field,
                    format!("must be 0 {context} (got {value})"),
                ));
            }
        }
        Ok(())
    }

    /// Compact JSON encoding. Ill-formed records are rejected, not serialized.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Write the compact JSON encoding plus a trailing newline to `writer`.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        self.validate()?;
        serde_json::to_writer(&mut writer, self).map_err(|e| {
            if e.is_io() {
                HarnessError::Io(e.into())
            } else {
                HarnessError::Json(e)
            }
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Parse a record emitted by any plugin.
    ///
    /// `bytes_per_op`, `allocs_per_op` and `samples` may be absent. The parsed
    /// record must pass [`BenchResult::validate`].
    pub fn from_json(s: &str) -> Result<Self> {
        let result: BenchResult = serde_json::from_str(s.trim())?;
        result.validate()?;
        Ok(result)
    }
}

/// Human-readable duration, auto-selecting ns/µs/ms/s.
pub fn format_duration(nanos: f64) -> String {
    if nanos < 1_000.0 {
        format!("{:.2} ns", nanos)
    } else if nanos < 1_000_000.0 {
        format!("{:.2} µs", nanos / 1_000.0)
    } else if nanos < 1_000_000_000.0 {
        format!("{:.2} ms", nanos / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos / 1_000_000_000.0)
    }
}

pub fn format_ops_per_sec(ops: f64) -> String {
    if ops >= 1_000_000_000.0 {
        format!("{:.2}B ops/s", ops / 1_000_000_000.0)
    } else if ops >= 1_000_000.0 {
        format!("{:.2}M ops/s", ops / 1_000_000.0)
    } else if ops >= 1_000.0 {
        format!("{:.2}K ops/s", ops / 1_000.0)
    } else {
        format!("{:.2} ops/s", ops)
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iters, {}/op, {}",
            self.iterations,
            format_duration(self.nanos_per_op),
            format_ops_per_sec(self.ops_per_sec)
        )
    }
}
