//! Run configuration for the reference plugin binary.
//!
//! The harness API never picks iteration counts itself; these presets only
//! exist so the plugin has something sensible when the runner passes none.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::harness::Runner;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Quick,
    Full,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
        }
    }

    pub fn warmup_iters(&self) -> u64 {
        match self {
            Profile::Quick => 32,
            Profile::Full => 200,
        }
    }

    pub fn iters(&self) -> u64 {
        match self {
            Profile::Quick => 300,
            Profile::Full => 3_000,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PluginConfig {
    pub profile: Profile,
    pub seed: u64,
    /// Overrides the profile's measured iteration count.
    pub iterations: Option<u64>,
    /// Overrides the profile's warmup count.
    pub warmup: Option<u64>,
    /// Input size (bytes or elements) for data-driven workloads.
    pub size: usize,
    pub capture_samples: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            seed: 0,
            iterations: None,
            warmup: None,
            size: 1024,
            capture_samples: true,
        }
    }
}

impl PluginConfig {
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    pub fn iters(&self) -> u64 {
        self.iterations.unwrap_or_else(|| self.profile.iters())
    }

    pub fn warmup_iters(&self) -> u64 {
        self.warmup.unwrap_or_else(|| self.profile.warmup_iters())
    }

    pub fn runner(&self) -> Runner {
        Runner::new().capture_samples(self.capture_samples)
    }
}
