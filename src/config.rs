use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::projection::{Product, Region};

#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated round trip before a refreshed snapshot becomes visible
    pub refresh_latency_ms: u64,
    /// Timer-driven refresh period; 0 disables the timer
    pub auto_refresh_secs: u64,
    /// Fixed seed for reproducible runs; entropy when unset
    pub rng_seed: Option<u64>,
    pub default_region: Region,
    pub default_product: Product,
    /// Refresh cycles the demo binary runs before exiting
    pub demo_ticks: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            refresh_latency_ms: std::env::var("REFRESH_LATENCY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(1200),
            auto_refresh_secs: std::env::var("AUTO_REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(0),
            rng_seed: std::env::var("RNG_SEED").ok().and_then(|v| v.parse().ok()),
            default_region: std::env::var("DEFAULT_REGION").ok().and_then(|v| v.parse().ok()).unwrap_or(Region::All),
            default_product: std::env::var("DEFAULT_PRODUCT").ok().and_then(|v| v.parse().ok()).unwrap_or(Product::All),
            demo_ticks: std::env::var("DEMO_TICKS").ok().and_then(|v| v.parse().ok()).unwrap_or(3),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.auto_refresh_secs > 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_latency_ms: 1200,
            auto_refresh_secs: 0,
            rng_seed: None,
            default_region: Region::All,
            default_product: Product::All,
            demo_ticks: 3,
        }
    }
}
