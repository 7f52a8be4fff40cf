use std::time::Duration;

/// Tuning for the pulse cache and batch fan-out.
#[derive(Debug, Clone)]
pub struct PulseConfig {
    /// How long a snapshot stays valid in the cache.
    pub snapshot_ttl: Duration,
    pub max_cache_entries: u64,
    /// Fixed-size window for batch fan-out; never unbounded.
    pub max_concurrency: usize,
    /// Upper bound on entities per regional/global batch.
    pub max_batch_entities: usize,
    pub sweep_interval: Duration,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            snapshot_ttl: Duration::from_secs(900),
            max_cache_entries: 10_000,
            max_concurrency: 5,
            max_batch_entities: 50,
            sweep_interval: Duration::from_secs(300),
        }
    }
}

impl PulseConfig {
    /// Reads `PULSE_*` overrides from the environment, falling back to the
    /// defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            snapshot_ttl: Duration::from_secs(env_u64(
                "PULSE_SNAPSHOT_TTL_SECS",
                defaults.snapshot_ttl.as_secs(),
            )),
            max_cache_entries: env_u64("PULSE_MAX_CACHE_ENTRIES", defaults.max_cache_entries),
            max_concurrency: env_u64("PULSE_MAX_CONCURRENCY", defaults.max_concurrency as u64)
                as usize,
            max_batch_entities: env_u64("PULSE_MAX_BATCH", defaults.max_batch_entities as u64)
                as usize,
            sweep_interval: Duration::from_secs(env_u64(
                "PULSE_SWEEP_INTERVAL_SECS",
                defaults.sweep_interval.as_secs(),
            )),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
