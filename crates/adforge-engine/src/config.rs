//! Engine configuration.

use std::net::SocketAddr;

/// Backoff settings for the background video poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the first poll (milliseconds)
    pub initial_delay_ms: u64,
    /// Multiplier applied after each unsuccessful poll
    pub multiplier: f64,
    /// Delay cap (milliseconds)
    pub max_delay_ms: u64,
    /// Upper bound on random jitter added to each delay (milliseconds)
    pub jitter_ms: u64,
    /// Hard cap on poll attempts
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 5_000,
            multiplier: 1.5,
            max_delay_ms: 60_000,
            jitter_ms: 1_000,
            max_attempts: 20,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// HTTP bind address
    pub bind_addr: SocketAddr,
    /// Prompt fingerprint cache capacity
    pub cache_capacity: usize,
    /// Video poll backoff
    pub poll: PollConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().expect("valid default bind addr"),
            cache_capacity: 100,
            poll: PollConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("ENGINE_BIND_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bind_addr),
            cache_capacity: std::env::var("ENGINE_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cache_capacity),
            poll: PollConfig {
                initial_delay_ms: std::env::var("VIDEO_POLL_INITIAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.poll.initial_delay_ms),
                max_attempts: std::env::var("VIDEO_POLL_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.poll.max_attempts),
                ..defaults.poll
            },
        }
    }
}
