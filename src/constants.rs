//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Inference endpoint constants
pub mod inference {
    /// Default local completion endpoint (llama.cpp server)
    pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

    /// Chat completions path on the endpoint
    pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

    /// Health check path on the endpoint
    pub const HEALTH_PATH: &str = "/health";

    /// Default model name advertised to the backend
    pub const DEFAULT_MODEL: &str = "phi-3.5";

    /// Placeholder bearer token expected by local servers
    pub const PLACEHOLDER_API_KEY: &str = "no-key";

    /// Default per-request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Sampling temperature (deterministic-leaning)
    pub const TEMPERATURE: f32 = 0.2;

    /// Top-k sampling cutoff
    pub const TOP_K: u32 = 50;

    /// Nucleus sampling cutoff
    pub const TOP_P: f32 = 0.95;
}

/// Pipeline constants
pub mod pipeline {
    /// Maximum specialists the orchestrator may select
    pub const MAX_SPECIALISTS: usize = 3;

    /// Minimum specialists the orchestrator must select
    pub const MIN_SPECIALISTS: usize = 1;

    /// Maximum accepted input text length (characters)
    pub const MAX_TEXT_CHARS: usize = 10_000;

    /// Sentinel source when none could be inferred
    pub const UNKNOWN_SOURCE: &str = "N/A";
}

/// Memory guard constants
pub mod memory {
    /// Free-memory floor below which analysis is refused (500 MiB)
    pub const CRITICAL_THRESHOLD_BYTES: u64 = 500 * 1024 * 1024;
}
