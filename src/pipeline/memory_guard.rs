//! Memory Guard
//!
//! Preflight check run before each analysis. Local inference needs the
//! model resident in RAM, so starting a run on a starved machine mostly
//! produces a slow failure; refusing up front gives a better message.

use std::fmt;
use std::sync::Arc;

use sysinfo::System;
use tracing::{debug, warn};

use crate::constants::memory::CRITICAL_THRESHOLD_BYTES;

/// Shown when the preflight check refuses to start an analysis
pub const LOW_MEMORY_WARNING: &str = "System memory is very low. Analysis may fail. \
     You can try closing other applications first, or continue anyway.";

/// Shown when an analysis failed while memory was critical
pub const LOW_MEMORY_FAILURE_HINT: &str = "Analysis failed. Your system is currently low \
     on memory which might be the cause. Try closing some other applications and try again.";

/// Source of the available-memory reading.
///
/// The guard reads through this seam so tests can script memory
/// conditions instead of depending on the host machine.
pub trait MemorySampler: Send + Sync {
    fn available_bytes(&self) -> u64;
}

/// Production sampler backed by the OS memory counters
pub struct SysinfoSampler;

impl MemorySampler for SysinfoSampler {
    fn available_bytes(&self) -> u64 {
        let mut system = System::new();
        system.refresh_memory();
        system.available_memory()
    }
}

/// Result of one memory check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStatus {
    Ok { available_bytes: u64 },
    Critical { available_bytes: u64 },
}

impl MemoryStatus {
    pub fn is_critical(&self) -> bool {
        matches!(self, MemoryStatus::Critical { .. })
    }

    pub fn available_bytes(&self) -> u64 {
        match self {
            MemoryStatus::Ok { available_bytes } | MemoryStatus::Critical { available_bytes } => {
                *available_bytes
            }
        }
    }
}

/// Checks available system memory against a fixed floor
#[derive(Clone)]
pub struct MemoryGuard {
    threshold_bytes: u64,
    sampler: Arc<dyn MemorySampler>,
}

impl fmt::Debug for MemoryGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGuard")
            .field("threshold_bytes", &self.threshold_bytes)
            .finish_non_exhaustive()
    }
}

impl Default for MemoryGuard {
    fn default() -> Self {
        Self {
            threshold_bytes: CRITICAL_THRESHOLD_BYTES,
            sampler: Arc::new(SysinfoSampler),
        }
    }
}

impl MemoryGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the floor, mainly for tests or to disable the check
    pub fn with_threshold(threshold_bytes: u64) -> Self {
        Self {
            threshold_bytes,
            ..Self::default()
        }
    }

    /// Replace the memory source, keeping the default floor
    pub fn with_sampler(sampler: Arc<dyn MemorySampler>) -> Self {
        Self {
            threshold_bytes: CRITICAL_THRESHOLD_BYTES,
            sampler,
        }
    }

    /// Read current available memory and classify it
    pub fn check(&self) -> MemoryStatus {
        let available = self.sampler.available_bytes();

        let status = Self::classify(available, self.threshold_bytes);
        match status {
            MemoryStatus::Ok { .. } => {
                debug!("Memory check passed: {} bytes available", available)
            }
            MemoryStatus::Critical { .. } => {
                warn!("Memory critically low: {} bytes available", available)
            }
        }
        status
    }

    fn classify(available_bytes: u64, threshold_bytes: u64) -> MemoryStatus {
        if available_bytes < threshold_bytes {
            MemoryStatus::Critical { available_bytes }
        } else {
            MemoryStatus::Ok { available_bytes }
        }
    }
}
