//! Doctor Command
//!
//! Checks everything an analysis run depends on: configuration, the
//! inference server, and free memory.

use std::sync::Arc;

use crate::cli::output::Output;
use crate::config::ConfigLoader;
use crate::infer::{CompletionBackend, HttpBackend};
use crate::pipeline::memory_guard::MemoryGuard;
use crate::types::Result;

pub async fn run() -> Result<()> {
    let output = Output::new();
    output.header("CredLens Doctor");

    // Configuration
    let config = match ConfigLoader::load() {
        Ok(config) => {
            output.success("Configuration loaded and valid");
            config
        }
        Err(e) => {
            output.error(&format!("Configuration invalid: {}", e));
            return Err(e);
        }
    };

    // Inference server
    output.info(&format!(
        "Inference endpoint: {} (model: {})",
        config.inference.endpoint, config.inference.model
    ));
    let backend: Arc<dyn CompletionBackend> = Arc::new(HttpBackend::new(config.inference.clone())?);
    match backend.health_check().await {
        Ok(true) => output.success("Inference server is reachable"),
        Ok(false) => output.warning("Inference server did not answer the health check"),
        Err(e) => output.error(&format!("Inference server check failed: {}", e)),
    }

    // Memory
    let status = MemoryGuard::new().check();
    let available_mib = status.available_bytes() / (1024 * 1024);
    if status.is_critical() {
        output.warning(&format!(
            "Available memory is low: {} MiB. Analysis may be refused.",
            available_mib
        ));
    } else {
        output.success(&format!("Available memory: {} MiB", available_mib));
    }

    Ok(())
}
