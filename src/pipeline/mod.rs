//! Analysis Pipeline
//!
//! Coordinates the agent workflow:
//!
//! ```text
//! screener ──false──────────────────────────────┐
//!     │ needsDeepAnalysis                       │
//!     ▼                                         ▼
//! orchestrator ── 1-3 specialists (seq) ──► summarizer ──► SummaryReport
//! ```
//!
//! The coordinator never lets a stage failure escape: any inference error
//! becomes a well-formed degraded report. Only preflight checks (memory,
//! run lock, input validation) fail the call itself.

pub mod agents;
pub mod memory_guard;
pub mod progress;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::infer::SharedBackend;
use crate::types::{AnalysisRequest, CredError, Result, SpecialistReport, SummaryReport};

use agents::{
    OrchestratorAgent, ScreenerAgent, SpecialistAgent, SpecialistKind, SummarizerAgent,
};
use memory_guard::{LOW_MEMORY_FAILURE_HINT, MemoryGuard, MemoryStatus};
use progress::{ProgressSender, Stage, StageStatus};

// =============================================================================
// Cancellation
// =============================================================================

/// Cooperative cancellation flag, checked between stages.
///
/// A stage already in flight runs to completion; the pipeline stops
/// before dispatching the next one.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Runs the agent workflow for one request.
///
/// `run` is infallible by design: stage failures are contained here and
/// reported through the summary payload itself.
pub struct Coordinator {
    backend: SharedBackend,
    progress: ProgressSender,
}

impl Coordinator {
    pub fn new(backend: SharedBackend, progress: ProgressSender) -> Self {
        Self { backend, progress }
    }

    pub async fn run(&self, request: &AnalysisRequest, cancel: &CancelHandle) -> SummaryReport {
        info!("Starting analysis workflow");

        match self.run_stages(request, cancel).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("Analysis workflow failed: {}", e);
                SummaryReport::degraded("analysis_error", format!("Error during analysis: {}", e))
            }
        }
    }

    async fn run_stages(
        &self,
        request: &AnalysisRequest,
        cancel: &CancelHandle,
    ) -> Result<SummaryReport> {
        let backend = self.backend.as_ref();

        let verdict = self
            .run_step(Stage::Screener, ScreenerAgent::run(backend, request))
            .await?;

        let mut specialist_reports: Vec<(SpecialistKind, SpecialistReport)> = Vec::new();

        if verdict.needs_deep_analysis {
            if let Some(summary) = Self::cancelled(cancel) {
                return Ok(summary);
            }

            let plan = self
                .run_step(
                    Stage::Orchestrator,
                    OrchestratorAgent::run(backend, request, &verdict),
                )
                .await?;

            for id in &plan.selected_specialists {
                if let Some(summary) = Self::cancelled(cancel) {
                    return Ok(summary);
                }

                let kind: SpecialistKind = match id.parse() {
                    Ok(kind) => kind,
                    Err(_) => {
                        warn!("Specialist {} not found, skipping", id);
                        continue;
                    }
                };

                let agent = SpecialistAgent::new(kind);
                let report = self
                    .run_step(Stage::Specialist(kind), agent.run(backend, request))
                    .await?;
                specialist_reports.push((kind, report));
            }
        } else {
            info!("No deep analysis needed, skipping to summary");
        }

        if let Some(summary) = Self::cancelled(cancel) {
            return Ok(summary);
        }

        self.run_step(
            Stage::Summarizer,
            SummarizerAgent::run(backend, request, &verdict, &specialist_reports),
        )
        .await
    }

    /// Wrap one stage call with starting/complete/error progress events
    async fn run_step<T, F>(&self, stage: Stage, fut: F) -> Result<T>
    where
        T: Serialize,
        F: Future<Output = Result<T>>,
    {
        self.progress.send(stage, StageStatus::Starting, None);

        match fut.await {
            Ok(value) => {
                let payload = serde_json::to_value(&value).ok();
                self.progress.send(stage, StageStatus::Complete, payload);
                Ok(value)
            }
            Err(e) => {
                self.progress
                    .send(stage, StageStatus::Error, Some(Value::String(e.to_string())));
                Err(e)
            }
        }
    }

    fn cancelled(cancel: &CancelHandle) -> Option<SummaryReport> {
        if cancel.is_cancelled() {
            info!("Analysis cancelled between stages");
            Some(SummaryReport::degraded(
                "analysis_cancelled",
                "Analysis was cancelled before completion.",
            ))
        } else {
            None
        }
    }
}

// =============================================================================
// Analyzer Facade
// =============================================================================

/// Entry point for callers: preflight checks, then one pipeline run.
///
/// At most one analysis runs at a time; a second call while one is in
/// flight fails fast with `AnalysisInProgress`.
pub struct Analyzer {
    backend: SharedBackend,
    guard: MemoryGuard,
    progress: ProgressSender,
    busy: Mutex<()>,
}

impl Analyzer {
    pub fn new(backend: SharedBackend) -> Self {
        Self {
            backend,
            guard: MemoryGuard::new(),
            progress: ProgressSender::disabled(),
            busy: Mutex::new(()),
        }
    }

    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_memory_guard(mut self, guard: MemoryGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Analyze one text. Preflight failures return an error; everything
    /// past preflight resolves to a summary, degraded or not.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: &CancelHandle,
    ) -> Result<SummaryReport> {
        let _running = self
            .busy
            .try_lock()
            .map_err(|_| CredError::AnalysisInProgress)?;

        if let MemoryStatus::Critical { available_bytes } = self.guard.check() {
            return Err(CredError::InsufficientResources {
                free_bytes: available_bytes,
                message: memory_guard::LOW_MEMORY_WARNING.to_string(),
            });
        }

        let coordinator = Coordinator::new(Arc::clone(&self.backend), self.progress.clone());
        let mut summary = coordinator.run(request, cancel).await;

        // A failed run on a starved machine gets the memory explanation
        // instead of the generic retry advice.
        let failed = summary.credibility_score == 0.0
            && summary
                .potential_issues
                .iter()
                .any(|i| i.issue_type == "analysis_error");
        if failed && self.guard.check().is_critical() {
            warn!("Analysis failed while memory was critically low");
            summary.recommendation = LOW_MEMORY_FAILURE_HINT.to_string();
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Backend that fails every call
    struct DownBackend;

    #[async_trait]
    impl crate::infer::CompletionBackend for DownBackend {
        async fn complete(&self, _: &str, _: &str, _: &Value) -> Result<Value> {
            Err(CredError::InferenceUnavailable {
                endpoint: "http://127.0.0.1:8080".into(),
                message: "connection refused".into(),
            })
        }

        fn name(&self) -> &str {
            "down"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }
    }

    /// Backend that always answers with a clean screener pass + summary
    struct CleanBackend;

    #[async_trait]
    impl crate::infer::CompletionBackend for CleanBackend {
        async fn complete(&self, _: &str, user: &str, _: &Value) -> Result<Value> {
            if user.contains("needs deeper specialist analysis") {
                Ok(json!({"needsDeepAnalysis": false, "reasoning": "reliable"}))
            } else {
                Ok(json!({
                    "credibility_score": 8,
                    "potential_issues": [],
                    "recommendation": "content appears reliable"
                }))
            }
        }

        fn name(&self) -> &str {
            "clean"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("some text", None).unwrap()
    }

    #[tokio::test]
    async fn test_backend_failure_contained_as_degraded_summary() {
        let coordinator =
            Coordinator::new(Arc::new(DownBackend), ProgressSender::disabled());
        let summary = coordinator.run(&request(), &CancelHandle::new()).await;

        assert_eq!(summary.credibility_score, 0.0);
        assert_eq!(summary.potential_issues[0].issue_type, "analysis_error");
        assert!(
            summary.potential_issues[0]
                .explanation
                .starts_with("Error during analysis:")
        );
    }

    #[tokio::test]
    async fn test_cancel_before_start_yields_cancelled_summary() {
        let coordinator =
            Coordinator::new(Arc::new(CleanBackend), ProgressSender::disabled());
        let cancel = CancelHandle::new();
        cancel.cancel();

        // Screener still runs; the flag is honored before the next stage.
        let summary = coordinator.run(&request(), &cancel).await;
        assert_eq!(summary.potential_issues[0].issue_type, "analysis_cancelled");
    }

    #[tokio::test]
    async fn test_second_analyze_rejected_while_busy() {
        let analyzer = Analyzer::new(Arc::new(CleanBackend))
            .with_memory_guard(MemoryGuard::with_threshold(0));

        let _running = analyzer.busy.try_lock().unwrap();
        let err = analyzer
            .analyze(&request(), &CancelHandle::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CredError::AnalysisInProgress));
    }

    #[tokio::test]
    async fn test_analyze_fails_fast_when_memory_critical() {
        let analyzer = Analyzer::new(Arc::new(CleanBackend))
            .with_memory_guard(MemoryGuard::with_threshold(u64::MAX));

        let err = analyzer
            .analyze(&request(), &CancelHandle::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CredError::InsufficientResources { .. }));
    }

    /// Memory source that reports plenty for the preflight check, then
    /// drops to zero for every later reading
    struct StarvingSampler {
        calls: std::sync::atomic::AtomicU64,
    }

    impl memory_guard::MemorySampler for StarvingSampler {
        fn available_bytes(&self) -> u64 {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                u64::MAX
            } else {
                0
            }
        }
    }

    #[tokio::test]
    async fn test_failed_run_on_starved_machine_gets_memory_hint() {
        let sampler = Arc::new(StarvingSampler {
            calls: std::sync::atomic::AtomicU64::new(0),
        });
        let analyzer = Analyzer::new(Arc::new(DownBackend))
            .with_memory_guard(MemoryGuard::with_sampler(sampler));

        let summary = analyzer
            .analyze(&request(), &CancelHandle::new())
            .await
            .unwrap();
        assert_eq!(summary.potential_issues[0].issue_type, "analysis_error");
        assert_eq!(summary.recommendation, LOW_MEMORY_FAILURE_HINT);
    }

    #[tokio::test]
    async fn test_analyze_happy_path() {
        let analyzer = Analyzer::new(Arc::new(CleanBackend))
            .with_memory_guard(MemoryGuard::with_threshold(0));

        let summary = analyzer
            .analyze(&request(), &CancelHandle::new())
            .await
            .unwrap();
        assert_eq!(summary.credibility_score, 8.0);
        assert!(summary.potential_issues.is_empty());
    }
}
