//! Progress Reporting
//!
//! Stage-by-stage progress events over an unbounded channel. Sending is
//! fire-and-forget: a dropped or slow receiver never stalls or fails the
//! pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::pipeline::agents::SpecialistKind;

/// Pipeline stage a progress event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Screener,
    Orchestrator,
    Specialist(SpecialistKind),
    Summarizer,
}

impl Stage {
    /// Wire label, matching the stage identifiers used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Screener => "screener",
            Stage::Orchestrator => "orchestrator",
            Stage::Specialist(kind) => kind.id(),
            Stage::Summarizer => "summarizer",
        }
    }
}

/// Status of a stage within one run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Starting,
    Complete,
    Error,
}

/// One progress update
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    /// Stage label ("screener", "logical_fallacy", ...)
    pub stage: String,
    pub status: StageStatus,
    /// Stage output for `Complete`, error text for `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Receiving end handed to the caller
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Create a progress channel
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx: Some(tx) }, rx)
}

/// Sending end owned by the pipeline. `disabled()` makes every send a
/// no-op for callers that do not care about progress.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressSender {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn send(&self, stage: Stage, status: StageStatus, result: Option<Value>) {
        debug!("Progress update: {} - {:?}", stage.label(), status);

        if let Some(tx) = &self.tx {
            // Receiver may already be gone; that is not an error.
            let _ = tx.send(ProgressEvent {
                stage: stage.label().to_string(),
                status,
                result,
                timestamp: Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::Screener.label(), "screener");
        assert_eq!(
            Stage::Specialist(SpecialistKind::LogicalFallacy).label(),
            "logical_fallacy"
        );
    }

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (tx, mut rx) = channel();
        tx.send(Stage::Screener, StageStatus::Starting, None);
        tx.send(
            Stage::Screener,
            StageStatus::Complete,
            Some(json!({"needsDeepAnalysis": false})),
        );

        let first = rx.recv().await.unwrap();
        assert_eq!(first.stage, "screener");
        assert_eq!(first.status, StageStatus::Starting);
        assert!(first.result.is_none());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.status, StageStatus::Complete);
        assert!(second.result.is_some());
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        tx.send(Stage::Summarizer, StageStatus::Complete, None);
    }

    #[test]
    fn test_disabled_sender_is_noop() {
        let tx = ProgressSender::disabled();
        tx.send(Stage::Screener, StageStatus::Starting, None);
    }
}
