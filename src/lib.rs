//! CredLens - Local Credibility Analysis
//!
//! Multi-agent credibility analysis of short texts against a local
//! llama.cpp-style inference server. A screener triages the text, an
//! orchestrator picks up to three specialist analyses for flagged
//! content, and a summarizer folds everything into one scored report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use credlens::infer::{HttpBackend, InferenceConfig};
//! use credlens::pipeline::{Analyzer, CancelHandle};
//! use credlens::types::AnalysisRequest;
//!
//! # async fn example() -> credlens::types::Result<()> {
//! let backend = Arc::new(HttpBackend::new(InferenceConfig::default())?);
//! let analyzer = Analyzer::new(backend);
//!
//! let request = AnalysisRequest::new("Scientists say...", None)?;
//! let summary = analyzer.analyze(&request, &CancelHandle::new()).await?;
//! println!("score: {}", summary.credibility_score);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod infer;
pub mod pipeline;
pub mod types;

pub use pipeline::{Analyzer, CancelHandle, Coordinator};
pub use types::{AnalysisRequest, CredError, Result, SummaryReport};
