//! Analyze Command
//!
//! Runs the full pipeline on text from an argument, a file, or stdin,
//! rendering progress as stages start and finish.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use tracing::debug;

use crate::cli::output::Output;
use crate::config::ConfigLoader;
use crate::infer::HttpBackend;
use crate::pipeline::progress::{self, ProgressReceiver, StageStatus};
use crate::pipeline::{Analyzer, CancelHandle};
use crate::types::{AnalysisRequest, CredError, Result, SummaryReport};

pub struct AnalyzeOptions {
    /// Inline text; read from `file` or stdin when absent
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub source: Option<String>,
    /// Output format: text, json
    pub format: String,
    pub quiet: bool,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let output = Output::new();

    if !matches!(options.format.as_str(), "text" | "json") {
        return Err(CredError::InvalidInput(format!(
            "unknown output format '{}', expected text or json",
            options.format
        )));
    }

    let text = read_input(&options)?;
    let request = AnalysisRequest::new(text, options.source.clone())?;

    let config = ConfigLoader::load()?;
    let backend = Arc::new(HttpBackend::new(config.inference.clone())?);

    let (tx, rx) = progress::channel();
    let mut analyzer = Analyzer::new(backend).with_progress(tx);
    if !config.analysis.memory_check {
        analyzer = analyzer.with_memory_guard(crate::pipeline::memory_guard::MemoryGuard::with_threshold(0));
    }

    let cancel = CancelHandle::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let render_progress = !options.quiet && options.format == "text";
    let progress_task = tokio::spawn(render_progress_events(rx, render_progress));

    let result = analyzer.analyze(&request, &cancel).await;

    // Dropping the analyzer closes the progress channel; drain the rest
    // before printing the report.
    drop(analyzer);
    let _ = progress_task.await;

    let summary = result?;

    if options.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&output, &request, &summary);
    }

    Ok(())
}

fn read_input(options: &AnalyzeOptions) -> Result<String> {
    if let Some(text) = &options.text {
        return Ok(text.clone());
    }

    if let Some(path) = &options.file {
        debug!("Reading input from {}", path.display());
        return Ok(std::fs::read_to_string(path)?);
    }

    debug!("Reading input from stdin");
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

async fn render_progress_events(mut rx: ProgressReceiver, render: bool) {
    while let Some(event) = rx.recv().await {
        if !render {
            continue;
        }
        match event.status {
            StageStatus::Starting => {
                println!("{} {}...", style("→").cyan(), event.stage);
            }
            StageStatus::Complete => {
                println!("{} {}", style("✓").green(), event.stage);
            }
            StageStatus::Error => {
                let detail = event
                    .result
                    .as_ref()
                    .and_then(|v| v.as_str())
                    .unwrap_or("failed");
                eprintln!("{} {}: {}", style("✗").red(), event.stage, detail);
            }
        }
    }
}

fn print_summary(output: &Output, request: &AnalysisRequest, summary: &SummaryReport) {
    output.header("Credibility Analysis");
    println!("Source: {}", request.source);

    output.score(summary.credibility_score);

    if summary.potential_issues.is_empty() {
        output.success("No credibility issues identified");
    } else {
        output.section("Potential Issues");
        for issue in &summary.potential_issues {
            output.issue(issue);
        }
    }

    if let Some(concerns) = &summary.key_concerns {
        if !concerns.is_empty() {
            output.section("Key Concerns");
            for concern in concerns {
                output.bullet(concern);
            }
        }
    }

    output.section("Recommendation");
    println!("  {}", summary.recommendation);
}
