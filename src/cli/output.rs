//! Terminal Output
//!
//! Styled rendering for analysis reports and status lines. Score and
//! severity coloring follows the summarizer's rubric so the terminal
//! bands match the numbers it explains.

use console::{Style, style};

use crate::types::{Issue, Severity};

/// Score band per the summarizer's rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 7-10: generally reliable
    Reliable,
    /// 4-6: mixed credibility
    Mixed,
    /// 0-3: significant credibility issues
    Unreliable,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::Reliable
        } else if score >= 4.0 {
            ScoreBand::Mixed
        } else {
            ScoreBand::Unreliable
        }
    }

    fn style(&self) -> Style {
        match self {
            ScoreBand::Reliable => Style::new().green().bold(),
            ScoreBand::Mixed => Style::new().yellow().bold(),
            ScoreBand::Unreliable => Style::new().red().bold(),
        }
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::High => Style::new().red(),
        Severity::Medium => Style::new().yellow(),
        Severity::Low => Style::new().dim(),
    }
}

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Render the credibility score line, colored by band
    pub fn score(&self, score: f64) {
        let styled = ScoreBand::of(score)
            .style()
            .apply_to(format!("{:.1}/10", score));
        println!("Score:  {}", styled);
    }

    /// Render one issue with its severity tag
    pub fn issue(&self, issue: &Issue) {
        let severity = severity_style(issue.severity).apply_to(issue.severity.to_string());
        println!("  [{}] {}", severity, style(&issue.issue_type).bold());
        println!("        {}", issue.explanation);
    }

    pub fn bullet(&self, message: &str) {
        println!("  • {}", message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands_follow_rubric() {
        assert_eq!(ScoreBand::of(10.0), ScoreBand::Reliable);
        assert_eq!(ScoreBand::of(7.0), ScoreBand::Reliable);
        assert_eq!(ScoreBand::of(6.9), ScoreBand::Mixed);
        assert_eq!(ScoreBand::of(4.0), ScoreBand::Mixed);
        assert_eq!(ScoreBand::of(3.9), ScoreBand::Unreliable);
        assert_eq!(ScoreBand::of(0.0), ScoreBand::Unreliable);
    }
}
