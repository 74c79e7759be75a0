//! Stage Prompts
//!
//! System and user prompts for every pipeline stage. The wording is
//! tuned for small local models: explicit task lists, explicit JSON
//! shapes, and guardrails against inventing issues.

use crate::pipeline::agents::SpecialistKind;
use crate::types::{AnalysisRequest, ScreenerVerdict, SpecialistReport};

pub struct StagePrompts;

impl StagePrompts {
    // -------------------------------------------------------------------------
    // Screener
    // -------------------------------------------------------------------------

    pub fn screener_system() -> &'static str {
        "You are a text screener who quickly evaluates if content needs deeper \
         analysis for misinformation, bias, manipulation tactics, or credibility \
         issues. You only flag content that genuinely needs deeper review."
    }

    pub fn screener_user(request: &AnalysisRequest) -> String {
        format!(
            r#"Analyze this text and determine if it needs deeper analysis for potential misinformation, manipulation, bias, or credibility issues.

Source: {source}
Text: "{text}"

Your task is to:
1. Make a quick assessment of whether this content needs deeper specialist analysis
2. Provide an initial credibility score (0-10)
3. List which specialist analyses might be needed (choose from: cognitive_bias, emotional_manipulation, logical_fallacy, source_credibility, technical_accuracy)
4. Explain your reasoning

Respond in this JSON format:
{{
  "needsDeepAnalysis": boolean,
  "initial_score": number,
  "suggested_specialists": string[],
  "reasoning": string
}}

If the content is clearly reliable, well-sourced information without manipulation tactics, respond with 'needsDeepAnalysis: false'."#,
            source = request.source,
            text = request.text,
        )
    }

    // -------------------------------------------------------------------------
    // Orchestrator
    // -------------------------------------------------------------------------

    pub fn orchestrator_system() -> &'static str {
        "You are an orchestrator who determines which specialist analysis agents \
         should be used to evaluate potentially problematic content. You select \
         specialists based on the content and initial screening results."
    }

    pub fn orchestrator_user(request: &AnalysisRequest, verdict: &ScreenerVerdict) -> String {
        let verdict_json = serde_json::to_string_pretty(verdict)
            .unwrap_or_else(|_| "(screening result unavailable)".to_string());

        format!(
            r#"Based on the initial screening of this text, determine which specialist analyzers should be used.

Source: {source}
Text: "{text}"

Initial screening result:
{verdict_json}

Available specialists:
- cognitive_bias: Identifies cognitive biases in content
- emotional_manipulation: Detects emotional manipulation tactics
- logical_fallacy: Identifies logical fallacies and reasoning errors
- source_credibility: Evaluates source reliability and authority
- technical_accuracy: Checks factual and technical accuracy of claims

You must select at least one specialist and at most three specialists that would be most effective for analyzing this content.

Respond in this JSON format:
{{
  "selected_specialists": string[],
  "reasoning": string
}}

Be specific about why each selected specialist is appropriate for this content."#,
            source = request.source,
            text = request.text,
        )
    }

    // -------------------------------------------------------------------------
    // Specialists
    // -------------------------------------------------------------------------

    pub fn specialist_system(kind: SpecialistKind) -> &'static str {
        match kind {
            SpecialistKind::CognitiveBias => {
                "You are a cognitive bias specialist who identifies how content may \
                 leverage or exhibit cognitive biases. Your goal is to help readers \
                 recognize when their cognitive biases might be exploited."
            }
            SpecialistKind::EmotionalManipulation => {
                "You are an emotional manipulation specialist who identifies how \
                 content may use emotional appeals to manipulate readers. Your goal \
                 is to help readers recognize when their emotions are being leveraged \
                 to influence their thinking."
            }
            SpecialistKind::LogicalFallacy => {
                "You are a logical fallacy specialist who identifies flawed reasoning \
                 and arguments in content. Your goal is to help readers recognize \
                 invalid arguments and reasoning patterns."
            }
            SpecialistKind::SourceCredibility => {
                "You are a source credibility specialist who evaluates the reliability \
                 and authority of content sources. Your goal is to help readers \
                 understand the credibility of information sources."
            }
            SpecialistKind::TechnicalAccuracy => {
                "You are a technical accuracy specialist who evaluates factual claims \
                 and technical details in content. Your goal is to help readers \
                 identify potential factual errors or misrepresentations."
            }
        }
    }

    pub fn specialist_user(kind: SpecialistKind, request: &AnalysisRequest) -> String {
        let (task, factors, severity_guide, closing) = match kind {
            SpecialistKind::CognitiveBias => (
                "Analyze this text for cognitive biases. Identify only clear examples of cognitive biases with specific textual evidence.",
                "Consider these cognitive biases:\n\
                 - Confirmation bias: Favoring information confirming existing beliefs\n\
                 - Authority bias: Trusting claims based on source, not evidence\n\
                 - Bandwagon effect: Appeal to popularity instead of merit\n\
                 - Framing effect: Using specific presentation to influence interpretation\n\
                 - Other relevant cognitive biases",
                "- Low: Subtle bias unlikely to affect core message\n\
                 - Medium: Noticeable bias that influences but doesn't dominate reasoning\n\
                 - High: Significant bias that fundamentally undermines objectivity",
                "Only identify biases with clear textual evidence. Regular persuasion is not automatically bias.",
            ),
            SpecialistKind::EmotionalManipulation => (
                "Analyze this text for emotional manipulation tactics. Identify only clear instances where emotions are leveraged to bypass rational thinking.",
                "Consider these manipulation tactics:\n\
                 - Fear-mongering: Exaggerating threats to provoke anxiety\n\
                 - Appeal to anger/outrage: Inflaming indignation beyond what facts warrant\n\
                 - Guilt-tripping: Inducing unwarranted guilt to influence behavior\n\
                 - Urgency creation: Artificial time pressure to force hasty decisions\n\
                 - Other emotional manipulation techniques",
                "- Low: Mild emotional appeal that doesn't distort facts\n\
                 - Medium: Notable emotional leverage that partially obscures rational assessment\n\
                 - High: Strong emotional manipulation that overwhelms factual content",
                "Important: Not all emotional content is manipulative. Only flag tactics that appear designed to circumvent rational judgment or distort understanding.",
            ),
            SpecialistKind::LogicalFallacy => (
                "Analyze this text for logical fallacies and flawed reasoning. Identify only fallacies present in actual arguments (not descriptions or quotations).",
                "Consider these common fallacies:\n\
                 - Straw man: Misrepresenting an opponent's argument to make it easier to attack\n\
                 - False dichotomy: Presenting only two options when others exist\n\
                 - Ad hominem: Attacking the person instead of addressing their argument\n\
                 - Slippery slope: Claiming one event will lead to extreme outcomes without evidence\n\
                 - False cause: Assuming correlation implies causation",
                "- Low: Minor reasoning flaw that doesn't undermine the main argument\n\
                 - Medium: Significant flaw that weakens but doesn't invalidate the entire argument\n\
                 - High: Critical flaw that invalidates the central reasoning",
                "Important: Only identify fallacies in actual arguments. Descriptive text, quotations of others' views, or non-argumentative content should not be flagged as containing fallacies.",
            ),
            SpecialistKind::SourceCredibility => (
                "Analyze this text for source credibility issues. Evaluate how sources are used, cited, or represented, considering the content type.",
                "Consider these credibility factors:\n\
                 - Attribution clarity: Are claims properly attributed to specific sources?\n\
                 - Source expertise: Do cited sources have relevant expertise for their claims?\n\
                 - Citation completeness: Is there sufficient sourcing for key claims?\n\
                 - Source diversity: Are multiple perspectives or sources considered?\n\
                 - Transparency: Is the author/publisher clearly identified?",
                "- Low: Minor attribution issues that don't affect key claims\n\
                 - Medium: Notable sourcing problems that affect some important claims\n\
                 - High: Critical source issues that undermine core reliability",
                "Note: Consider context appropriately. News articles, academic papers, and social media have different citation standards. Self-evident claims or personal experiences may not require external sourcing.",
            ),
            SpecialistKind::TechnicalAccuracy => (
                "Analyze this text for technical accuracy issues. Evaluate factual claims, statistics, and technical details within your knowledge domain.",
                "Consider these accuracy factors:\n\
                 - Statistical integrity: Are statistics presented accurately and in proper context?\n\
                 - Causality claims: Are cause-effect relationships properly established or overstated?\n\
                 - Data selection: Is evidence cherry-picked or representative?\n\
                 - Technical terminology: Are specialized terms used correctly?\n\
                 - Complexity handling: Are complex topics explained appropriately or oversimplified?",
                "- Low: Minor inaccuracies that don't affect main conclusions\n\
                 - Medium: Notable issues that partially undermine key points\n\
                 - High: Critical errors that fundamentally misrepresent important facts",
                "Note: Consider the audience and purpose of the content. Technical writing for experts has different standards than general audience material. Only flag issues you can confidently identify based on the text.",
            ),
        };

        format!(
            r#"{task}

Source: {source}
Text: "{text}"

{factors}

Severity guide:
{severity_guide}

Respond in this JSON format:
{{
  "{issue_field}": [
    {{
      "{label_field}": string,
      "explanation": string,
      "severity": "low"|"medium"|"high",
      "example_from_text": string
    }}
  ],
  "overall_assessment": string,
  "recommendation": string
}}

{closing}"#,
            source = request.source,
            text = request.text,
            issue_field = kind.issue_field(),
            label_field = kind.label_field(),
        )
    }

    // -------------------------------------------------------------------------
    // Summarizer
    // -------------------------------------------------------------------------

    pub fn summarizer_system() -> &'static str {
        "You are a summarizer who creates comprehensive analysis reports by \
         combining screening results and specialist analyses. You provide clear, \
         concise summaries with actionable recommendations without inventing \
         problems where none exist."
    }

    pub fn summarizer_user(
        request: &AnalysisRequest,
        verdict: &ScreenerVerdict,
        specialist_reports: &[(SpecialistKind, SpecialistReport)],
    ) -> String {
        let verdict_json = serde_json::to_string_pretty(verdict)
            .unwrap_or_else(|_| "(screening result unavailable)".to_string());

        let specialist_section = if specialist_reports.is_empty() {
            "No specialist analyses were conducted.".to_string()
        } else {
            let analyses = specialist_reports
                .iter()
                .map(|(kind, report)| {
                    format!(
                        "{} Analysis:\n{}",
                        kind.display_name(),
                        serde_json::to_string_pretty(report)
                            .unwrap_or_else(|_| "(unavailable)".to_string())
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("Specialist Analyses:\n{}", analyses)
        };

        format!(
            r#"Create a comprehensive summary of the credibility of this content based on all analyses.

Source: {source}
Text: "{text}"

Screener Result:
{verdict_json}

{specialist_section}

Important: If the screener determined no deeper analysis was needed (needsDeepAnalysis: false) and the content appears reliable, do NOT manufacture potential issues. For highly credible content, it's perfectly acceptable to report zero issues.

Synthesize all analyses into one clear assessment. When specialists disagree, weigh the evidence and reasoning from each to determine the most accurate conclusion.

Your summary must include:
1. A final credibility score (0-10):
   * 0-3: Significant credibility issues, generally unreliable
   * 4-6: Mixed credibility, some valuable content alongside issues
   * 7-10: Generally reliable, follows good information practices

2. A list of potential issues identified, ordered by severity (if any exist):
   * Only include actual credibility problems, not contextual information
   * Prioritize issues that substantially impact credibility
   * Include specific examples from the text where possible
   * Consolidate similar issues raised by different specialists

3. A clear, actionable recommendation for the reader that:
   * Offers specific guidance based on content type
   * Provides concrete steps for verification if needed
   * Considers the source's overall reliability

Respond in this JSON format:
{{
  "credibility_score": number,
  "potential_issues": [
    {{
      "type": string,
      "explanation": string,
      "severity": "low"|"medium"|"high"
    }}
  ],
  "recommendation": string
}}"#,
            source = request.source,
            text = request.text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("The sky is falling!", Some("example.com".into())).unwrap()
    }

    #[test]
    fn test_screener_prompt_includes_input() {
        let prompt = StagePrompts::screener_user(&request());
        assert!(prompt.contains("Source: example.com"));
        assert!(prompt.contains("The sky is falling!"));
        assert!(prompt.contains("needsDeepAnalysis"));
    }

    #[test]
    fn test_orchestrator_prompt_embeds_verdict() {
        let verdict = ScreenerVerdict {
            needs_deep_analysis: true,
            reasoning: "alarmist framing".into(),
            initial_score: None,
            suggested_specialists: None,
        };
        let prompt = StagePrompts::orchestrator_user(&request(), &verdict);
        assert!(prompt.contains("alarmist framing"));
        assert!(prompt.contains("at least one specialist and at most three"));
    }

    #[test]
    fn test_specialist_prompts_use_own_fields() {
        let prompt = StagePrompts::specialist_user(SpecialistKind::LogicalFallacy, &request());
        assert!(prompt.contains("fallacies_identified"));
        assert!(prompt.contains("fallacy_type"));
        assert!(prompt.contains("Straw man"));

        let prompt =
            StagePrompts::specialist_user(SpecialistKind::EmotionalManipulation, &request());
        assert!(prompt.contains("manipulation_tactics"));
        assert!(prompt.contains("Fear-mongering"));
    }

    #[test]
    fn test_summarizer_prompt_without_specialists() {
        let verdict = ScreenerVerdict {
            needs_deep_analysis: false,
            reasoning: "well-sourced".into(),
            initial_score: Some(8.0),
            suggested_specialists: None,
        };
        let prompt = StagePrompts::summarizer_user(&request(), &verdict, &[]);
        assert!(prompt.contains("No specialist analyses were conducted."));
        assert!(prompt.contains("do NOT manufacture potential issues"));
    }

    #[test]
    fn test_summarizer_prompt_with_specialists() {
        let verdict = ScreenerVerdict {
            needs_deep_analysis: true,
            reasoning: "emotive".into(),
            initial_score: None,
            suggested_specialists: None,
        };
        let report = SpecialistReport {
            findings: vec![],
            overall_assessment: "heavily manipulative".into(),
            recommendation: "verify independently".into(),
        };
        let prompt = StagePrompts::summarizer_user(
            &request(),
            &verdict,
            &[(SpecialistKind::EmotionalManipulation, report)],
        );
        assert!(prompt.contains("EmotionalManipulation Analysis:"));
        assert!(prompt.contains("heavily manipulative"));
    }
}
