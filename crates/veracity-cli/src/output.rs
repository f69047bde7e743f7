//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veracity_domain::{AnalysisResult, ClaimVerdict, QualityGateStatus};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full analysis result.
    pub fn format_result(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            CliFormat::Text => Ok(self.format_text(result)),
        }
    }

    fn format_text(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();

        out.push_str(&self.overall_line(result));
        out.push('\n');

        if result.boundaries.len() > 1 {
            out.push('\n');
            out.push_str("Boundaries:\n");
            out.push_str(&self.boundaries_table(result));
            out.push('\n');
        }

        out.push('\n');
        out.push_str("Claims:\n");
        out.push_str(&self.claims_table(result));
        out.push('\n');

        if !result.warnings.is_empty() {
            out.push('\n');
            out.push_str("Warnings:\n");
            for warning in &result.warnings {
                out.push_str(&self.colorize(
                    &format!("  - [{:?}] {}\n", warning.stage, warning.message),
                    "yellow",
                ));
            }
        }

        out
    }

    fn overall_line(&self, result: &AnalysisResult) -> String {
        let overall = &result.overall;
        let line = match (overall.truth_percentage, overall.seven_point_label) {
            (Some(truth), Some(label)) => format!(
                "Overall: {} ({}%)  confidence {}  [{}]",
                label,
                truth,
                overall.confidence,
                gate_str(overall.quality_gate_status)
            ),
            _ => format!(
                "Overall: no verdict  [{}]",
                gate_str(overall.quality_gate_status)
            ),
        };
        self.colorize(&line, gate_color(overall.quality_gate_status))
    }

    fn boundaries_table(&self, result: &AnalysisResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Boundary", "Truth", "Verdict", "Confidence", "Gate"]);

        for boundary in &result.boundaries {
            let assessment = result
                .boundary_assessments
                .iter()
                .find(|a| a.boundary_id == boundary.id);

            let (truth, label, confidence, gate) = match assessment {
                Some(a) => (
                    a.truth_percentage
                        .map_or_else(|| "-".to_string(), |s| format!("{}%", s)),
                    a.label().map_or_else(|| "-".to_string(), |l| l.to_string()),
                    a.confidence.to_string(),
                    gate_str(a.quality_gate).to_string(),
                ),
                None => ("-".into(), "-".into(), "-".into(), "-".into()),
            };

            builder.push_record([boundary.label.clone(), truth, label, confidence, gate]);
        }

        styled(builder)
    }

    fn claims_table(&self, result: &AnalysisResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Claim", "Role", "Truth", "Verdict", "Rounds"]);

        for claim in &result.claims {
            let verdict = result.verdicts.iter().find(|v| v.claim_id == claim.id);
            let (truth, label, rounds) = match verdict {
                Some(v) => (
                    v.truth_percentage
                        .map_or_else(|| "-".to_string(), |s| format!("{}%", s)),
                    verdict_label(v),
                    v.debate_rounds_used.to_string(),
                ),
                None if claim.passed_gate1 => ("-".into(), "not assessed".into(), "-".into()),
                None => ("-".into(), "failed gate 1".into(), "-".into()),
            };

            builder.push_record([
                truncate(&claim.text, 60),
                claim.role.as_str().to_string(),
                truth,
                label,
                rounds,
            ]);
        }

        styled(builder)
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "red" => text.red().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn verdict_label(verdict: &ClaimVerdict) -> String {
    match verdict.label() {
        Some(label) => label.to_string(),
        None => match verdict.status {
            veracity_domain::VerdictStatus::InsufficientEvidence => "insufficient".to_string(),
            veracity_domain::VerdictStatus::Failed => "failed".to_string(),
            veracity_domain::VerdictStatus::Scored => "-".to_string(),
        },
    }
}

fn gate_str(status: QualityGateStatus) -> &'static str {
    match status {
        QualityGateStatus::Publishable => "publishable",
        QualityGateStatus::Flagged => "flagged",
        QualityGateStatus::InsufficientEvidence => "insufficient evidence",
    }
}

fn gate_color(status: QualityGateStatus) -> &'static str {
    match status {
        QualityGateStatus::Publishable => "green",
        QualityGateStatus::Flagged => "yellow",
        QualityGateStatus::InsufficientEvidence => "red",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{
        AnalysisWarning, AtomicClaim, ClaimId, ClaimRole, OverallAssessment, Score,
        SevenPointLabel, VerdictStatus, WarningStage,
    };

    fn scored_result() -> AnalysisResult {
        let claim_id = ClaimId::new();
        AnalysisResult {
            claims: vec![AtomicClaim {
                id: claim_id,
                text: "Acme seized the Port of Dover in 2021".to_string(),
                role: ClaimRole::Core,
                specificity_score: 0.8,
                opinion_score: 0.0,
                passed_gate1: true,
                central: true,
                recency_sensitive: false,
                boundary_id: None,
            }],
            evidence: Vec::new(),
            evidence_links: Vec::new(),
            sources: Vec::new(),
            boundaries: Vec::new(),
            verdicts: vec![ClaimVerdict {
                claim_id,
                status: VerdictStatus::Scored,
                truth_percentage: Some(Score::new(82)),
                confidence: Score::new(85),
                supporting_evidence_ids: Vec::new(),
                opposing_evidence_ids: Vec::new(),
                debate_rounds_used: 2,
                reasoning: "converged".to_string(),
            }],
            boundary_assessments: Vec::new(),
            overall: OverallAssessment {
                truth_percentage: Some(Score::new(82)),
                confidence: Score::new(85),
                seven_point_label: Some(SevenPointLabel::MostlyTrue),
                quality_gate_status: QualityGateStatus::Publishable,
            },
            warnings: vec![AnalysisWarning::new(
                WarningStage::Research,
                "source reliability unknown, used fallback",
            )],
        }
    }

    #[test]
    fn test_text_report_carries_verdict_and_warnings() {
        let formatter = Formatter::new(CliFormat::Text, false);
        let report = formatter.format_result(&scored_result()).unwrap();

        assert!(report.contains("MOSTLY-TRUE"));
        assert!(report.contains("82%"));
        assert!(report.contains("publishable"));
        assert!(report.contains("Port of Dover"));
        assert!(report.contains("reliability unknown"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let formatter = Formatter::new(CliFormat::Json, false);
        let json = formatter.format_result(&scored_result()).unwrap();

        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.overall.truth_percentage, Some(Score::new(82)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 60), "short");
        let long = "x".repeat(80);
        let cut = truncate(&long, 60);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 60);
    }
}
