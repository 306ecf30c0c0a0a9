use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::{ClassificationResult, HarvestedRecord, SystemDescription};

const RULE: &str = "================================================================================";

/// Final output of one assessment: the input, the harvested facts and the tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub system: SystemDescription,
    pub profile: HarvestedRecord,
    pub classification: ClassificationResult,
    /// URLs consulted by search augmentation. Empty when search was off or failed.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// File name stem for downloads, e.g. "AI_Recruitment_Tool".
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .system
            .name
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            "ai_system".to_string()
        } else {
            stem
        }
    }

    /// Plain-text report used for the text download.
    pub fn to_text(&self) -> String {
        let c = &self.classification;
        let p = &self.profile;
        let mut out = String::with_capacity(2048);

        // Writing into a String cannot fail.
        let _ = writeln!(out, "EU AI ACT CLASSIFICATION REPORT");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out);
        let _ = writeln!(out, "System: {}", self.system.display_name());
        if !self.system.company.trim().is_empty() {
            let _ = writeln!(out, "Company: {}", self.system.company.trim());
        }
        let _ = writeln!(out, "Date: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out);
        let _ = writeln!(out, "CLASSIFICATION: {}", c.tier.label());
        let _ = writeln!(out, "Confidence: {}", c.confidence.label());
        if let Some(branch) = &c.decision_branch {
            let _ = writeln!(out, "Decision branch: {branch}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "SYSTEM PROFILE:");
        let _ = writeln!(out, "- Sector: {}", p.sector);
        let _ = writeln!(out, "- Purpose: {}", p.primary_purpose);
        let _ = writeln!(out, "- Deployment: {}", p.deployment_context);
        let _ = writeln!(out, "- User base: {}", p.user_base);
        let _ = writeln!(out, "- Decision role: {}", p.autonomy.label());
        if p.biometrics_involved {
            let purpose = p.biometrics_purpose.as_deref().unwrap_or("unspecified");
            let _ = writeln!(out, "- Biometrics: yes ({purpose})");
        }
        if !p.high_risk_contexts.is_empty() {
            let _ = writeln!(out, "- High-risk contexts: {}", p.high_risk_contexts.join(", "));
        }
        if !p.data_categories.is_empty() {
            let _ = writeln!(out, "- Data processed: {}", p.data_categories.join(", "));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "RATIONALE:");
        let _ = writeln!(out, "{}", c.rationale.trim());
        let _ = writeln!(out);

        let _ = writeln!(out, "REASONING:");
        for (i, r) in c.reasoning.iter().enumerate() {
            let _ = writeln!(out, "{}. {r}", i + 1);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "RELEVANT PROVISIONS:");
        for a in &c.relevant_provisions {
            let _ = writeln!(out, "- {a}");
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "RECOMMENDATIONS:");
        for (i, r) in c.recommendations.iter().enumerate() {
            let _ = writeln!(out, "{}. {r}", i + 1);
        }

        if !self.sources.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "SOURCES ({} web sources consulted):", self.sources.len());
            for s in &self.sources {
                let _ = writeln!(out, "- {s}");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(
            out,
            "This is a preliminary assessment. Consult legal professionals for compliance."
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AutonomyLevel, Confidence, RiskTier};
    use chrono::TimeZone;

    fn report() -> Report {
        Report {
            generated_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap(),
            system: SystemDescription {
                description: "Screens and ranks job applications for interview selection.".into(),
                name: "AI Recruitment Tool".into(),
                company: "HireTech Inc".into(),
                sector_hint: None,
                enable_search: false,
            },
            profile: HarvestedRecord {
                sector: "Employment".into(),
                primary_purpose: "Rank candidates for interview".into(),
                deployment_context: "Workplace".into(),
                user_base: "Employees and workers".into(),
                autonomy: AutonomyLevel::DecisionSupport,
                biometrics_involved: false,
                biometrics_purpose: None,
                high_risk_contexts: vec!["Employment decision".into()],
                data_categories: vec!["Personal data".into()],
            },
            classification: ClassificationResult {
                tier: RiskTier::HighRisk,
                rationale: "Ranking applicants is an Annex III.4 employment use case.".into(),
                decision_branch: Some("Annex III.4".into()),
                reasoning: vec!["Filters and ranks job applications".into()],
                relevant_provisions: vec!["Article 6 & Annex III".into()],
                recommendations: vec!["Human-in-the-loop for decisions".into()],
                confidence: Confidence::Low,
            },
            sources: vec![],
        }
    }

    #[test]
    fn file_stem_replaces_spaces_and_punctuation() {
        let mut r = report();
        assert_eq!(r.file_stem(), "AI_Recruitment_Tool");
        r.system.name = "Hire/Bot v2".into();
        assert_eq!(r.file_stem(), "Hire_Bot_v2");
        r.system.name = "  ".into();
        assert_eq!(r.file_stem(), "ai_system");
    }

    #[test]
    fn text_report_has_expected_sections() {
        let text = report().to_text();
        assert!(text.starts_with("EU AI ACT CLASSIFICATION REPORT\n"));
        assert!(text.contains("System: AI Recruitment Tool\nCompany: HireTech Inc\n"));
        assert!(text.contains("Date: 2026-02-01 09:30:00 UTC"));
        assert!(
            text.contains("CLASSIFICATION: High-Risk\nConfidence: Low\nDecision branch: Annex III.4")
        );
        assert!(text.contains("- High-risk contexts: Employment decision"));
        assert!(text.contains("REASONING:\n1. Filters and ranks job applications\n"));
        assert!(text.contains("RECOMMENDATIONS:\n1. Human-in-the-loop for decisions\n"));
        assert!(!text.contains("SOURCES"));
        assert!(text.trim_end().ends_with("Consult legal professionals for compliance."));
    }

    #[test]
    fn json_export_uses_canonical_tier_and_camel_case() {
        let json = report().to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["classification"]["tier"], "high-risk");
        assert_eq!(v["classification"]["confidence"], "low");
        assert_eq!(v["profile"]["autonomy"], "decision_support");
        assert_eq!(v["system"]["name"], "AI Recruitment Tool");
        assert!(v["generatedAt"].as_str().unwrap().starts_with("2026-02-01T09:30:00"));
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report());
    }
}
