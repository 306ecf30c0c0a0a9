pub mod report;
pub mod rules;
pub mod samples;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use report::Report;
pub use settings::{ai_configured, AiSettings, SearchSettings, Settings};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("description is empty")]
    EmptyDescription,

    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

// --- Input ---

/// What the user typed into the form. Only `description` is required.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemDescription {
    pub description: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    /// `None` means auto-detect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_hint: Option<String>,
    #[serde(default)]
    pub enable_search: bool,
}

impl SystemDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::EmptyDescription);
        }
        Ok(())
    }

    /// Display name used in reports, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "Unnamed AI system"
        } else {
            name
        }
    }
}

// --- Harvested facts ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AutonomyLevel {
    Informational,
    Assistive,
    DecisionSupport,
    AutomatedDecision,
}

impl AutonomyLevel {
    pub const ALL: [AutonomyLevel; 4] = [
        AutonomyLevel::Informational,
        AutonomyLevel::Assistive,
        AutonomyLevel::DecisionSupport,
        AutonomyLevel::AutomatedDecision,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AutonomyLevel::Informational => "informational",
            AutonomyLevel::Assistive => "assistive",
            AutonomyLevel::DecisionSupport => "decision_support",
            AutonomyLevel::AutomatedDecision => "automated_decision",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AutonomyLevel::Informational => "Informational",
            AutonomyLevel::Assistive => "Assistive/Recommendatory",
            AutonomyLevel::DecisionSupport => "Decision support",
            AutonomyLevel::AutomatedDecision => "Fully automated decision",
        }
    }
}

/// Structured profile extracted from a [`SystemDescription`] by the harvester.
/// Every field is required; the parser rejects records with blanks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestedRecord {
    pub sector: String,
    pub primary_purpose: String,
    pub deployment_context: String,
    pub user_base: String,
    pub autonomy: AutonomyLevel,
    pub biometrics_involved: bool,
    pub biometrics_purpose: Option<String>,
    pub high_risk_contexts: Vec<String>,
    pub data_categories: Vec<String>,
}

impl HarvestedRecord {
    /// Name of the first required text field that is blank, if any.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("sector", &self.sector),
            ("primary_purpose", &self.primary_purpose),
            ("deployment_context", &self.deployment_context),
            ("user_base", &self.user_base),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
    }
}

// --- Classification ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    Prohibited,
    HighRisk,
    Transparency,
    LowRisk,
    Exception,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized risk tier: {0:?}")]
pub struct UnknownTier(pub String);

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Prohibited,
        RiskTier::HighRisk,
        RiskTier::Transparency,
        RiskTier::LowRisk,
        RiskTier::Exception,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Prohibited => "prohibited",
            RiskTier::HighRisk => "high-risk",
            RiskTier::Transparency => "transparency",
            RiskTier::LowRisk => "low-risk",
            RiskTier::Exception => "exception",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Prohibited => "Prohibited",
            RiskTier::HighRisk => "High-Risk",
            RiskTier::Transparency => "Additional Transparency Requirements",
            RiskTier::LowRisk => "Low-Risk",
            RiskTier::Exception => "Exception",
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            RiskTier::Prohibited => "🚫",
            RiskTier::HighRisk => "⚠️",
            RiskTier::Transparency => "ℹ️",
            RiskTier::LowRisk => "✅",
            RiskTier::Exception => "➖",
        }
    }

    /// Provisions that always apply to a tier, independent of model citations.
    pub fn provisions(self) -> &'static [&'static str] {
        match self {
            RiskTier::Prohibited => &["Article 5 - Prohibited Practices"],
            RiskTier::HighRisk => &["Article 6 & Annex III", "Articles 8-15 - Requirements"],
            RiskTier::Transparency => &["Article 50 - Transparency"],
            RiskTier::LowRisk => &["Article 95 - Codes of Conduct (voluntary)"],
            RiskTier::Exception => &["Article 2 - Scope exceptions"],
        }
    }

    /// Guidance shown when the model gives no recommendations of its own.
    pub fn default_recommendations(self) -> &'static [&'static str] {
        match self {
            RiskTier::Prohibited => &[
                "Do not place the system on the EU market or put it into service",
                "Seek legal advice on redesigning the system outside Article 5",
            ],
            RiskTier::HighRisk => &[
                "Implement risk management system (Article 9)",
                "Ensure high-quality training data (Article 10)",
                "Maintain technical documentation (Article 11)",
                "Enable logging and traceability (Article 12)",
                "Implement human oversight (Article 14)",
                "Ensure accuracy and robustness (Article 15)",
                "Undergo conformity assessment (Article 43)",
                "Register in EU database (Article 71)",
            ],
            RiskTier::Transparency => &[
                "Disclose AI interaction to users",
                "Label AI-generated content",
            ],
            RiskTier::LowRisk | RiskTier::Exception => &["Monitor regulatory developments"],
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = UnknownTier;

    /// Accepts canonical labels, display labels, and case or separator
    /// variants of them. Anything else is an error.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let norm: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        RiskTier::ALL
            .into_iter()
            .find(|t| {
                norm == t.as_str() || norm == t.label().to_ascii_lowercase().replace(' ', "-")
            })
            .ok_or_else(|| UnknownTier(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Fallback used when the model does not state its confidence.
    pub fn from_reasoning_count(n: usize) -> Self {
        match n {
            n if n >= 3 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    pub tier: RiskTier,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_branch: Option<String>,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub relevant_provisions: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
}

// --- Search ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSnippet {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_canonical_and_display_labels() {
        assert_eq!("high-risk".parse::<RiskTier>().unwrap(), RiskTier::HighRisk);
        assert_eq!("High-Risk".parse::<RiskTier>().unwrap(), RiskTier::HighRisk);
        assert_eq!("HIGH_RISK".parse::<RiskTier>().unwrap(), RiskTier::HighRisk);
        assert_eq!("low risk".parse::<RiskTier>().unwrap(), RiskTier::LowRisk);
        assert_eq!(" prohibited ".parse::<RiskTier>().unwrap(), RiskTier::Prohibited);
        assert_eq!(
            "Additional Transparency Requirements".parse::<RiskTier>().unwrap(),
            RiskTier::Transparency
        );
    }

    #[test]
    fn tier_rejects_values_outside_closed_set() {
        for raw in ["GPAI Requirements", "medium", "high", "", "minimal-risk", "unacceptable"] {
            assert_eq!(raw.parse::<RiskTier>(), Err(UnknownTier(raw.to_string())), "{raw}");
        }
    }

    #[test]
    fn tier_serializes_as_canonical_label() {
        let json = serde_json::to_string(&RiskTier::HighRisk).unwrap();
        assert_eq!(json, "\"high-risk\"");
        for tier in RiskTier::ALL {
            assert_eq!(tier.as_str().parse::<RiskTier>().unwrap(), tier);
        }
    }

    #[test]
    fn confidence_fallback_counts_reasons() {
        assert_eq!(Confidence::from_reasoning_count(0), Confidence::Low);
        assert_eq!(Confidence::from_reasoning_count(1), Confidence::Low);
        assert_eq!(Confidence::from_reasoning_count(2), Confidence::Medium);
        assert_eq!(Confidence::from_reasoning_count(5), Confidence::High);
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(SystemDescription::new("   \n").validate().is_err());
        assert!(SystemDescription::new("A recipe chatbot").validate().is_ok());
    }

    fn recipe_record() -> HarvestedRecord {
        HarvestedRecord {
            sector: "Consumer".into(),
            primary_purpose: "Recommend recipes from pantry items".into(),
            deployment_context: "Online service".into(),
            user_base: "General consumers".into(),
            autonomy: AutonomyLevel::Assistive,
            biometrics_involved: false,
            biometrics_purpose: None,
            high_risk_contexts: vec![],
            data_categories: vec!["Personal data".into()],
        }
    }

    #[test]
    fn first_blank_field_reports_whitespace_only_values() {
        let mut rec = recipe_record();
        assert_eq!(rec.first_blank_field(), None);
        rec.user_base = "  ".into();
        assert_eq!(rec.first_blank_field(), Some("user_base"));
    }
}
