use aiact_core::{ClassificationResult, Confidence, HarvestedRecord, RiskTier};

use crate::error::{ClassifyError, HarvestError};

/// Keys the harvest prompt asks for. All must be present in the model output;
/// `biometrics_purpose` may be null.
const HARVEST_FIELDS: [&str; 9] = [
    "sector",
    "primary_purpose",
    "deployment_context",
    "user_base",
    "autonomy",
    "biometrics_involved",
    "biometrics_purpose",
    "high_risk_contexts",
    "data_categories",
];

#[derive(serde::Deserialize)]
struct LlmVerdict {
    tier: serde_json::Value,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    decision_branch: Option<String>,
    #[serde(default)]
    reasoning: Vec<String>,
    #[serde(default)]
    provisions: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    confidence: Option<String>,
}

/// Extract the JSON object substring from raw LLM output.
/// Models wrap JSON in code fences or prose often enough that this is the norm.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse the harvest stage output. Never returns a partially populated record.
pub fn parse_harvest(raw: &str) -> Result<HarvestedRecord, HarvestError> {
    let malformed = |reason: String| HarvestError::Malformed {
        reason,
        raw: raw.to_string(),
    };

    let json_str = extract_json_object(raw)
        .ok_or_else(|| malformed("no JSON object in model output".to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| malformed(e.to_string()))?;
    record_from_value(value, raw)
}

/// Shape checks shared by model output and hand-corrected records.
/// `raw` is echoed back in errors.
pub fn record_from_value(
    value: serde_json::Value,
    raw: &str,
) -> Result<HarvestedRecord, HarvestError> {
    let malformed = |reason: String| HarvestError::Malformed {
        reason,
        raw: raw.to_string(),
    };
    let missing = |field: &str| HarvestError::MissingField {
        field: field.to_string(),
        raw: raw.to_string(),
    };

    let obj = value
        .as_object()
        .ok_or_else(|| malformed("expected a JSON object".to_string()))?;
    if let Some(field) = HARVEST_FIELDS.iter().find(|f| !obj.contains_key(**f)) {
        return Err(missing(field));
    }

    let mut record: HarvestedRecord =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    if let Some(field) = record.first_blank_field() {
        return Err(missing(field));
    }

    record.biometrics_purpose = record
        .biometrics_purpose
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    record.high_risk_contexts = clean_list(record.high_risk_contexts);
    record.data_categories = clean_list(record.data_categories);
    Ok(record)
}

/// Parse the classify stage output. The tier must be one of the five known
/// values; anything else is an error, never a best guess.
pub fn parse_classification(raw: &str) -> Result<ClassificationResult, ClassifyError> {
    let malformed = |reason: String| ClassifyError::Malformed {
        reason,
        raw: raw.to_string(),
    };

    let json_str = extract_json_object(raw)
        .ok_or_else(|| malformed("no JSON object in model output".to_string()))?;
    let verdict: LlmVerdict =
        serde_json::from_str(json_str).map_err(|e| malformed(e.to_string()))?;

    let tier_str = match &verdict.tier {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let tier: RiskTier = tier_str
        .parse()
        .map_err(|_| ClassifyError::UnrecognizedTier {
            tier: tier_str.clone(),
            raw: raw.to_string(),
        })?;

    let rationale = verdict.rationale.trim().to_string();
    if rationale.is_empty() {
        return Err(malformed("missing rationale".to_string()));
    }

    let reasoning = clean_list(verdict.reasoning);

    let mut relevant_provisions: Vec<String> =
        tier.provisions().iter().map(|p| p.to_string()).collect();
    for p in clean_list(verdict.provisions) {
        if !relevant_provisions.contains(&p) {
            relevant_provisions.push(p);
        }
    }

    let mut recommendations = clean_list(verdict.recommendations);
    if recommendations.is_empty() {
        recommendations = tier
            .default_recommendations()
            .iter()
            .map(|r| r.to_string())
            .collect();
    }

    let confidence = verdict
        .confidence
        .as_deref()
        .and_then(map_confidence)
        .unwrap_or_else(|| Confidence::from_reasoning_count(reasoning.len()));

    Ok(ClassificationResult {
        tier,
        rationale,
        decision_branch: verdict
            .decision_branch
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty()),
        reasoning,
        relevant_provisions,
        recommendations,
        confidence,
    })
}

fn map_confidence(s: &str) -> Option<Confidence> {
    match s.trim().to_ascii_lowercase().as_str() {
        "high" => Some(Confidence::High),
        "medium" => Some(Confidence::Medium),
        "low" => Some(Confidence::Low),
        _ => None,
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
