use aiact_core::{AutonomyLevel, HarvestedRecord, RiskTier, SystemDescription};

use crate::search::Augmentation;

pub fn harvest_system_prompt() -> String {
    let autonomy = AutonomyLevel::ALL
        .iter()
        .map(|a| format!("\"{}\"", a.as_str()))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "You are an analyst preparing an EU AI Act assessment. Extract the facts about the AI system \
described by the user. Do not classify the system and do not give legal advice.\n\n\
Output ONLY a JSON object with exactly these keys:\n\
- \"sector\": industry or public-sector domain (e.g. \"Employment\", \"Healthcare\", \"Consumer\")\n\
- \"primary_purpose\": one sentence stating what the system does\n\
- \"deployment_context\": where it runs and for whom (e.g. \"Online service\", \"Workplace\", \
\"Public space\", \"In-vehicle system\")\n\
- \"user_base\": who uses it and who is affected by its outputs\n\
- \"autonomy\": one of {autonomy}\n\
- \"biometrics_involved\": true or false\n\
- \"biometrics_purpose\": \"identification\", \"categorisation\", \"emotion recognition\", \
\"authentication\", or null\n\
- \"high_risk_contexts\": array of sensitive contexts the system touches (safety-critical operation, \
critical infrastructure, education, employment, essential services, credit, law enforcement, migration, \
justice, elections); [] if none\n\
- \"data_categories\": array of data types processed (personal, biometric, health, financial, location, \
behavioural, sensitive attributes); [] if none\n\n\
Use only facts stated or clearly implied by the description. Every string must be non-empty; \
write \"Not stated\" when the description gives nothing.\n\
Output ONLY the JSON object, nothing else."
    )
}

pub fn harvest_user_message(desc: &SystemDescription) -> String {
    let mut out = String::with_capacity(desc.description.len() + 128);
    if !desc.name.trim().is_empty() {
        out.push_str("System name: ");
        out.push_str(desc.name.trim());
        out.push('\n');
    }
    if !desc.company.trim().is_empty() {
        out.push_str("Company: ");
        out.push_str(desc.company.trim());
        out.push('\n');
    }
    if let Some(sector) = desc.sector_hint.as_deref().filter(|s| !s.trim().is_empty()) {
        out.push_str("Sector (stated by user): ");
        out.push_str(sector.trim());
        out.push('\n');
    }
    out.push_str("Description:\n");
    out.push_str(desc.description.trim());
    out
}

pub fn classify_system_prompt() -> String {
    let tiers = RiskTier::ALL
        .iter()
        .map(|t| format!("\"{}\"", t.as_str()))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "You are an EU AI Act (Regulation (EU) 2024/1689) classification assistant. You receive a \
structured profile of an AI system and assign exactly one risk tier by applying the decision tree below.\n\n\
## Decision tree\n{}\n\n\
Output ONLY a JSON object:\n\
{{\"tier\": {tiers}, \
\"rationale\": \"<2-4 sentences explaining the decision>\", \
\"decision_branch\": \"<step or annex point that decided it, e.g. \\\"Annex III.4\\\">\", \
\"reasoning\": [\"<short fact-based reason>\", ...], \
\"provisions\": [\"<article or annex cited>\", ...], \
\"recommendations\": [\"<concrete compliance action>\", ...], \
\"confidence\": \"high\" | \"medium\" | \"low\"}}\n\n\
The \"tier\" value MUST be one of the five strings above, spelled exactly. \
Output ONLY the JSON object, nothing else.",
        aiact_core::rules::DECISION_TREE
    )
}

/// Convert a harvested record to a compact text representation for the classifier.
pub fn serialize_record(record: &HarvestedRecord) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("PROFILE:\n");
    push_line(&mut out, "sector", &record.sector);
    push_line(&mut out, "primary_purpose", &record.primary_purpose);
    push_line(&mut out, "deployment_context", &record.deployment_context);
    push_line(&mut out, "user_base", &record.user_base);
    push_line(&mut out, "autonomy", record.autonomy.as_str());
    let biometrics = match (record.biometrics_involved, record.biometrics_purpose.as_deref()) {
        (false, _) => "no".to_string(),
        (true, Some(p)) => format!("yes ({p})"),
        (true, None) => "yes (purpose not stated)".to_string(),
    };
    push_line(&mut out, "biometrics", &biometrics);
    push_line(&mut out, "high_risk_contexts", &join_or_none(&record.high_risk_contexts));
    push_line(&mut out, "data_categories", &join_or_none(&record.data_categories));
    out
}

const WEB_CONTEXT_HEADER: &str =
    "\nWEB CONTEXT (may be incomplete or unrelated; use it only to confirm stated facts):\n";

pub fn classify_user_message(record: &HarvestedRecord, augmentation: &Augmentation) -> String {
    let mut out = serialize_record(record);
    if !augmentation.context.is_empty() {
        out.push_str(WEB_CONTEXT_HEADER);
        out.push_str(&augmentation.context);
        out.push('\n');
    }
    out
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value.trim());
    out.push('\n');
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join("; ")
    }
}
