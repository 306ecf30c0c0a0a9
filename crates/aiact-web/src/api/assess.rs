use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use aiact_classify::error::AssessError;
use aiact_classify::search::Augmentation;
use aiact_core::{ClassificationResult, HarvestedRecord, Report, SystemDescription};

use crate::{ApiError, ApiResult, AppState};

/// Shorter descriptions rarely carry enough facts to classify.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Form rules: company, system name and a detailed description.
fn check_form(desc: &SystemDescription) -> ApiResult<()> {
    let missing: Vec<&str> = [
        ("company", &desc.company),
        ("name", &desc.name),
        ("description", &desc.description),
    ]
    .into_iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(k, _)| k)
    .collect();
    if !missing.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )));
    }
    if desc.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Please provide a more detailed description (at least {MIN_DESCRIPTION_CHARS} characters)"
        )));
    }
    Ok(())
}

/// POST /api/assess: full pipeline, returns the [`Report`].
pub async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<SystemDescription>, JsonRejection>,
) -> ApiResult<Json<Report>> {
    let Json(desc) = payload?;
    check_form(&desc)?;
    let assessor = state.assessor()?;
    let report = assessor.assess(&desc).await?;
    info!(system = %desc.display_name(), tier = %report.classification.tier, "assessment complete");
    Ok(Json(report))
}

/// POST /api/harvest: stage 1 only, so the user can inspect or correct the record.
pub async fn harvest(
    State(state): State<AppState>,
    payload: Result<Json<SystemDescription>, JsonRejection>,
) -> ApiResult<Json<HarvestedRecord>> {
    let Json(desc) = payload?;
    check_form(&desc)?;
    let record = state.assessor()?.harvest(&desc).await?;
    Ok(Json(record))
}

/// POST /api/classify: stage 2 on a hand-corrected record, without search.
/// The record goes through the same checks as a harvested one.
pub async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ClassificationResult>> {
    let Json(value) = payload?;
    let record = aiact_classify::validate_record(value).map_err(AssessError::from)?;
    let result = state
        .assessor()?
        .classify(&record, &Augmentation::none())
        .await?;
    Ok(Json(result))
}
