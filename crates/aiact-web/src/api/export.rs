use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use aiact_core::Report;

use crate::{ApiError, ApiResult};

fn attachment(body: String, content_type: &'static str, file_name: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// POST /api/export/json
pub async fn export_json(
    payload: Result<Json<Report>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(report) = payload?;
    let body = report
        .to_json()
        .map_err(|e| ApiError::Internal(format!("serialize report: {e}")))?;
    Ok(attachment(
        body,
        "application/json",
        format!("{}_classification.json", report.file_stem()),
    ))
}

/// POST /api/export/text
pub async fn export_text(payload: Result<Json<Report>, JsonRejection>) -> ApiResult<Response> {
    let Json(report) = payload?;
    Ok(attachment(
        report.to_text(),
        "text/plain; charset=utf-8",
        format!("{}_report.txt", report.file_stem()),
    ))
}
