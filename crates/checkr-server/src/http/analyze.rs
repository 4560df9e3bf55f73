use crate::http::models::{AnalysisResponse, AnalyzeRequest};
use crate::http::response::{bad_request, json_error_with_details, method_not_allowed, HttpResult};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use checkr_analyzer::{AnalysisError, MIN_PREFIXES};
use tracing::{info, warn};

pub async fn analyze_cidrs(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> HttpResult<Json<AnalysisResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejecting undecodable payload");
        bad_request("INVALID_PAYLOAD", "Invalid request payload")
    })?;

    if request.cidrs.len() < MIN_PREFIXES {
        return Err(bad_request(
            "INSUFFICIENT_INPUT",
            "At least two CIDRs are required",
        ));
    }
    if request.cidrs.len() > state.max_prefixes {
        return Err(bad_request(
            "TOO_MANY_PREFIXES",
            format!(
                "At most {} CIDRs are accepted, got {}",
                state.max_prefixes,
                request.cidrs.len()
            ),
        ));
    }

    let result = checkr_analyzer::analyze(&request.cidrs).map_err(|e| {
        warn!(error = %e, kind = e.kind(), "analysis rejected");
        analysis_error(e)
    })?;

    info!(
        prefixes = result.cidr_details.len(),
        overlaps = result.overlaps.len(),
        has_collision = result.has_collision,
        "analyzed cidrs"
    );

    Ok(Json(result.into()))
}

pub async fn reject_method(method: Method) -> impl IntoResponse {
    method_not_allowed(format!("Method {} not allowed", method))
}

fn analysis_error(err: AnalysisError) -> crate::http::response::HttpResponse {
    let message = err.to_string();
    match err {
        AnalysisError::InsufficientInput { .. } => bad_request("INSUFFICIENT_INPUT", message),
        AnalysisError::InvalidPrefix {
            index,
            text,
            source,
        } => json_error_with_details(
            StatusCode::BAD_REQUEST,
            "INVALID_PREFIX",
            message,
            Some(serde_json::json!({
                "index": index,
                "cidr": text,
                "reason": source.reason(),
            })),
        ),
    }
}
