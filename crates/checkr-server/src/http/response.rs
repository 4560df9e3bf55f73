use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub type HttpResponse = Response;
pub type HttpResult<T = ()> = Result<T, HttpResponse>;

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

pub(crate) fn json_error_with_details(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> HttpResponse {
    (
        status,
        Json(ErrorEnvelope {
            code: code.into(),
            message: message.into(),
            details,
        }),
    )
        .into_response()
}

pub(crate) fn json_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> HttpResponse {
    json_error_with_details(status, code, message, None)
}

pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> HttpResponse {
    json_error(StatusCode::BAD_REQUEST, code, message)
}

pub fn method_not_allowed(message: impl Into<String>) -> HttpResponse {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        message,
    )
}
