//! Shared HTTP response envelope.
//!
//! Every endpoint, success or failure, answers with
//! `{success, data?, error?, message?}` so the front-end clients have one
//! shape to unwrap. Store failures never leak driver details to the caller;
//! they are logged server-side and surfaced as a generic message.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

pub const SEARCH_UNAVAILABLE: &str = "Search is temporarily unavailable";
pub const ANALYTICS_UNAVAILABLE: &str = "Analytics are temporarily unavailable";

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(data: T) -> ApiResult<T> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }),
    )
}

pub fn ok_with_message<T>(data: T, message: &str) -> ApiResult<T> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.to_string()),
        }),
    )
}

pub fn bad_request<T>(error: impl ToString) -> ApiResult<T> {
    failure(StatusCode::BAD_REQUEST, error)
}

pub fn not_found<T>(error: impl ToString) -> ApiResult<T> {
    failure(StatusCode::NOT_FOUND, error)
}

pub fn unavailable<T>(message: &str) -> ApiResult<T> {
    failure(StatusCode::SERVICE_UNAVAILABLE, message)
}

fn failure<T>(status: StatusCode, error: impl ToString) -> ApiResult<T> {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(error.to_string()),
            message: None,
        }),
    )
}
