use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::models::ApiRelayResult;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const COULD_NOT_SEND_MESSAGE: &str = "Could not send message";
pub const INVALID_SUBMISSION: &str = "Invalid contact submission";

pub const INVALID_SUBMISSION_CODE: &str = "invalid_submission";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    error!("internal server error: {err:#}");
    failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn failure(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ApiRelayResult::failure(error))).into_response()
}

pub fn rejected(status: StatusCode, error: &'static str, code: &'static str) -> Response {
    (status, Json(ApiRelayResult::rejected(error, code))).into_response()
}
