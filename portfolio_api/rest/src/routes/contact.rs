use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use portfolio_models::contact::ContactSubmission;
use tracing::{debug, error};

use crate::{
    errors::{
        failure, rejected, COULD_NOT_SEND_MESSAGE, INVALID_SUBMISSION, INVALID_SUBMISSION_CODE,
    },
    models::{contact::ApiContactSubmission, ApiRelayResult},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(payload)) => ContactSubmission::try_from(payload).map_err(|err| err.to_string()),
        Err(rejection) => Err(rejection.body_text()),
    };

    let submission = match submission {
        Ok(submission) => submission,
        Err(reason) => {
            debug!(%reason, "rejected contact submission");
            return rejected(
                StatusCode::BAD_REQUEST,
                INVALID_SUBMISSION,
                INVALID_SUBMISSION_CODE,
            );
        }
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiRelayResult::success()).into_response(),
        Err(ContactSendMessageError::Send) => {
            error!("Failed to relay contact message: rejected by smtp server");
            failure(StatusCode::INTERNAL_SERVER_ERROR, COULD_NOT_SEND_MESSAGE)
        }
        Err(ContactSendMessageError::Other(err)) => {
            error!("Failed to relay contact message: {err:#}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, COULD_NOT_SEND_MESSAGE)
        }
    }
}
