use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use tempdrop_common::ErrorResponse;
use tempdrop_lifecycle::UploadError;
use tracing::{error, info};

fn status_for(e: &UploadError) -> StatusCode {
    match e {
        UploadError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        UploadError::NotFound => StatusCode::NOT_FOUND,
        UploadError::StorageFailure(_) | UploadError::PersistenceFailure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Turn a lifecycle failure into a JSON error response.
///
/// Internal faults are logged in full and reported with a generic message;
/// request faults are returned verbatim.
pub fn handle_upload_error(msg: &str, e: UploadError) -> actix_web::Error {
    let message = if e.is_internal() {
        error!("{}: {}", msg, e);
        format!("{}: internal server error", msg)
    } else {
        info!("{}: {}", msg, e);
        e.to_string()
    };

    let body = ErrorResponse {
        error: e.category().to_string(),
        message,
    };
    let response = HttpResponse::build(status_for(&e)).json(body);
    InternalError::from_response(e, response).into()
}

/// Helper function for server errors outside the lifecycle
pub fn handle_server_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    let body = ErrorResponse {
        error: "storage_failure".to_string(),
        message: format!("{}: internal server error", msg),
    };
    InternalError::from_response(e.to_string(), HttpResponse::InternalServerError().json(body))
        .into()
}

/// Reject a request the extractors could not decode.
///
/// The body carries the `invalid_input` category like any other bad request.
pub fn handle_request_error<E>(status: StatusCode, message: String, e: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    info!("Rejected request ({}): {}", status.as_u16(), e);
    let body = ErrorResponse {
        error: "invalid_input".to_string(),
        message,
    };
    InternalError::from_response(e, HttpResponse::build(status).json(body)).into()
}
