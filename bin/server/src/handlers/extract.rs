use crate::handlers::error::handle_request_error;
use actix_multipart::form::MultipartFormConfig;
use actix_multipart::MultipartError;
use actix_web::error::PayloadError;
use actix_web::http::StatusCode;
use actix_web::web;

/// Extractor settings shared by every endpoint.
///
/// Undecodable bodies are answered with a JSON `ErrorResponse` instead of
/// actix's plain-text default. Multipart uploads are capped at
/// `max_upload_bytes` in total.
pub fn configure_extractors(max_upload_bytes: usize) -> impl Fn(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config())
            .app_data(form_config())
            .app_data(multipart_config(max_upload_bytes));
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|e, _req| {
        let message = format!("Invalid JSON body: {}", e);
        handle_request_error(StatusCode::BAD_REQUEST, message, e)
    })
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|e, _req| {
        let message = format!("Invalid form body: {}", e);
        handle_request_error(StatusCode::BAD_REQUEST, message, e)
    })
}

fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .error_handler(move |e, _req| match e {
            e @ MultipartError::Payload(PayloadError::Overflow) => handle_request_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Upload exceeds the limit of {} bytes", max_upload_bytes),
                e,
            ),
            e => {
                let message = format!("Invalid upload form: {}", e);
                handle_request_error(StatusCode::BAD_REQUEST, message, e)
            }
        })
}
