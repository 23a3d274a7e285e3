use crate::handlers::error::handle_upload_error;
use crate::state::AppState;
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use tempdrop_common::{AuthDetails, CheckAuthResponse};
use tempdrop_lifecycle::CredentialStatus;
use tempdrop_storage::Credentials;
use tracing::info;

/// Report whether a name/password pair is still unclaimed
#[post("/checkauth")]
pub async fn check_auth(
    req: web::Json<AuthDetails>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let AuthDetails { name, password } = req.into_inner();
    info!(name = ?name, "POST /checkauth - Request received");

    let status = state
        .manager
        .check_credentials(&Credentials::new(name, password))
        .await
        .map_err(|e| handle_upload_error("Failed to check credentials", e))?;

    Ok(HttpResponse::Ok().json(CheckAuthResponse {
        available: status == CredentialStatus::Available,
    }))
}
