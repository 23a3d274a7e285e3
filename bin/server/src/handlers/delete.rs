use crate::handlers::error::handle_upload_error;
use crate::state::AppState;
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use tempdrop_common::{AuthDetails, DeleteResponse};
use tempdrop_storage::Credentials;
use tracing::info;

/// Delete the batch stored under a name/password pair, files included
#[post("/delete")]
pub async fn delete_batch(
    form: web::Form<AuthDetails>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let AuthDetails { name, password } = form.into_inner();
    info!(name = ?name, "POST /delete - Request received");

    let id = state
        .manager
        .delete_batch(&Credentials::new(name, password))
        .await
        .map_err(|e| handle_upload_error("Failed to delete upload", e))?;

    info!(batch_id = %id, "POST /delete - Batch deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse { deleted: true }))
}
