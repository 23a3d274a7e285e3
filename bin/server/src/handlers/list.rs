use crate::handlers::error::handle_upload_error;
use crate::state::{file_url, AppState};
use actix_web::{post, web, HttpRequest, HttpResponse, Result as ActixResult};
use tempdrop_common::{AuthDetails, ListResponse, ListedFile};
use tempdrop_storage::Credentials;
use tracing::info;

/// List the files of a batch with links under the uploads mount
#[post("/get-uploads")]
pub async fn get_uploads(
    req: HttpRequest,
    form: web::Form<AuthDetails>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let AuthDetails { name, password } = form.into_inner();
    info!(name = ?name, "POST /get-uploads - Request received");

    let base_url = state.base_url(&req);
    let files = state
        .manager
        .list_batch(&Credentials::new(name, password), |stored_name| {
            file_url(&base_url, stored_name)
        })
        .await
        .map_err(|e| handle_upload_error("Failed to retrieve files", e))?;

    let files = files
        .into_iter()
        .map(|file| ListedFile {
            original_name: file.original_name,
            url: file.external_reference,
            size_bytes: file.size_bytes,
            content_type: file.content_type,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ListResponse { files }))
}
