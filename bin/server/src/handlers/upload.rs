use crate::handlers::error::{handle_server_error, handle_upload_error};
use crate::handlers::upload_form::{describe, UploadForm};
use crate::state::AppState;
use actix_multipart::form::MultipartForm;
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use tempdrop_common::{UploadResponse, UploadedFile};
use tempdrop_lifecycle::IncomingFile;
use tempdrop_storage::Credentials;
use tracing::info;

/// Handle a batch upload (multipart/form-data)
#[post("/upload")]
pub async fn upload(
    form: MultipartForm<UploadForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let UploadForm {
        name,
        password,
        files: spooled,
    } = form.into_inner();
    let credentials = Credentials::new(name.into_inner(), password.into_inner());

    // Structured logging with Debug formatter (?) escapes control characters
    info!(
        name = ?credentials.name,
        files = spooled.len(),
        "POST /upload - Request received"
    );

    // Fresh handles start at offset 0; `spooled` keeps the temp files alive
    let mut incoming = Vec::with_capacity(spooled.len());
    for file in &spooled {
        let (original_name, content_type) = describe(file);
        let handle = file
            .file
            .reopen()
            .map_err(|e| handle_server_error("Failed to read uploaded file", e))?;
        incoming.push(IncomingFile::new(
            original_name,
            content_type,
            Box::pin(tokio::fs::File::from_std(handle)),
        ));
    }

    let created = state
        .manager
        .create_batch(credentials, incoming)
        .await
        .map_err(|e| handle_upload_error("Failed to upload files", e))?;
    drop(spooled);

    info!(
        batch_id = %created.id,
        files = created.files.len(),
        "POST /upload - Files uploaded"
    );

    Ok(HttpResponse::Ok().json(UploadResponse {
        id: created.id.to_string(),
        files: created
            .files
            .into_iter()
            .map(|entry| UploadedFile {
                original_name: entry.original_name,
                stored_name: entry.stored_name,
                size_bytes: entry.size_bytes,
                content_type: entry.content_type,
            })
            .collect(),
        created_at: created.created_at,
        expires_at: created.expires_at,
    }))
}
