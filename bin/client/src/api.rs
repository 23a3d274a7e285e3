//! Blocking HTTP calls against the upload server

use crate::constants::{CHECK_ENDPOINT, DELETE_ENDPOINT, LIST_ENDPOINT, UPLOAD_ENDPOINT};
use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tempdrop_common::{
    AuthDetails, CheckAuthResponse, DeleteResponse, ErrorResponse, ListResponse, UploadResponse,
};

/// One file queued for upload
pub struct LocalFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Client bound to one server and one name/password pair
pub struct ServerClient {
    server: String,
    auth: AuthDetails,
    http: Client,
}

impl ServerClient {
    pub fn new(server: &str, name: &str, password: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            auth: AuthDetails {
                name: name.to_string(),
                password: password.to_string(),
            },
            http: Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.server, endpoint)
    }

    /// Whether the pair is still unclaimed on the server
    pub fn check(&self) -> Result<CheckAuthResponse> {
        let response = self
            .http
            .post(self.url(CHECK_ENDPOINT))
            .json(&self.auth)
            .send()
            .context("Failed to connect to server")?;
        read_json(response, "Credential check")
    }

    /// Upload all files as one batch
    pub fn upload(&self, files: Vec<LocalFile>) -> Result<UploadResponse> {
        let mut form = multipart::Form::new()
            .text("name", self.auth.name.clone())
            .text("password", self.auth.password.clone());

        for file in files {
            debug!("Adding {} ({} bytes)", file.filename, file.content.len());
            let part = multipart::Part::bytes(file.content)
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)
                .with_context(|| format!("Invalid content type for {}", file.filename))?;
            form = form.part("files", part);
        }

        let response = self
            .http
            .post(self.url(UPLOAD_ENDPOINT))
            .multipart(form)
            .send()
            .context("Failed to connect to server")?;
        let created: UploadResponse = read_json(response, "Upload")?;
        info!("Uploaded batch {} ({} files)", created.id, created.files.len());
        Ok(created)
    }

    /// Files of the batch stored under the pair
    pub fn list(&self) -> Result<ListResponse> {
        let response = self
            .http
            .post(self.url(LIST_ENDPOINT))
            .form(&self.auth)
            .send()
            .context("Failed to connect to server")?;
        read_json(response, "Listing")
    }

    /// Delete the batch stored under the pair
    pub fn delete(&self) -> Result<DeleteResponse> {
        let response = self
            .http
            .post(self.url(DELETE_ENDPOINT))
            .form(&self.auth)
            .send()
            .context("Failed to connect to server")?;
        read_json(response, "Deletion")
    }
}

fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| format!("{} ({})", e.message, e.error))
            .unwrap_or(text);
        anyhow::bail!("{} failed: {} - {}", action, status, message);
    }
    response
        .json()
        .with_context(|| format!("{}: invalid response from server", action))
}
