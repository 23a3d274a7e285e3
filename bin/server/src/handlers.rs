//! HTTP request handlers

pub mod check;
pub mod delete;
pub mod error;
pub mod extract;
pub mod health;
pub mod list;
pub mod upload;
pub mod upload_form;

use actix_web::web;

pub use extract::configure_extractors;

/// Register every endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(check::check_auth)
        .service(upload::upload)
        .service(delete::delete_batch)
        .service(list::get_uploads)
        .service(health::health);
}
