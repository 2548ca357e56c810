use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use tracing::trace;

use crate::services::CountryService;

use super::helpers::api_result;

pub async fn get_status(countries: web::Data<Arc<CountryService>>) -> impl Responder {
    trace!("Received status request");
    api_result(countries.get_status().await)
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .append_header(("Content-Type", "text/plain"))
        .body("Country currency & exchange API is running")
}

pub async fn default_not_found() -> impl Responder {
    HttpResponse::NotFound()
        .append_header(("Content-Type", "text/plain"))
        .body("Page not found")
}

pub fn status_routes() -> actix_web::Scope {
    web::scope("/status")
        .route("", web::get().to(get_status))
        .route("", web::head().to(get_status))
}
