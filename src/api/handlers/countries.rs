//! `/countries` 路由

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace};

use crate::errors::CountryFxError;
use crate::render::SUMMARY_CONTENT_TYPE;
use crate::services::{CountryService, RefreshService};
use crate::storage::{CountryFilter, SortOrder};

use super::helpers::{
    api_result, error_from, error_response, json_response, message_response, query_error_handler,
};

/// 汇总图片在磁盘上的位置
#[derive(Clone, Debug)]
pub struct SummaryImage {
    pub path: PathBuf,
}

/// 列表查询参数；未识别的键会被忽略
#[derive(Debug, Default, Deserialize)]
pub struct ListCountriesQuery {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: Option<String>,
}

impl ListCountriesQuery {
    fn into_filter(self) -> CountryFilter {
        CountryFilter {
            region: self.region,
            currency: self.currency,
            // 无法识别的排序值按未指定处理
            sort: self.sort.as_deref().and_then(SortOrder::parse),
        }
    }
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    message: &'static str,
    stored: usize,
    skipped: usize,
}

pub async fn refresh_countries(refresh: web::Data<Arc<RefreshService>>) -> impl Responder {
    info!("Refresh requested");
    match refresh.refresh().await {
        Ok(outcome) => json_response(
            StatusCode::OK,
            &RefreshResponse {
                message: "Database refresh successful",
                stored: outcome.stored,
                skipped: outcome.skipped,
            },
        ),
        Err(e) => {
            error!("Refresh failed: {}", e);
            error_from(&e)
        }
    }
}

pub async fn list_countries(
    query: web::Query<ListCountriesQuery>,
    countries: web::Data<Arc<CountryService>>,
) -> impl Responder {
    trace!("List countries request: {:?}", query);
    let filter = query.into_inner().into_filter();
    api_result(countries.list_countries(filter).await)
}

pub async fn get_country(
    name: web::Path<String>,
    countries: web::Data<Arc<CountryService>>,
) -> impl Responder {
    api_result(countries.get_country(&name).await)
}

pub async fn delete_country(
    name: web::Path<String>,
    countries: web::Data<Arc<CountryService>>,
) -> impl Responder {
    match countries.delete_country(&name).await {
        Ok(_) => message_response(&format!("Country '{}' deleted successfully", name)),
        Err(e) => error_from(&e),
    }
}

pub async fn get_summary_image(image: web::Data<SummaryImage>) -> impl Responder {
    match tokio::fs::read(&image.path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(SUMMARY_CONTENT_TYPE)
            .body(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error_response(StatusCode::NOT_FOUND, "Summary image not found", None)
        }
        Err(e) => error_from(&CountryFxError::file_operation(format!(
            "Failed to read {}: {}",
            image.path.display(),
            e
        ))),
    }
}

/// `/countries` 路由
///
/// - POST /countries/refresh
/// - GET /countries
/// - GET /countries/image（必须在 /{name} 之前）
/// - GET/DELETE /countries/{name}
pub fn countries_routes() -> actix_web::Scope {
    web::scope("/countries")
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .route("", web::get().to(list_countries))
        .route("/refresh", web::post().to(refresh_countries))
        .route("/image", web::get().to(get_summary_image))
        .route("/{name}", web::get().to(get_country))
        .route("/{name}", web::delete().to(delete_country))
}
