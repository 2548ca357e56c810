//! 响应帮助函数

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::error;

use crate::errors::CountryFxError;

/// 失败响应体：`{ "error": ..., "details"?: ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

pub fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> HttpResponse {
    json_response(
        status,
        &ErrorBody {
            error: error.into(),
            details,
        },
    )
}

pub fn message_response(message: &str) -> HttpResponse {
    json_response(StatusCode::OK, &MessageBody { message })
}

/// 从 CountryFxError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from(err: &CountryFxError) -> HttpResponse {
    let status = err.http_status();
    match err {
        CountryFxError::NotFound(msg) => error_response(status, msg.clone(), None),
        CountryFxError::Validation(msg) => {
            error_response(status, "Validation failed", Some(msg.clone()))
        }
        CountryFxError::ExternalService { source, message } => {
            error!("Upstream '{}' unavailable: {}", source, message);
            error_response(
                status,
                "External data source unavailable",
                Some(format!("Could not fetch data from {}", source)),
            )
        }
        _ => {
            // 内部细节只写日志，不返回给调用方
            error!("{}", err.format_simple());
            error_response(status, "Internal server error", None)
        }
    }
}

/// 查询串解析失败时同样返回 JSON 400
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let details = err.to_string();
    InternalError::from_response(
        err,
        error_response(StatusCode::BAD_REQUEST, "Validation failed", Some(details)),
    )
    .into()
}

/// 统一 Result → HttpResponse 转换，成功时返回 200 + JSON
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(e) => error_from(&e),
    }
}
