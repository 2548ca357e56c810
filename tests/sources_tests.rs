//! HTTP data source tests
//!
//! Each test starts an ephemeral actix-web server on 127.0.0.1 that plays
//! the role of the upstream API.

use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, web};

use countryfx::errors::CountryFxError;
use countryfx::services::build_rows;
use countryfx::sources::{
    COUNTRY_SOURCE, CountrySource, HttpCountrySource, HttpRateSource, RATE_SOURCE, RateSource,
};

const COUNTRIES_JSON: &str = r#"[
  {
    "name": "Nigeria",
    "capital": "Abuja",
    "region": "Africa",
    "population": 206139587,
    "flag": "https://flagcdn.com/ng.svg",
    "currencies": [{ "code": "NGN", "name": "Nigerian naira", "symbol": "₦" }],
    "independent": false
  },
  {
    "name": "Antarctica",
    "region": "Polar",
    "population": 1000
  }
]"#;

const RATES_JSON: &str = r#"{
  "result": "success",
  "base_code": "USD",
  "time_last_update_utc": "Mon, 20 Oct 2025 00:02:31 +0000",
  "rates": { "USD": 1, "NGN": 1600.23, "EUR": 0.92 }
}"#;

/// 启动上游模拟服务，返回 base URL
fn spawn_upstream(status: u16, body: &'static str) -> String {
    let server = HttpServer::new(move || {
        App::new().default_service(web::to(move || async move {
            HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
                .content_type("application/json")
                .body(body)
        }))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    format!("http://{}/data", addr)
}

fn timeout() -> Duration {
    Duration::from_secs(5)
}

#[actix_rt::test]
async fn test_country_source_parses_records() {
    let url = spawn_upstream(200, COUNTRIES_JSON);
    let source = HttpCountrySource::new(url, timeout());

    let records = source.fetch_countries().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Nigeria"));
    assert_eq!(records[0].population, Some(206139587));
    assert_eq!(records[0].primary_currency_code(), Some("NGN"));
    assert_eq!(records[0].flag.as_deref(), Some("https://flagcdn.com/ng.svg"));
    assert!(records[1].currencies.is_none());
    assert!(records[1].capital.is_none());
}

#[actix_rt::test]
async fn test_country_source_keeps_valid_records_beside_malformed_ones() {
    let url = spawn_upstream(
        200,
        r#"[
  {"name":"Nigeria","population":206139587,"currencies":[{"code":"NGN"}]},
  {"name":"Weirdland","population":-5}
]"#,
    );
    let source = HttpCountrySource::new(url, timeout());

    let records = source.fetch_countries().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name.as_deref(), Some("Nigeria"));
    assert_eq!(records[0].population, Some(206139587));

    // 异常记录在合并时被跳过并计数
    let rates = [("NGN".to_string(), 1600.0)].into_iter().collect();
    let outcome = build_rows(&records, &rates, || 1000);
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].name, "Nigeria");
    assert_eq!(outcome.skipped, 1);
}

#[actix_rt::test]
async fn test_country_source_non_array_body_is_upstream_payload() {
    let url = spawn_upstream(200, r#"{"status":404,"message":"Not Found"}"#);
    let source = HttpCountrySource::new(url, timeout());

    let err = source.fetch_countries().await.unwrap_err();
    assert!(matches!(err, CountryFxError::UpstreamPayload(_)));
}

#[actix_rt::test]
async fn test_country_source_error_status_is_external_service() {
    let url = spawn_upstream(500, r#"{"message":"boom"}"#);
    let source = HttpCountrySource::new(url, timeout());

    let err = source.fetch_countries().await.unwrap_err();
    assert!(matches!(err, CountryFxError::ExternalService { .. }));
    assert_eq!(err.upstream_source(), Some(COUNTRY_SOURCE));
    assert_eq!(err.http_status().as_u16(), 503);
}

#[actix_rt::test]
async fn test_country_source_bad_json_is_upstream_payload() {
    let url = spawn_upstream(200, "<html>maintenance</html>");
    let source = HttpCountrySource::new(url, timeout());

    let err = source.fetch_countries().await.unwrap_err();
    assert!(matches!(err, CountryFxError::UpstreamPayload(_)));
    assert_eq!(err.http_status().as_u16(), 500);
}

#[actix_rt::test]
async fn test_unreachable_source_is_internal() {
    // 绑定后立即释放端口，连接会被拒绝
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let source = HttpCountrySource::new(format!("http://127.0.0.1:{}/all", port), timeout());

    let err = source.fetch_countries().await.unwrap_err();
    assert!(matches!(err, CountryFxError::Internal(_)));
}

#[actix_rt::test]
async fn test_rate_source_parses_table() {
    let url = spawn_upstream(200, RATES_JSON);
    let source = HttpRateSource::new(url, timeout());

    let rates = source.fetch_rates().await.unwrap();
    assert_eq!(rates.len(), 3);
    assert_eq!(rates.get("NGN"), Some(&1600.23));
    assert_eq!(rates.get("USD"), Some(&1.0));
}

#[actix_rt::test]
async fn test_rate_source_error_status() {
    let url = spawn_upstream(429, r#"{"result":"error"}"#);
    let source = HttpRateSource::new(url, timeout());

    let err = source.fetch_rates().await.unwrap_err();
    assert_eq!(err.upstream_source(), Some(RATE_SOURCE));
}

#[actix_rt::test]
async fn test_rate_source_error_result_is_upstream_payload() {
    let url = spawn_upstream(200, r#"{"result":"error","error-type":"unsupported-code"}"#);
    let source = HttpRateSource::new(url, timeout());

    let err = source.fetch_rates().await.unwrap_err();
    assert!(matches!(err, CountryFxError::UpstreamPayload(_)));
}

#[actix_rt::test]
async fn test_rate_source_missing_rates_is_upstream_payload() {
    let url = spawn_upstream(200, r#"{"result":"success","base_code":"USD"}"#);
    let source = HttpRateSource::new(url, timeout());

    let err = source.fetch_rates().await.unwrap_err();
    assert!(matches!(err, CountryFxError::UpstreamPayload(_)));
}
