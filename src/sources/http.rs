//! HTTP implementations of the data sources
//!
//! ureq is blocking; every request runs inside `spawn_blocking`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use ureq::Agent;

use super::{
    COUNTRY_SOURCE, CountryRecord, CountrySource, ExchangeRateEnvelope, RATE_SOURCE, RateSource,
    RateTable, decode_country_records,
};
use crate::errors::{CountryFxError, Result};

/// 响应体上限（国家全量数据约 1 MiB）
const MAX_BODY_BYTES: u64 = 32 * 1024 * 1024;

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// 同步请求并解析 JSON（在 spawn_blocking 中调用）
///
/// - 非 2xx 状态码 → ExternalService
/// - 网络层失败 → Internal
/// - 响应体无法解析 → UpstreamPayload
fn fetch_json_sync<T: DeserializeOwned>(agent: &Agent, url: &str, source: &str) -> Result<T> {
    let resp = match agent.get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::StatusCode(status)) => {
            warn!("{} data source returned status {}", source, status);
            return Err(CountryFxError::external_service(
                source,
                format!("{} data source responded with status {}", source, status),
            ));
        }
        Err(e) => {
            warn!("{} data source request to \"{}\" failed: {}", source, url, e);
            return Err(CountryFxError::internal(format!(
                "{} data source request failed: {}",
                source, e
            )));
        }
    };

    resp.into_body()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_json::<T>()
        .map_err(|e| {
            warn!("{} data source response parse failed: {}", source, e);
            CountryFxError::upstream_payload(format!(
                "{} data source returned an unusable payload: {}",
                source, e
            ))
        })
}

async fn fetch_json<T>(agent: Agent, url: String, source: &'static str) -> Result<T>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || fetch_json_sync(&agent, &url, source))
        .await
        .map_err(|e| CountryFxError::internal(format!("{} fetch task failed: {}", source, e)))?
}

/// 国家数据源（restcountries v2 格式）
pub struct HttpCountrySource {
    url: String,
    agent: Agent,
}

impl HttpCountrySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: build_agent(timeout),
        }
    }
}

#[async_trait]
impl CountrySource for HttpCountrySource {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>> {
        info!("Fetching country data from {}", self.url);
        // 外层必须是数组，单条记录各自解码
        let values: Vec<serde_json::Value> =
            fetch_json(self.agent.clone(), self.url.clone(), COUNTRY_SOURCE).await?;
        let records = decode_country_records(values);
        info!("Fetched {} country records", records.len());
        Ok(records)
    }
}

/// 汇率数据源（open.er-api.com 格式）
pub struct HttpRateSource {
    url: String,
    agent: Agent,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: build_agent(timeout),
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> Result<RateTable> {
        info!("Fetching exchange rates from {}", self.url);
        let envelope: ExchangeRateEnvelope =
            fetch_json(self.agent.clone(), self.url.clone(), RATE_SOURCE).await?;

        if envelope.result.as_deref() == Some("error") {
            return Err(CountryFxError::upstream_payload(
                "rate data source reported result=error",
            ));
        }

        let rates = envelope.rates.ok_or_else(|| {
            CountryFxError::upstream_payload("rate data source response has no rates")
        })?;

        info!(
            "Fetched {} exchange rates (base: {}, updated: {})",
            rates.len(),
            envelope.base_code.as_deref().unwrap_or("?"),
            envelope.time_last_update_utc.as_deref().unwrap_or("?")
        );
        Ok(rates)
    }
}
