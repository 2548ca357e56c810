//! External data sources
//!
//! The refresh pipeline consumes two independent upstreams: a country
//! metadata feed and a currency exchange-rate table. Both are modelled as
//! traits so the pipeline can be driven by in-process fakes in tests.

mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use serde_json::Value;
use tracing::warn;

use crate::errors::Result;

pub use http::{HttpCountrySource, HttpRateSource};

/// 数据源标签（用于错误信息与日志）
pub const COUNTRY_SOURCE: &str = "country";
pub const RATE_SOURCE: &str = "rate";

/// 货币代码 → 汇率
pub type RateTable = HashMap<String, f64>;

/// 国家数据中的货币描述
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// 上游返回的一条国家记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    /// 国旗图片 URL
    #[serde(default, alias = "flagUrl")]
    pub flag: Option<String>,
    #[serde(default)]
    pub currencies: Option<Vec<CurrencyDescriptor>>,
}

impl CountryRecord {
    /// 第一个货币的代码；后续货币被忽略
    pub fn primary_currency_code(&self) -> Option<&str> {
        self.currencies
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.code.as_deref())
    }
}

/// 逐条解码国家记录
///
/// 单条字段类型不符（如负数 population）不影响其余记录：该条降级为
/// 仅保留 name 的空记录，由合并阶段按缺少 population 跳过并计数。
pub fn decode_country_records(values: Vec<Value>) -> Vec<CountryRecord> {
    values
        .into_iter()
        .map(|value| match CountryRecord::deserialize(&value) {
            Ok(record) => record,
            Err(e) => {
                let name = value.get("name").and_then(Value::as_str).map(str::to_string);
                warn!("Rejecting malformed country record {:?}: {}", name, e);
                CountryRecord {
                    name,
                    ..Default::default()
                }
            }
        })
        .collect()
}

/// 汇率接口的响应外壳
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeRateEnvelope {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub time_last_update_utc: Option<String>,
    #[serde(default)]
    pub rates: Option<RateTable>,
}

#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}
