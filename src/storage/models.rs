use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 持久化后的一行国家数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRow {
    pub id: i32,
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: f64,
    pub flag_url: Option<String>,
    pub last_refreshed_at: DateTime<Utc>,
}

/// 待写入的行（id 与刷新时间由存储层分配）
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountryRow {
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: f64,
    pub flag_url: Option<String>,
}

/// estimated_gdp 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// 大小写不敏感；无法识别的值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }
}

/// 列表查询条件，多个条件之间为 AND
#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    /// region 精确匹配
    pub region: Option<String>,
    /// currency_code 精确匹配
    pub currency: Option<String>,
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStatus {
    pub total_countries: u64,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpEntry {
    pub name: String,
    pub estimated_gdp: f64,
}

/// 汇总图片所需的数据
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySnapshot {
    pub total: u64,
    pub top: Vec<GdpEntry>,
    pub timestamp: Option<DateTime<Utc>>,
}
