//! 启动配置校验

use super::StaticConfig;
use crate::errors::{CountryFxError, Result};

/// 校验静态配置，返回第一个不合法的项
pub fn validate_config(config: &StaticConfig) -> Result<()> {
    if config.database.database_url.trim().is_empty() {
        return Err(CountryFxError::database_config("database_url is empty"));
    }

    for (key, value) in [
        ("sources.country_data_url", &config.sources.country_data_url),
        ("sources.exchange_rate_url", &config.sources.exchange_rate_url),
    ] {
        let parsed = url::Url::parse(value)
            .map_err(|e| CountryFxError::validation(format!("{} is not a valid URL: {}", key, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CountryFxError::validation(format!(
                "{} must use http or https, got '{}'",
                key,
                parsed.scheme()
            )));
        }
    }

    if config.sources.timeout_secs == 0 {
        return Err(CountryFxError::validation(
            "sources.timeout_secs must be greater than 0",
        ));
    }

    if config.summary.top_n == 0 {
        return Err(CountryFxError::validation(
            "summary.top_n must be greater than 0",
        ));
    }

    Ok(())
}
