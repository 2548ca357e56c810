use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::SummaryImage;
use crate::config::StaticConfig;
use crate::render::{SummaryRenderer, SvgSummaryRenderer};
use crate::services::{CountryService, RefreshService};
use crate::sources::{CountrySource, HttpCountrySource, HttpRateSource, RateSource};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub country_service: Arc<CountryService>,
    pub refresh_service: Arc<RefreshService>,
    pub summary_image: SummaryImage,
}

/// 安装 rustls 默认加密后端（进程内只需一次）
pub fn install_crypto_provider() -> Result<()> {
    if rustls::crypto::CryptoProvider::get_default().is_some() {
        return Ok(());
    }
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))
}

/// 组装存储、数据源、渲染器和服务
pub async fn build_context(config: &StaticConfig) -> Result<StartupContext> {
    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let timeout = Duration::from_secs(config.sources.timeout_secs);
    let country_source: Arc<dyn CountrySource> = Arc::new(HttpCountrySource::new(
        config.sources.country_data_url.clone(),
        timeout,
    ));
    let rate_source: Arc<dyn RateSource> = Arc::new(HttpRateSource::new(
        config.sources.exchange_rate_url.clone(),
        timeout,
    ));

    let image_path = std::path::PathBuf::from(&config.summary.image_path);
    let renderer: Arc<dyn SummaryRenderer> =
        Arc::new(SvgSummaryRenderer::new(image_path.clone()));

    let refresh_service = Arc::new(RefreshService::new(
        storage.clone(),
        country_source,
        rate_source,
        renderer,
        config.summary.top_n,
    ));
    let country_service = Arc::new(CountryService::new(storage.clone()));

    Ok(StartupContext {
        storage,
        country_service,
        refresh_service,
        summary_image: SummaryImage { path: image_path },
    })
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    install_crypto_provider()?;
    let context = build_context(config).await?;

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
