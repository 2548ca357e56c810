//! Refresh pipeline
//!
//! Fetches both upstream datasets, replaces the stored table in one
//! transaction and regenerates the summary artefact.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::render::SummaryRenderer;
use crate::sources::{CountrySource, RateSource};
use crate::storage::SeaOrmStorage;

use super::merge::{build_rows, random_gdp_factor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// 写入的行数
    pub stored: usize,
    /// 因缺少 name/population 被跳过的记录数
    pub skipped: usize,
}

pub struct RefreshService {
    storage: Arc<SeaOrmStorage>,
    country_source: Arc<dyn CountrySource>,
    rate_source: Arc<dyn RateSource>,
    renderer: Arc<dyn SummaryRenderer>,
    top_n: u64,
    // 串行化刷新，避免两次 replace 交错
    refresh_lock: Mutex<()>,
}

impl RefreshService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        country_source: Arc<dyn CountrySource>,
        rate_source: Arc<dyn RateSource>,
        renderer: Arc<dyn SummaryRenderer>,
        top_n: u64,
    ) -> Self {
        Self {
            storage,
            country_source,
            rate_source,
            renderer,
            top_n,
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let _guard = self.refresh_lock.lock().await;
        let started = std::time::Instant::now();

        // 任一数据源失败都在写库之前返回，表保持原样
        let records = self.country_source.fetch_countries().await?;
        debug!("Fetched {} country records", records.len());

        let rates = self.rate_source.fetch_rates().await?;
        debug!("Fetched {} exchange rates", rates.len());

        let merged = build_rows(&records, &rates, random_gdp_factor);
        let stored = self.storage.replace_all(&merged.rows, Utc::now()).await?;

        info!(
            "Refresh stored {} countries ({} skipped) in {:?}",
            stored,
            merged.skipped,
            started.elapsed()
        );

        self.regenerate_summary().await;

        Ok(RefreshOutcome {
            stored,
            skipped: merged.skipped,
        })
    }

    /// 汇总图片失败只记录日志，不影响已提交的数据
    async fn regenerate_summary(&self) {
        let snapshot = match self.storage.summary_snapshot(self.top_n).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to read summary snapshot: {}", e);
                return;
            }
        };

        if let Err(e) = self
            .renderer
            .render(snapshot.total, &snapshot.top, snapshot.timestamp)
            .await
        {
            error!("Failed to render summary image: {}", e);
        }
    }
}
