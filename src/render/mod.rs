//! Summary artefact rendering

mod svg;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::storage::GdpEntry;

pub use svg::{SUMMARY_CONTENT_TYPE, SvgSummaryRenderer};

#[async_trait]
pub trait SummaryRenderer: Send + Sync {
    async fn render(
        &self,
        total: u64,
        top: &[GdpEntry],
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()>;
}
