//! Read and delete operations over the stored country table

use std::sync::Arc;

use tracing::{info, trace};

use crate::errors::{CountryFxError, Result};
use crate::storage::{CountryFilter, CountryRow, CountryStatus, SeaOrmStorage};

pub const COUNTRY_NOT_FOUND: &str = "Country not found";

pub struct CountryService {
    storage: Arc<SeaOrmStorage>,
}

impl CountryService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn require_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(CountryFxError::validation("Country name is required"));
        }
        Ok(())
    }

    pub async fn list_countries(&self, filter: CountryFilter) -> Result<Vec<CountryRow>> {
        trace!("Listing countries with filter: {:?}", filter);
        self.storage.list(&filter).await
    }

    /// 名称精确匹配（区分大小写），重名时返回 id 最小的一行
    pub async fn get_country(&self, name: &str) -> Result<CountryRow> {
        Self::require_name(name)?;
        self.storage
            .get_by_name(name)
            .await?
            .ok_or_else(|| CountryFxError::not_found(COUNTRY_NOT_FOUND))
    }

    pub async fn get_status(&self) -> Result<CountryStatus> {
        self.storage.status().await
    }

    /// 删除所有同名行；没有行被删除时返回 NotFound
    pub async fn delete_country(&self, name: &str) -> Result<u64> {
        Self::require_name(name)?;
        let affected = self.storage.remove_by_name(name).await?;
        if affected == 0 {
            return Err(CountryFxError::not_found(COUNTRY_NOT_FOUND));
        }

        info!("Deleted {} row(s) for country '{}'", affected, name);
        Ok(affected)
    }
}
