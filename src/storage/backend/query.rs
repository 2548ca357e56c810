//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations. Filters and
//! ordering are built from the enumerated `CountryFilter`/`SortOrder`
//! types only; user input is always bound as a parameter.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, TransactionTrait,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_row;
use crate::errors::{CountryFxError, Result};
use crate::storage::{CountryFilter, CountryRow, CountryStatus, GdpEntry, SortOrder, SummarySnapshot};

use migration::entities::country;

fn query_error(op: &str, e: sea_orm::DbErr) -> CountryFxError {
    CountryFxError::database_operation(format!("{} failed: {}", op, e))
}

/// 应用排序；未指定时按插入顺序（id）
fn apply_sort(query: Select<country::Entity>, sort: Option<SortOrder>) -> Select<country::Entity> {
    match sort {
        Some(SortOrder::Asc) => query
            .order_by_asc(country::Column::EstimatedGdp)
            .order_by_asc(country::Column::Id),
        Some(SortOrder::Desc) => query
            .order_by_desc(country::Column::EstimatedGdp)
            .order_by_asc(country::Column::Id),
        None => query.order_by_asc(country::Column::Id),
    }
}

impl SeaOrmStorage {
    /// 按过滤条件列出国家
    pub async fn list(&self, filter: &CountryFilter) -> Result<Vec<CountryRow>> {
        let mut condition = Condition::all();

        if let Some(ref region) = filter.region {
            condition = condition.add(country::Column::Region.eq(region.clone()));
        }

        if let Some(ref currency) = filter.currency {
            condition = condition.add(country::Column::CurrencyCode.eq(currency.clone()));
        }

        let query = apply_sort(country::Entity::find().filter(condition), filter.sort);
        let models = query.all(&self.db).await.map_err(|e| query_error("list", e))?;

        debug!("list({:?}) returned {} rows", filter, models.len());
        Ok(models.into_iter().map(model_to_row).collect())
    }

    /// 名称精确匹配；同名时返回 id 最小（最先插入）的一行
    pub async fn get_by_name(&self, name: &str) -> Result<Option<CountryRow>> {
        let model = country::Entity::find()
            .filter(country::Column::Name.eq(name))
            .order_by_asc(country::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| query_error("get_by_name", e))?;

        Ok(model.map(model_to_row))
    }

    pub async fn count(&self) -> Result<u64> {
        country::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| query_error("count", e))
    }

    /// 行数与最近一次刷新时间
    pub async fn status(&self) -> Result<CountryStatus> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| query_error("status(begin)", e))?;

        let total_countries = country::Entity::find()
            .count(&txn)
            .await
            .map_err(|e| query_error("status(count)", e))?;

        let latest = country::Entity::find()
            .order_by_desc(country::Column::LastRefreshedAt)
            .one(&txn)
            .await
            .map_err(|e| query_error("status(latest)", e))?;

        txn.commit()
            .await
            .map_err(|e| query_error("status(commit)", e))?;

        Ok(CountryStatus {
            total_countries,
            last_refreshed_at: latest.map(|m| m.last_refreshed_at),
        })
    }

    /// 读取总数与按 estimated_gdp 降序的前 `top_n` 行
    ///
    /// timestamp 取排名第一行的刷新时间，空表时为 None。
    pub async fn summary_snapshot(&self, top_n: u64) -> Result<SummarySnapshot> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| query_error("summary_snapshot(begin)", e))?;

        let total = country::Entity::find()
            .count(&txn)
            .await
            .map_err(|e| query_error("summary_snapshot(count)", e))?;

        let ranked: Vec<(String, f64, DateTime<Utc>)> = country::Entity::find()
            .select_only()
            .column(country::Column::Name)
            .column(country::Column::EstimatedGdp)
            .column(country::Column::LastRefreshedAt)
            .order_by_desc(country::Column::EstimatedGdp)
            .order_by_asc(country::Column::Id)
            .limit(top_n)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| query_error("summary_snapshot(ranking)", e))?;

        txn.commit()
            .await
            .map_err(|e| query_error("summary_snapshot(commit)", e))?;

        let timestamp = ranked.first().map(|(_, _, ts)| *ts);
        let top = ranked
            .into_iter()
            .map(|(name, estimated_gdp, _)| GdpEntry { name, estimated_gdp })
            .collect();

        Ok(SummarySnapshot {
            total,
            top,
            timestamp,
        })
    }
}
