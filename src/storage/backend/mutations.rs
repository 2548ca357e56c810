//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::{debug, info};

use super::converters::new_row_to_active_model;
use super::{INSERT_CHUNK_SIZE, SeaOrmStorage};
use crate::errors::{CountryFxError, Result};
use crate::storage::NewCountryRow;

use migration::entities::country;

impl SeaOrmStorage {
    /// 用 `rows` 整体替换 countries 表（单事务）
    ///
    /// 先清空再分批插入，主键按输入顺序从 1 开始重新分配。
    /// 任一步失败时事务回滚，表保持调用前的内容。
    pub async fn replace_all(
        &self,
        rows: &[NewCountryRow],
        refreshed_at: DateTime<Utc>,
    ) -> Result<usize> {
        let txn = self.db.begin().await.map_err(|e| {
            CountryFxError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        let cleared = country::Entity::delete_many()
            .exec(&txn)
            .await
            .map_err(|e| {
                CountryFxError::database_operation(format!("Failed to clear countries: {}", e))
            })?;
        debug!("Cleared {} existing country rows", cleared.rows_affected);

        for (chunk_index, chunk) in rows.chunks(INSERT_CHUNK_SIZE).enumerate() {
            let base_id = chunk_index * INSERT_CHUNK_SIZE;
            let active_models: Vec<country::ActiveModel> = chunk
                .iter()
                .enumerate()
                .map(|(offset, row)| {
                    new_row_to_active_model(row, (base_id + offset + 1) as i32, refreshed_at)
                })
                .collect();

            country::Entity::insert_many(active_models)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    CountryFxError::database_operation(format!(
                        "Failed to insert countries (batch {}): {}",
                        chunk_index, e
                    ))
                })?;
        }

        txn.commit().await.map_err(|e| {
            CountryFxError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        info!(
            "Replaced countries table: {} removed, {} inserted",
            cleared.rows_affected,
            rows.len()
        );
        Ok(rows.len())
    }

    /// 删除所有名称完全匹配的行，返回受影响行数
    pub async fn remove_by_name(&self, name: &str) -> Result<u64> {
        let result = country::Entity::delete_many()
            .filter(country::Column::Name.eq(name))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CountryFxError::database_operation(format!(
                    "Failed to delete country '{}': {}",
                    name, e
                ))
            })?;

        if result.rows_affected > 0 {
            info!("Deleted {} row(s) for country: {}", result.rows_affected, name);
        }
        Ok(result.rows_affected)
    }
}
