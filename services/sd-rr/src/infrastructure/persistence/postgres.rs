//! PostgreSQL repository implementation

use async_trait::async_trait;
use cuba_adapter_postgres::check_connection;
use cuba_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::Retur;
use crate::domain::repositories::ReturRepository;
use crate::domain::value_objects::ReturId;

use super::converters::retur_from_row;
use super::rows::ReturRow;

pub struct PostgresReturRepository {
    pool: PgPool,
}

impl PostgresReturRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReturRepository for PostgresReturRepository {
    async fn list_all(&self) -> AppResult<Vec<Retur>> {
        let rows = sqlx::query_as::<_, ReturRow>(
            r#"
            SELECT id, barang, alasan, status, pengembalian
            FROM returs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list returns: {}", e)))?;

        rows.into_iter().map(retur_from_row).collect()
    }

    async fn insert(&self, retur: &Retur) -> AppResult<Retur> {
        let row = sqlx::query_as::<_, ReturRow>(
            r#"
            INSERT INTO returs (id, barang, alasan, status, pengembalian)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, barang, alasan, status, pengembalian
            "#,
        )
        .bind(retur.id().value())
        .bind(retur.item())
        .bind(retur.reason())
        .bind(retur.status().as_str())
        .bind(retur.refund_method().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::conflict(format!("Return {} already exists", retur.id()))
            }
            other => AppError::database(format!("Failed to insert return: {}", other)),
        })?;

        retur_from_row(row)
    }

    async fn find_by_id(&self, id: ReturId) -> AppResult<Option<Retur>> {
        let row = sqlx::query_as::<_, ReturRow>(
            r#"
            SELECT id, barang, alasan, status, pengembalian
            FROM returs
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find return: {}", e)))?;

        row.map(retur_from_row).transpose()
    }

    async fn update(&self, retur: &Retur) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE returs
            SET barang = $2, alasan = $3, status = $4, pengembalian = $5
            WHERE id = $1
            "#,
        )
        .bind(retur.id().value())
        .bind(retur.item())
        .bind(retur.reason())
        .bind(retur.status().as_str())
        .bind(retur.refund_method().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update return: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Return {} not found", retur.id())));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: ReturId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM returs WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete return: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Return {} not found", id)));
        }
        Ok(())
    }

    async fn max_id(&self) -> AppResult<Option<ReturId>> {
        let max: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM returs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query max id: {}", e)))?;

        Ok(max.map(ReturId))
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(&self.pool).await
    }
}
