//! PostgreSQL implementation of BlocReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::errors::{column, db_error};
use crate::domain::bloc::{Bloc, BlocStatus};
use crate::domain::foundation::{BlocId, DomainError, ErrorCode};
use crate::ports::BlocReader;

#[derive(Clone)]
pub struct PostgresBlocReader {
    pool: PgPool,
}

impl PostgresBlocReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlocReader for PostgresBlocReader {
    async fn find_by_id(&self, id: &BlocId) -> Result<Option<Bloc>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, area_hectares, status
            FROM blocs
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("load bloc", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = column(&row, "id")?;
        let name: String = column(&row, "name")?;
        let area_hectares: f64 = column(&row, "area_hectares")?;
        let status: String = column(&row, "status")?;

        let status = BlocStatus::parse(&status).map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid bloc status in database: {}", status),
            )
        })?;

        Ok(Some(Bloc::new(BlocId::new(id)?, name, area_hectares, status)?))
    }
}
