//! PostgreSQL implementation of CropCycleRepository.
//!
//! The one-active-cycle-per-bloc invariant is enforced by the partial unique
//! index `crop_cycles_one_active_per_bloc`; closing is a conditional update
//! so two concurrent closes cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::{column, db_error, violates_constraint};
use crate::domain::crop_cycle::{CropCycle, CropCycleStatus, CycleType};
use crate::domain::foundation::{
    BlocId, CropCycleId, DomainError, ErrorCode, Timestamp, VarietyId,
};
use crate::ports::{BackendCapabilities, CropCycleRepository};

const ACTIVE_CYCLE_INDEX: &str = "crop_cycles_one_active_per_bloc";

const SELECT_COLUMNS: &str = r#"
    SELECT id, bloc_id, cycle_type, variety_id, intercrop_variety_id,
           cycle_number, parent_cycle_id,
           planting_date, regrowth_start_date, expected_harvest_date,
           expected_yield_tons_per_ha, actual_harvest_date, status,
           created_at, updated_at, closed_at
    FROM crop_cycles
"#;

/// PostgreSQL implementation of CropCycleRepository.
#[derive(Clone)]
pub struct PostgresCropCycleRepository {
    pool: PgPool,
    capabilities: BackendCapabilities,
}

impl PostgresCropCycleRepository {
    pub fn new(pool: PgPool, capabilities: BackendCapabilities) -> Self {
        Self { pool, capabilities }
    }
}

#[async_trait]
impl CropCycleRepository for PostgresCropCycleRepository {
    async fn insert_active(&self, cycle: &CropCycle) -> Result<(), DomainError> {
        if !self.capabilities.supports_mutation {
            return Err(DomainError::unsupported("create_cycle"));
        }
        let cycle_number = cycle_number_column(cycle.cycle_number())?;

        let result = sqlx::query(
            r#"
            INSERT INTO crop_cycles (
                id, bloc_id, cycle_type, variety_id, intercrop_variety_id,
                cycle_number, parent_cycle_id, planting_date, regrowth_start_date,
                expected_harvest_date, expected_yield_tons_per_ha, actual_harvest_date,
                status, created_at, updated_at, closed_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16
            )
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.bloc_id().as_str())
        .bind(cycle.cycle_type().as_str())
        .bind(cycle.variety_id().as_str())
        .bind(cycle.intercrop_variety_id().map(|v| v.as_str()))
        .bind(cycle_number)
        .bind(cycle.parent_cycle_id().map(|id| *id.as_uuid()))
        .bind(cycle.planting_date())
        .bind(cycle.regrowth_start_date())
        .bind(cycle.expected_harvest_date())
        .bind(cycle.expected_yield_tons_per_ha())
        .bind(cycle.actual_harvest_date())
        .bind(cycle.status().as_str())
        .bind(*cycle.created_at().as_datetime())
        .bind(*cycle.updated_at().as_datetime())
        .bind(cycle.closed_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if violates_constraint(&e, ACTIVE_CYCLE_INDEX) => Err(DomainError::new(
                ErrorCode::ActiveCycleExists,
                format!("Bloc {} already has an active crop cycle", cycle.bloc_id()),
            )
            .with_detail("bloc_id", cycle.bloc_id().as_str())),
            Err(e) => Err(db_error("insert crop cycle", e)),
        }
    }

    async fn close_active(&self, cycle: &CropCycle) -> Result<(), DomainError> {
        if !self.capabilities.supports_mutation {
            return Err(DomainError::unsupported("close_cycle"));
        }

        let result = sqlx::query(
            r#"
            UPDATE crop_cycles SET
                status = $2,
                actual_harvest_date = $3,
                closed_at = $4,
                updated_at = $5
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.status().as_str())
        .bind(cycle.actual_harvest_date())
        .bind(cycle.closed_at().map(|t| *t.as_datetime()))
        .bind(*cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("close crop cycle", e))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: Option<(String,)> =
            sqlx::query_as("SELECT status FROM crop_cycles WHERE id = $1")
                .bind(cycle.id().as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("check crop cycle", e))?;

        match exists {
            None => Err(DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Crop cycle not found: {}", cycle.id()),
            )),
            Some(_) => Err(DomainError::new(
                ErrorCode::CycleAlreadyClosed,
                format!("Crop cycle {} is already closed", cycle.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &CropCycleId) -> Result<Option<CropCycle>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load crop cycle", e))?;

        row.as_ref().map(row_to_cycle).transpose()
    }

    async fn find_active_by_bloc(
        &self,
        bloc_id: &BlocId,
    ) -> Result<Option<CropCycle>, DomainError> {
        let sql = format!("{} WHERE bloc_id = $1 AND status = 'active'", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(bloc_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load active crop cycle", e))?;

        row.as_ref().map(row_to_cycle).transpose()
    }

    async fn find_history_by_bloc(
        &self,
        bloc_id: &BlocId,
    ) -> Result<Vec<CropCycle>, DomainError> {
        let sql = format!(
            "{} WHERE bloc_id = $1 ORDER BY cycle_number DESC, created_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(bloc_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("load crop cycle history", e))?;

        rows.iter().map(row_to_cycle).collect()
    }
}

fn row_to_cycle(row: &PgRow) -> Result<CropCycle, DomainError> {
    let id: Uuid = column(row, "id")?;
    let bloc_id: String = column(row, "bloc_id")?;
    let cycle_type: String = column(row, "cycle_type")?;
    let variety_id: String = column(row, "variety_id")?;
    let intercrop_variety_id: Option<String> = column(row, "intercrop_variety_id")?;
    let cycle_number: i32 = column(row, "cycle_number")?;
    let parent_cycle_id: Option<Uuid> = column(row, "parent_cycle_id")?;
    let planting_date: Option<NaiveDate> = column(row, "planting_date")?;
    let regrowth_start_date: Option<NaiveDate> = column(row, "regrowth_start_date")?;
    let expected_harvest_date: NaiveDate = column(row, "expected_harvest_date")?;
    let expected_yield: f64 = column(row, "expected_yield_tons_per_ha")?;
    let actual_harvest_date: Option<NaiveDate> = column(row, "actual_harvest_date")?;
    let status: String = column(row, "status")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;
    let closed_at: Option<DateTime<Utc>> = column(row, "closed_at")?;

    let cycle_number = u32::try_from(cycle_number).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored cycle_number is negative: {}", cycle_number),
        )
    })?;

    Ok(CropCycle::reconstitute(
        CropCycleId::from_uuid(id),
        BlocId::new(bloc_id)?,
        str_to_cycle_type(&cycle_type)?,
        VarietyId::new(variety_id)?,
        intercrop_variety_id.map(VarietyId::new).transpose()?,
        cycle_number,
        parent_cycle_id.map(CropCycleId::from_uuid),
        planting_date,
        regrowth_start_date,
        expected_harvest_date,
        expected_yield,
        actual_harvest_date,
        str_to_cycle_status(&status)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        closed_at.map(Timestamp::from_datetime),
    ))
}

fn cycle_number_column(cycle_number: u32) -> Result<i32, DomainError> {
    i32::try_from(cycle_number).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("cycle_number {} does not fit the storage column", cycle_number),
        )
    })
}

fn str_to_cycle_type(s: &str) -> Result<CycleType, DomainError> {
    CycleType::parse(s).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid cycle type in database: {}", s),
        )
    })
}

fn str_to_cycle_status(s: &str) -> Result<CropCycleStatus, DomainError> {
    CropCycleStatus::parse(s).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid cycle status in database: {}", s),
        )
    })
}
