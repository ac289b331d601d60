//! PostgreSQL implementation of WorkPlanReader.
//!
//! Loads the product applications of a cycle and their work packages in two
//! queries and hands them to `WorkPlan::new` for ordering and indexing.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::{column, db_error};
use crate::domain::foundation::{
    CropCycleId, DomainError, ErrorCode, MethodId, ProductApplicationId, WorkPackageId,
};
use crate::domain::work_plan::{
    ProductApplication, ProductApplicationStatus, WorkPackage, WorkPackageStatus, WorkPlan,
};
use crate::ports::WorkPlanReader;

#[derive(Clone)]
pub struct PostgresWorkPlanReader {
    pool: PgPool,
}

impl PostgresWorkPlanReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkPlanReader for PostgresWorkPlanReader {
    async fn load_for_cycle(&self, cycle_id: &CropCycleId) -> Result<WorkPlan, DomainError> {
        let product_rows = sqlx::query(
            r#"
            SELECT id, cycle_id, product_name, method_id, days_after_planting,
                   planned_start_date, planned_end_date, planned_rate,
                   planned_area_hectares, reported_progress,
                   est_product_cost, est_resource_cost,
                   act_product_cost, act_resource_cost, status
            FROM product_applications
            WHERE cycle_id = $1
            "#,
        )
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load product applications", e))?;

        let package_rows = sqlx::query(
            r#"
            SELECT wp.id, wp.product_application_id, wp.days_after_planting,
                   wp.execution_date, wp.area_hectares, wp.rate, wp.quantity,
                   wp.notes, wp.status
            FROM work_packages wp
            JOIN product_applications pa ON pa.id = wp.product_application_id
            WHERE pa.cycle_id = $1
            "#,
        )
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load work packages", e))?;

        let products = product_rows
            .iter()
            .map(row_to_product)
            .collect::<Result<Vec<_>, _>>()?;
        let packages = package_rows
            .iter()
            .map(row_to_package)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WorkPlan::new(*cycle_id, products, packages))
    }
}

fn row_to_product(row: &PgRow) -> Result<ProductApplication, DomainError> {
    let id: Uuid = column(row, "id")?;
    let cycle_id: Uuid = column(row, "cycle_id")?;
    let method_id: Option<String> = column(row, "method_id")?;
    let status: String = column(row, "status")?;

    Ok(ProductApplication {
        id: ProductApplicationId::from_uuid(id),
        cycle_id: CropCycleId::from_uuid(cycle_id),
        product_name: column(row, "product_name")?,
        method_id: method_id.map(MethodId::new).transpose()?,
        days_after_planting: column(row, "days_after_planting")?,
        planned_start_date: column(row, "planned_start_date")?,
        planned_end_date: column(row, "planned_end_date")?,
        planned_rate: column(row, "planned_rate")?,
        planned_area_hectares: column(row, "planned_area_hectares")?,
        reported_progress: column(row, "reported_progress")?,
        est_product_cost: column(row, "est_product_cost")?,
        est_resource_cost: column(row, "est_resource_cost")?,
        act_product_cost: column(row, "act_product_cost")?,
        act_resource_cost: column(row, "act_resource_cost")?,
        status: str_to_product_status(&status)?,
    })
}

fn row_to_package(row: &PgRow) -> Result<WorkPackage, DomainError> {
    let id: Uuid = column(row, "id")?;
    let product_id: Uuid = column(row, "product_application_id")?;
    let status: String = column(row, "status")?;

    Ok(WorkPackage {
        id: WorkPackageId::from_uuid(id),
        product_id: ProductApplicationId::from_uuid(product_id),
        days_after_planting: column(row, "days_after_planting")?,
        execution_date: column(row, "execution_date")?,
        area_hectares: column(row, "area_hectares")?,
        rate: column(row, "rate")?,
        quantity: column(row, "quantity")?,
        notes: column(row, "notes")?,
        status: str_to_package_status(&status)?,
    })
}

fn str_to_product_status(s: &str) -> Result<ProductApplicationStatus, DomainError> {
    ProductApplicationStatus::parse(s).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid product application status in database: {}", s),
        )
    })
}

fn str_to_package_status(s: &str) -> Result<WorkPackageStatus, DomainError> {
    WorkPackageStatus::parse(s).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid work package status in database: {}", s),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_status_round_trips_through_storage_strings() {
        for status in [
            ProductApplicationStatus::Planned,
            ProductApplicationStatus::InProgress,
            ProductApplicationStatus::Completed,
            ProductApplicationStatus::Cancelled,
        ] {
            assert_eq!(str_to_product_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn package_status_round_trips_through_storage_strings() {
        for status in [
            WorkPackageStatus::NotStarted,
            WorkPackageStatus::InProgress,
            WorkPackageStatus::Complete,
        ] {
            assert_eq!(str_to_package_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_database_error() {
        assert_eq!(
            str_to_package_status("done").unwrap_err().code,
            ErrorCode::DatabaseError
        );
    }
}
