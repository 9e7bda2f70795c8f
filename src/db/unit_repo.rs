// src/db/unit_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::UnitOfMeasure};

// Responsável por todas as interações com a tabela 'units_of_measure'.
#[derive(Clone)]
pub struct UnitRepository {
    pool: PgPool,
}

impl UnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<UnitOfMeasure>, AppError> {
        let units = sqlx::query_as::<_, UnitOfMeasure>(
            "SELECT * FROM units_of_measure ORDER BY designation ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<UnitOfMeasure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit =
            sqlx::query_as::<_, UnitOfMeasure>("SELECT * FROM units_of_measure WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(unit)
    }

    pub async fn find_by_designation<'e, E>(
        &self,
        executor: E,
        designation: &str,
    ) -> Result<Option<UnitOfMeasure>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let unit = sqlx::query_as::<_, UnitOfMeasure>(
            "SELECT * FROM units_of_measure WHERE designation = $1",
        )
        .bind(designation)
        .fetch_optional(executor)
        .await?;
        Ok(unit)
    }

    pub async fn designation_taken<'e, E>(
        &self,
        executor: E,
        designation: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM units_of_measure WHERE designation = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(designation)
        .bind(excluding)
        .fetch_one(executor)
        .await?;
        Ok(taken)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        designation: &str,
        description: Option<&str>,
    ) -> Result<UnitOfMeasure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, UnitOfMeasure>(
            "INSERT INTO units_of_measure (designation, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(designation)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Uma unidade de medida com a designação {} já existe.",
                        designation
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        unit: &UnitOfMeasure,
    ) -> Result<UnitOfMeasure, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, UnitOfMeasure>(
            "UPDATE units_of_measure SET designation = $2, description = $3, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(unit.id)
        .bind(&unit.designation)
        .bind(&unit.description)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM units_of_measure WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
