// src/db/supplier_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Supplier};

// Responsável por todas as interações com a tabela 'suppliers'.
#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(supplier)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (name, phone, address) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(phone)
        .bind(address)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn update<'e, E>(&self, executor: E, supplier: &Supplier) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET name = $2, phone = $3, address = $4, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(&supplier.address)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
