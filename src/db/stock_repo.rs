// src/db/stock_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::stock::{Inventory, Stock},
};

// Responsável pelas tabelas 'stocks' e 'inventories'.
#[derive(Clone)]
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Stock>, AppError> {
        let stocks = sqlx::query_as::<_, Stock>("SELECT * FROM stocks ORDER BY designation ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(stocks)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Stock>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(stock)
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
            "SELECT EXISTS(SELECT 1 FROM stocks WHERE designation = $1 \
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
        phone: Option<&str>,
        fax: Option<&str>,
    ) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Stock>(
            "INSERT INTO stocks (designation, phone, fax) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(designation)
        .bind(phone)
        .bind(fax)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Um estoque na localização {} já existe.",
                        designation
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(&self, executor: E, stock: &Stock) -> Result<Stock, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Stock>(
            "UPDATE stocks SET designation = $2, phone = $3, fax = $4, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(stock.id)
        .bind(&stock.designation)
        .bind(&stock.phone)
        .bind(&stock.fax)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM stocks WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Inventários (contagens do estoque)
    // ---

    pub async fn find_inventories<'e, E>(
        &self,
        executor: E,
        stock_id: Uuid,
    ) -> Result<Vec<Inventory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inventories = sqlx::query_as::<_, Inventory>(
            "SELECT * FROM inventories WHERE stock_id = $1 ORDER BY created_at DESC",
        )
        .bind(stock_id)
        .fetch_all(executor)
        .await?;
        Ok(inventories)
    }

    pub async fn insert_inventory<'e, E>(
        &self,
        executor: E,
        stock_id: Uuid,
        note: Option<&str>,
    ) -> Result<Inventory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inventory = sqlx::query_as::<_, Inventory>(
            "INSERT INTO inventories (stock_id, note) VALUES ($1, $2) RETURNING *",
        )
        .bind(stock_id)
        .bind(note)
        .fetch_one(executor)
        .await?;
        Ok(inventory)
    }

    pub async fn delete_inventories_by_stock<'e, E>(
        &self,
        executor: E,
        stock_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM inventories WHERE stock_id = $1")
            .bind(stock_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
