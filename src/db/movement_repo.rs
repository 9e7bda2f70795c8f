// src/db/movement_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::movement::{MovementType, StockMovement},
};

// Responsável pela tabela 'stock_movements' (livro-razão das alterações).
#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_product(&self, product_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    pub async fn find_by_stock(&self, stock_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements WHERE stock_id = $1 ORDER BY created_at DESC",
        )
        .bind(stock_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        stock_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        note: Option<&str>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, stock_id, movement_type, quantity, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(stock_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(note)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    pub async fn delete_by_product<'e, E>(&self, executor: E, product_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM stock_movements WHERE product_id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_by_stock<'e, E>(&self, executor: E, stock_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM stock_movements WHERE stock_id = $1")
            .bind(stock_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
