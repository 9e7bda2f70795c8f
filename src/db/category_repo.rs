// src/db/category_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Category};

// Responsável por todas as interações com a tabela 'categories'.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY designation ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(category)
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
            "SELECT EXISTS(SELECT 1 FROM categories WHERE designation = $1 \
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
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (designation, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(designation)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Uma categoria com a designação {} já existe.",
                        designation
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(&self, executor: E, category: &Category) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Category>(
            "UPDATE categories SET designation = $2, description = $3, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(category.id)
        .bind(&category.designation)
        .bind(&category.description)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
