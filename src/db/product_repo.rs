// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras simples (usam a pool principal)
    // ---

    /// Lista um representante por nome, em ordem lexicográfica.
    pub async fn find_all_distinct(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT DISTINCT ON (name) * FROM products ORDER BY name ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_distinct_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT DISTINCT ON (name) * FROM products WHERE category_id = $1 \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_distinct_by_unit(&self, unit_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT DISTINCT ON (name) * FROM products WHERE unit_id = $1 \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Leituras que participam de transações (padrão 'Executor')
    // ---

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    /// Busca e bloqueia um registro (`FOR UPDATE`) para mutação de saldo.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(product)
    }

    pub async fn find_all_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name = $1 ORDER BY created_at ASC",
        )
        .bind(name)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    /// Busca e bloqueia o grupo inteiro de mesmo nome. Serializa recomputações
    /// concorrentes da quantidade total por nome.
    pub async fn find_all_by_name_for_update<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name = $1 ORDER BY created_at ASC FOR UPDATE",
        )
        .bind(name)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    pub async fn find_by_name_and_stock<'e, E>(
        &self,
        executor: E,
        name: &str,
        stock_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name = $1 AND stock_id = $2",
        )
        .bind(name)
        .bind(stock_id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn find_by_stock<'e, E>(
        &self,
        executor: E,
        stock_id: Uuid,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE stock_id = $1 ORDER BY name ASC",
        )
        .bind(stock_id)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    /// Verifica se o nome já pertence a outro registro (chave de negócio).
    pub async fn name_taken<'e, E>(
        &self,
        executor: E,
        name: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(excluding)
        .fetch_one(executor)
        .await?;
        Ok(taken)
    }

    pub async fn exists_by_category<'e, E>(
        &self,
        executor: E,
        category_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn exists_by_unit<'e, E>(&self, executor: E, unit_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE unit_id = $1)")
                .bind(unit_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    // ---
    // Escritas (transacionais)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        product_type: Option<&str>,
        purchase_price: Decimal,
        quantity_in_stock: i32,
        min_quantity: i32,
        category_id: Uuid,
        supplier_id: Option<Uuid>,
        unit_id: Uuid,
        stock_id: Uuid,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, product_type, purchase_price, quantity_in_stock,
                 min_quantity, category_id, supplier_id, unit_id, stock_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(product_type)
        .bind(purchase_price)
        .bind(quantity_in_stock)
        .bind(min_quantity)
        .bind(category_id)
        .bind(supplier_id)
        .bind(unit_id)
        .bind(stock_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Um produto com o nome {} já existe neste estoque.",
                        name
                    ));
                }
            }
            e.into()
        })
    }

    /// Persiste o registro inteiro já mesclado pelo service.
    pub async fn update<'e, E>(&self, executor: E, product: &Product) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                product_type = $4,
                purchase_price = $5,
                quantity_in_stock = $6,
                min_quantity = $7,
                category_id = $8,
                supplier_id = $9,
                unit_id = $10,
                stock_id = $11,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.product_type)
        .bind(product.purchase_price)
        .bind(product.quantity_in_stock)
        .bind(product.min_quantity)
        .bind(product.category_id)
        .bind(product.supplier_id)
        .bind(product.unit_id)
        .bind(product.stock_id)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    pub async fn set_quantity<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity_in_stock: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Product>(
            "UPDATE products SET quantity_in_stock = $2, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(quantity_in_stock)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }

    /// Grava a quantidade total derivada em todos os registros do grupo.
    pub async fn set_total_quantity<'e, E>(
        &self,
        executor: E,
        name: &str,
        total: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE products SET total_quantity = $2, updated_at = now() WHERE name = $1")
            .bind(name)
            .bind(total)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Religa os produtos de uma unidade removida à unidade sentinela.
    pub async fn reassign_unit<'e, E>(
        &self,
        executor: E,
        from_unit: Uuid,
        to_unit: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE products SET unit_id = $2, updated_at = now() WHERE unit_id = $1")
                .bind(from_unit)
                .bind(to_unit)
                .execute(executor)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
