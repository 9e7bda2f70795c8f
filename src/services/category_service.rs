// src/services/category_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::merge::{merge_optional_text, merge_text},
    db::{CategoryRepository, ProductRepository},
    models::{catalog::Category, product::Product},
};

#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl CategoryService {
    pub fn new(category_repo: CategoryRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self {
            category_repo,
            product_repo,
            pool,
        }
    }

    pub async fn get_categories(&self, id: Option<Uuid>) -> Result<Vec<Category>, AppError> {
        if let Some(id) = id {
            let category = self
                .category_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Nenhuma categoria com o id {} existe", id))
                })?;
            return Ok(vec![category]);
        }

        let categories = self.category_repo.find_all().await?;
        if categories.is_empty() {
            return Err(AppError::NotFound("Nenhuma categoria encontrada".to_string()));
        }
        Ok(categories)
    }

    /// Produtos da categoria, um representante por nome, em ordem alfabética.
    pub async fn get_products(&self, id: Uuid) -> Result<Vec<Product>, AppError> {
        self.category_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhuma categoria com o id {} existe", id)))?;

        let products = self.product_repo.find_distinct_by_category(id).await?;
        if products.is_empty() {
            return Err(AppError::NotFound(
                "Nenhum produto encontrado nesta categoria".to_string(),
            ));
        }
        Ok(products)
    }

    pub async fn create_category(
        &self,
        designation: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        if self
            .category_repo
            .designation_taken(&self.pool, designation, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Uma categoria com a designação {} já existe.",
                designation
            )));
        }

        self.category_repo
            .insert(&self.pool, designation, description)
            .await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        designation: Option<&str>,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut category = self
            .category_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhuma categoria com o id {} existe", id)))?;

        if let Some(new_designation) = designation {
            if !new_designation.is_empty()
                && new_designation != category.designation
                && self
                    .category_repo
                    .designation_taken(&mut *tx, new_designation, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(format!(
                    "Uma categoria com a designação {} já existe.",
                    new_designation
                )));
            }
        }

        merge_text(&mut category.designation, designation);
        merge_optional_text(&mut category.description, description);

        let updated = self.category_repo.update(&mut *tx, &category).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// A remoção é bloqueada enquanto existirem produtos na categoria:
    /// nenhum produto pode ficar apontando para uma categoria removida.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let category = self
            .category_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhuma categoria com o id {} existe", id)))?;

        if self.product_repo.exists_by_category(&mut *tx, id).await? {
            return Err(AppError::Conflict(format!(
                "A categoria {} possui produtos e não pode ser removida.",
                category.designation
            )));
        }

        self.category_repo.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}
