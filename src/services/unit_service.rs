// src/services/unit_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::merge::{merge_optional_text, merge_text},
    db::{ProductRepository, UnitRepository},
    models::{
        catalog::{UnitOfMeasure, SENTINEL_UNIT},
        product::Product,
    },
};

#[derive(Clone)]
pub struct UnitService {
    unit_repo: UnitRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl UnitService {
    pub fn new(unit_repo: UnitRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self {
            unit_repo,
            product_repo,
            pool,
        }
    }

    pub async fn get_units(&self, id: Option<Uuid>) -> Result<Vec<UnitOfMeasure>, AppError> {
        if let Some(id) = id {
            let unit = self
                .unit_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Nenhuma unidade de medida com o id {} existe", id))
                })?;
            return Ok(vec![unit]);
        }

        let units = self.unit_repo.find_all().await?;
        if units.is_empty() {
            return Err(AppError::NotFound(
                "Nenhuma unidade de medida encontrada".to_string(),
            ));
        }
        Ok(units)
    }

    /// Produtos que usam a unidade, um representante por nome.
    pub async fn get_products(&self, id: Uuid) -> Result<Vec<Product>, AppError> {
        self.unit_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhuma unidade de medida com o id {} existe", id))
            })?;

        let products = self.product_repo.find_distinct_by_unit(id).await?;
        if products.is_empty() {
            return Err(AppError::NotFound(
                "Nenhum produto com esta unidade de medida.".to_string(),
            ));
        }
        Ok(products)
    }

    pub async fn create_unit(
        &self,
        designation: &str,
        description: Option<&str>,
    ) -> Result<UnitOfMeasure, AppError> {
        if self
            .unit_repo
            .designation_taken(&self.pool, designation, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Uma unidade de medida com a designação {} já existe.",
                designation
            )));
        }

        self.unit_repo
            .insert(&self.pool, designation, description)
            .await
    }

    pub async fn update_unit(
        &self,
        id: Uuid,
        designation: Option<&str>,
        description: Option<&str>,
    ) -> Result<UnitOfMeasure, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut unit = self
            .unit_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhuma unidade de medida com o id {} existe", id))
            })?;

        if let Some(new_designation) = designation {
            if !new_designation.is_empty()
                && new_designation != unit.designation
                && self
                    .unit_repo
                    .designation_taken(&mut *tx, new_designation, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(format!(
                    "Uma unidade de medida com a designação {} já existe.",
                    new_designation
                )));
            }
        }

        merge_text(&mut unit.designation, designation);
        merge_optional_text(&mut unit.description, description);

        let updated = self.unit_repo.update(&mut *tx, &unit).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Antes de remover, religa os produtos dependentes à unidade sentinela.
    /// A sentinela é semeada pela migração; sua ausência é erro de
    /// configuração, não um 404.
    pub async fn delete_unit(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let unit = self
            .unit_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhuma unidade de medida com o id {} existe", id))
            })?;

        if unit.designation == SENTINEL_UNIT {
            return Err(AppError::Conflict(format!(
                "A unidade {} é reservada e não pode ser removida.",
                SENTINEL_UNIT
            )));
        }

        if self.product_repo.exists_by_unit(&mut *tx, id).await? {
            let sentinel = self
                .unit_repo
                .find_by_designation(&mut *tx, SENTINEL_UNIT)
                .await?
                .ok_or_else(|| {
                    AppError::InternalServerError(anyhow::anyhow!(
                        "unidade sentinela '{}' ausente do banco",
                        SENTINEL_UNIT
                    ))
                })?;

            self.product_repo
                .reassign_unit(&mut *tx, id, sentinel.id)
                .await?;
        }

        self.unit_repo.delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}
