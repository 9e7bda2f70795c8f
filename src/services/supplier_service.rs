// src/services/supplier_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::merge::{merge_optional_text, merge_text},
    db::SupplierRepository,
    models::catalog::Supplier,
};

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
    pool: PgPool,
}

impl SupplierService {
    pub fn new(supplier_repo: SupplierRepository, pool: PgPool) -> Self {
        Self {
            supplier_repo,
            pool,
        }
    }

    pub async fn get_suppliers(&self, id: Option<Uuid>) -> Result<Vec<Supplier>, AppError> {
        if let Some(id) = id {
            let supplier = self
                .supplier_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Nenhum fornecedor com o id {} existe", id))
                })?;
            return Ok(vec![supplier]);
        }

        let suppliers = self.supplier_repo.find_all().await?;
        if suppliers.is_empty() {
            return Err(AppError::NotFound("Nenhum fornecedor encontrado".to_string()));
        }
        Ok(suppliers)
    }

    pub async fn create_supplier(
        &self,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .insert(&self.pool, name, phone, address)
            .await
    }

    pub async fn update_supplier(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut supplier = self
            .supplier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum fornecedor com o id {} existe", id)))?;

        merge_text(&mut supplier.name, name);
        merge_optional_text(&mut supplier.phone, phone);
        merge_optional_text(&mut supplier.address, address);

        let updated = self.supplier_repo.update(&mut *tx, &supplier).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Produtos que apontavam para o fornecedor ficam com a referência nula
    /// (ON DELETE SET NULL no esquema).
    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), AppError> {
        self.supplier_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum fornecedor com o id {} existe", id)))?;

        self.supplier_repo.delete(&self.pool, id).await
    }
}
