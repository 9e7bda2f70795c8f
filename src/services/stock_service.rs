// src/services/stock_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::merge::{merge_optional_text, merge_text},
    db::{MovementRepository, ProductRepository, StockRepository},
    models::{
        movement::StockMovement,
        product::Product,
        stock::{Inventory, Stock},
    },
    services::product_service::ProductService,
};

#[derive(Clone)]
pub struct StockService {
    stock_repo: StockRepository,
    product_repo: ProductRepository,
    movement_repo: MovementRepository,
    product_service: ProductService,
    pool: PgPool,
}

impl StockService {
    pub fn new(
        stock_repo: StockRepository,
        product_repo: ProductRepository,
        movement_repo: MovementRepository,
        product_service: ProductService,
        pool: PgPool,
    ) -> Self {
        Self {
            stock_repo,
            product_repo,
            movement_repo,
            product_service,
            pool,
        }
    }

    pub async fn get_stocks(&self, id: Option<Uuid>) -> Result<Vec<Stock>, AppError> {
        if let Some(id) = id {
            let stock = self
                .stock_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Nenhum estoque com o id {} existe", id)))?;
            return Ok(vec![stock]);
        }

        let stocks = self.stock_repo.find_all().await?;
        if stocks.is_empty() {
            return Err(AppError::NotFound("Nenhum estoque encontrado".to_string()));
        }
        Ok(stocks)
    }

    /// Produtos do estoque, sem deduplicação. Lista vazia é resposta válida.
    pub async fn get_products(&self, id: Uuid) -> Result<Vec<Product>, AppError> {
        self.ensure_stock(id).await?;
        self.product_repo.find_by_stock(&self.pool, id).await
    }

    pub async fn get_movements(&self, id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.ensure_stock(id).await?;
        self.movement_repo.find_by_stock(id).await
    }

    pub async fn get_inventories(&self, id: Uuid) -> Result<Vec<Inventory>, AppError> {
        self.ensure_stock(id).await?;
        self.stock_repo.find_inventories(&self.pool, id).await
    }

    pub async fn create_inventory(&self, id: Uuid, note: Option<&str>) -> Result<Inventory, AppError> {
        self.ensure_stock(id).await?;
        self.stock_repo.insert_inventory(&self.pool, id, note).await
    }

    pub async fn create_stock(
        &self,
        designation: &str,
        phone: Option<&str>,
        fax: Option<&str>,
    ) -> Result<Stock, AppError> {
        if self
            .stock_repo
            .designation_taken(&self.pool, designation, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Um estoque na localização {} já existe.",
                designation
            )));
        }

        self.stock_repo
            .insert(&self.pool, designation, phone, fax)
            .await
    }

    pub async fn update_stock(
        &self,
        id: Uuid,
        designation: Option<&str>,
        phone: Option<&str>,
        fax: Option<&str>,
    ) -> Result<Stock, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut stock = self
            .stock_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum estoque com o id {} existe", id)))?;

        if let Some(new_designation) = designation {
            if !new_designation.is_empty()
                && new_designation != stock.designation
                && self
                    .stock_repo
                    .designation_taken(&mut *tx, new_designation, Some(id))
                    .await?
            {
                return Err(AppError::Conflict(format!(
                    "Um estoque na localização {} já existe.",
                    new_designation
                )));
            }
        }

        merge_text(&mut stock.designation, designation);
        merge_optional_text(&mut stock.phone, phone);
        merge_optional_text(&mut stock.fax, fax);

        let updated = self.stock_repo.update(&mut *tx, &stock).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Remove o estoque em cascata: cada produto contido (com suas
    /// movimentações), as movimentações e os inventários do local, e por fim
    /// o próprio registro. Os totais dos grupos afetados são recalculados
    /// sobre os estoques sobreviventes. Tudo em uma transação.
    pub async fn delete_stock(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.stock_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum estoque com o id {} existe", id)))?;

        let products = self.product_repo.find_by_stock(&mut *tx, id).await?;
        for product in &products {
            self.product_service.delete_in_tx(&mut tx, product.id).await?;
        }

        self.movement_repo.delete_by_stock(&mut *tx, id).await?;
        self.stock_repo
            .delete_inventories_by_stock(&mut *tx, id)
            .await?;
        self.stock_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn ensure_stock(&self, id: Uuid) -> Result<Stock, AppError> {
        self.stock_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nenhum estoque com o id {} existe", id)))
    }
}
