// src/services/movement_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MovementRepository, ProductRepository, StockRepository},
    models::{movement::MovementType, product::Product},
    services::product_service::ProductService,
};

// Entradas, saídas e transferências de estoque. Toda operação bloqueia o
// registro do produto (`FOR UPDATE`), grava a movimentação e recalcula a
// quantidade total do grupo, em uma única transação.
#[derive(Clone)]
pub struct MovementService {
    product_repo: ProductRepository,
    movement_repo: MovementRepository,
    stock_repo: StockRepository,
    product_service: ProductService,
    pool: PgPool,
}

impl MovementService {
    pub fn new(
        product_repo: ProductRepository,
        movement_repo: MovementRepository,
        stock_repo: StockRepository,
        product_service: ProductService,
        pool: PgPool,
    ) -> Self {
        Self {
            product_repo,
            movement_repo,
            stock_repo,
            product_service,
            pool,
        }
    }

    pub async fn record_entry(
        &self,
        product_id: Uuid,
        quantity: i32,
        note: Option<&str>,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id_for_update(&mut *tx, product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhum produto com o id {} existe", product_id))
            })?;

        self.product_repo
            .set_quantity(&mut *tx, product.id, product.quantity_in_stock + quantity)
            .await?;
        self.movement_repo
            .insert(
                &mut *tx,
                product.id,
                product.stock_id,
                MovementType::Entry,
                quantity,
                note,
            )
            .await?;

        self.product_service.refresh_group(&mut tx, &product.name).await?;

        let product = self.reload(&mut tx, product.id).await?;
        tx.commit().await?;
        Ok(product)
    }

    pub async fn record_exit(
        &self,
        product_id: Uuid,
        quantity: i32,
        note: Option<&str>,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id_for_update(&mut *tx, product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhum produto com o id {} existe", product_id))
            })?;

        if product.quantity_in_stock < quantity {
            return Err(AppError::Conflict(format!(
                "Estoque insuficiente para o produto {}.",
                product.name
            )));
        }

        self.product_repo
            .set_quantity(&mut *tx, product.id, product.quantity_in_stock - quantity)
            .await?;
        self.movement_repo
            .insert(
                &mut *tx,
                product.id,
                product.stock_id,
                MovementType::Exit,
                quantity,
                note,
            )
            .await?;

        self.product_service.refresh_group(&mut tx, &product.name).await?;

        let product = self.reload(&mut tx, product.id).await?;
        tx.commit().await?;
        Ok(product)
    }

    /// Move quantidade entre estoques. Se o produto ainda não existe no
    /// destino, um registro irmão é criado com os mesmos atributos — é assim
    /// que um nome passa a existir em mais de um estoque.
    pub async fn transfer(
        &self,
        product_id: Uuid,
        destination_stock_id: Uuid,
        quantity: i32,
        note: Option<&str>,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let source = self
            .product_repo
            .find_by_id_for_update(&mut *tx, product_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Nenhum produto com o id {} existe", product_id))
            })?;

        if source.stock_id == destination_stock_id {
            return Err(AppError::Conflict(
                "O estoque de destino é o mesmo de origem.".to_string(),
            ));
        }

        self.stock_repo
            .find_by_id(&mut *tx, destination_stock_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Nenhum estoque com o id {} existe",
                    destination_stock_id
                ))
            })?;

        if source.quantity_in_stock < quantity {
            return Err(AppError::Conflict(format!(
                "Estoque insuficiente para o produto {}.",
                source.name
            )));
        }

        let destination = match self
            .product_repo
            .find_by_name_and_stock(&mut *tx, &source.name, destination_stock_id)
            .await?
        {
            Some(sibling) => {
                // Relê com bloqueio antes de mexer no saldo.
                let sibling = self
                    .product_repo
                    .find_by_id_for_update(&mut *tx, sibling.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalServerError(anyhow::anyhow!(
                            "registro irmão sumiu durante a transferência"
                        ))
                    })?;
                self.product_repo
                    .set_quantity(&mut *tx, sibling.id, sibling.quantity_in_stock + quantity)
                    .await?
            }
            None => {
                self.product_repo
                    .insert(
                        &mut *tx,
                        &source.name,
                        source.description.as_deref(),
                        source.product_type.as_deref(),
                        source.purchase_price,
                        quantity,
                        source.min_quantity,
                        source.category_id,
                        source.supplier_id,
                        source.unit_id,
                        destination_stock_id,
                    )
                    .await?
            }
        };

        self.product_repo
            .set_quantity(&mut *tx, source.id, source.quantity_in_stock - quantity)
            .await?;

        self.movement_repo
            .insert(
                &mut *tx,
                source.id,
                source.stock_id,
                MovementType::TransferOut,
                quantity,
                note,
            )
            .await?;
        self.movement_repo
            .insert(
                &mut *tx,
                destination.id,
                destination_stock_id,
                MovementType::TransferIn,
                quantity,
                note,
            )
            .await?;

        self.product_service.refresh_group(&mut tx, &source.name).await?;

        let destination = self.reload(&mut tx, destination.id).await?;
        tx.commit().await?;
        Ok(destination)
    }

    async fn reload(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: Uuid,
    ) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(&mut **tx, id)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(anyhow::anyhow!("produto ausente após a operação"))
            })
    }
}
