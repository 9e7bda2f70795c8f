// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    common::audit::AuditNotifier,
    db::{
        CategoryRepository, MovementRepository, ProductRepository, StockRepository,
        SupplierRepository, UnitRepository,
    },
    services::{
        CategoryService, MovementService, ProductService, StockService, SupplierService,
        UnitService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub audit: AuditNotifier,
    pub product_service: ProductService,
    pub category_service: CategoryService,
    pub unit_service: UnitService,
    pub supplier_service: SupplierService,
    pub stock_service: StockService,
    pub movement_service: MovementService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let category_repo = CategoryRepository::new(db_pool.clone());
        let unit_repo = UnitRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let stock_repo = StockRepository::new(db_pool.clone());
        let movement_repo = MovementRepository::new(db_pool.clone());

        let product_service = ProductService::new(
            product_repo.clone(),
            movement_repo.clone(),
            db_pool.clone(),
        );
        let category_service =
            CategoryService::new(category_repo, product_repo.clone(), db_pool.clone());
        let unit_service = UnitService::new(unit_repo, product_repo.clone(), db_pool.clone());
        let supplier_service = SupplierService::new(supplier_repo, db_pool.clone());
        // O StockService e o MovementService compõem o ProductService: a
        // cascata de remoção e as movimentações reutilizam a recomputação
        // de totais por grupo de nome.
        let stock_service = StockService::new(
            stock_repo.clone(),
            product_repo.clone(),
            movement_repo.clone(),
            product_service.clone(),
            db_pool.clone(),
        );
        let movement_service = MovementService::new(
            product_repo,
            movement_repo,
            stock_repo,
            product_service.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            audit: AuditNotifier::new(),
            product_service,
            category_service,
            unit_service,
            supplier_service,
            stock_service,
            movement_service,
        })
    }
}
