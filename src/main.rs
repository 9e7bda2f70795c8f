// src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização (inclui a unidade sentinela).
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::get_all_products).post(handlers::products::create_product),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/{id}/movements", get(handlers::products::get_product_movements))
        .route("/by-name/{name}", get(handlers::products::get_products_by_name))
        .route(
            "/by-name/{name}/refresh-total",
            post(handlers::products::refresh_total_quantity),
        );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::get_all_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            "/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/{id}/products",
            get(handlers::categories::get_category_products),
        );

    let unit_routes = Router::new()
        .route(
            "/",
            get(handlers::units::get_all_units).post(handlers::units::create_unit),
        )
        .route(
            "/{id}",
            get(handlers::units::get_unit)
                .put(handlers::units::update_unit)
                .delete(handlers::units::delete_unit),
        )
        .route("/{id}/products", get(handlers::units::get_unit_products));

    let supplier_routes = Router::new()
        .route(
            "/",
            get(handlers::suppliers::get_all_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        );

    let stock_routes = Router::new()
        .route(
            "/",
            get(handlers::stocks::get_all_stocks).post(handlers::stocks::create_stock),
        )
        .route(
            "/{id}",
            get(handlers::stocks::get_stock)
                .put(handlers::stocks::update_stock)
                .delete(handlers::stocks::delete_stock),
        )
        .route("/{id}/products", get(handlers::stocks::get_stock_products))
        .route("/{id}/movements", get(handlers::stocks::get_stock_movements))
        .route(
            "/{id}/inventories",
            get(handlers::stocks::get_stock_inventories)
                .post(handlers::stocks::create_stock_inventory),
        );

    let movement_routes = Router::new()
        .route("/entry", post(handlers::movements::record_entry))
        .route("/exit", post(handlers::movements::record_exit))
        .route("/transfer", post(handlers::movements::transfer));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/products", product_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/units", unit_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/stocks", stock_routes)
        .nest("/api/movements", movement_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
