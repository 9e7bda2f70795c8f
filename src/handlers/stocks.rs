// src/handlers/stocks.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::ActorIdentity,
    models::{
        movement::StockMovement,
        product::Product,
        stock::{Inventory, Stock},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockPayload {
    #[validate(length(min = 1, message = "A localização é obrigatória."))]
    #[schema(example = "Entrepôt Nord")]
    pub designation: String,

    pub phone: Option<String>,
    pub fax: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryPayload {
    pub note: Option<String>,
}

// GET /api/stocks
#[utoipa::path(
    get,
    path = "/api/stocks",
    tag = "Estoques",
    responses(
        (status = 200, description = "Lista de estoques", body = Vec<Stock>),
        (status = 404, description = "Nenhum estoque cadastrado")
    )
)]
pub async fn get_all_stocks(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stocks = app_state.stock_service.get_stocks(None).await?;
    Ok((StatusCode::OK, Json(stocks)))
}

// GET /api/stocks/{id}
#[utoipa::path(
    get,
    path = "/api/stocks/{id}",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    responses(
        (status = 200, description = "O estoque pedido", body = Vec<Stock>),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn get_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stocks = app_state.stock_service.get_stocks(Some(id)).await?;
    Ok((StatusCode::OK, Json(stocks)))
}

// GET /api/stocks/{id}/products
#[utoipa::path(
    get,
    path = "/api/stocks/{id}/products",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    responses(
        (status = 200, description = "Produtos do estoque (pode ser vazia)", body = Vec<Product>),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn get_stock_products(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.stock_service.get_products(id).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/stocks/{id}/movements
#[utoipa::path(
    get,
    path = "/api/stocks/{id}/movements",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    responses(
        (status = 200, description = "Movimentações do estoque", body = Vec<StockMovement>),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn get_stock_movements(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state.stock_service.get_movements(id).await?;
    Ok((StatusCode::OK, Json(movements)))
}

// GET /api/stocks/{id}/inventories
#[utoipa::path(
    get,
    path = "/api/stocks/{id}/inventories",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    responses(
        (status = 200, description = "Inventários do estoque", body = Vec<Inventory>),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn get_stock_inventories(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let inventories = app_state.stock_service.get_inventories(id).await?;
    Ok((StatusCode::OK, Json(inventories)))
}

// POST /api/stocks/{id}/inventories
#[utoipa::path(
    post,
    path = "/api/stocks/{id}/inventories",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    request_body = CreateInventoryPayload,
    responses(
        (status = 201, description = "Inventário registrado", body = Inventory),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn create_stock_inventory(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateInventoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let inventory = app_state
        .stock_service
        .create_inventory(id, payload.note.as_deref())
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("registrou um inventário no estoque {}", id));

    Ok((StatusCode::CREATED, Json(inventory)))
}

// POST /api/stocks
#[utoipa::path(
    post,
    path = "/api/stocks",
    tag = "Estoques",
    request_body = CreateStockPayload,
    responses(
        (status = 201, description = "Estoque criado", body = Stock),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Localização já em uso")
    )
)]
pub async fn create_stock(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<CreateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let stock = app_state
        .stock_service
        .create_stock(
            &payload.designation,
            payload.phone.as_deref(),
            payload.fax.as_deref(),
        )
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!("criou um estoque na localização {}", stock.designation),
    );

    Ok((StatusCode::CREATED, Json(stock)))
}

// PUT /api/stocks/{id}
#[utoipa::path(
    put,
    path = "/api/stocks/{id}",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    request_body = UpdateStockPayload,
    responses(
        (status = 200, description = "Estoque atualizado", body = Stock),
        (status = 404, description = "Estoque inexistente"),
        (status = 409, description = "Localização já em uso")
    )
)]
pub async fn update_stock(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let stock = app_state
        .stock_service
        .update_stock(
            id,
            payload.designation.as_deref(),
            payload.phone.as_deref(),
            payload.fax.as_deref(),
        )
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("modificou o estoque {}", stock.designation));

    Ok((StatusCode::OK, Json(stock)))
}

// DELETE /api/stocks/{id}
#[utoipa::path(
    delete,
    path = "/api/stocks/{id}",
    tag = "Estoques",
    params(("id" = Uuid, Path, description = "Id do estoque")),
    responses(
        (status = 204, description = "Estoque e produtos contidos removidos"),
        (status = 404, description = "Estoque inexistente")
    )
)]
pub async fn delete_stock(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.stock_service.delete_stock(id).await?;

    app_state
        .audit
        .record(&actor.0, &format!("removeu o estoque {}", id));

    Ok(StatusCode::NO_CONTENT)
}
