// src/handlers/products.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::ActorIdentity,
    models::{movement::StockMovement, product::Product},
    services::product_service::ProductUpdate,
};

// ---
// Validação customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Sucre")]
    pub name: String,

    pub description: Option<String>,

    pub product_type: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub purchase_price: Decimal,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    #[serde(default)]
    pub quantity_in_stock: i32,

    #[validate(range(min = 0, message = "A quantidade mínima não pode ser negativa."))]
    #[serde(default)]
    pub min_quantity: i32,

    pub category_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub unit_id: Uuid,
    pub stock_id: Uuid,
}

// ---
// Payload: UpdateProduct (todos os campos opcionais)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub product_type: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Option<Decimal>,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity_in_stock: Option<i32>,

    #[validate(range(min = 0, message = "A quantidade mínima não pode ser negativa."))]
    pub min_quantity: Option<i32>,
}

impl From<UpdateProductPayload> for ProductUpdate {
    fn from(payload: UpdateProductPayload) -> Self {
        ProductUpdate {
            name: payload.name,
            description: payload.description,
            product_type: payload.product_type,
            purchase_price: payload.purchase_price,
            quantity_in_stock: payload.quantity_in_stock,
            min_quantity: payload.min_quantity,
        }
    }
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    responses(
        (status = 200, description = "Um representante por nome, em ordem alfabética", body = Vec<Product>),
        (status = 404, description = "Nenhum produto cadastrado")
    )
)]
pub async fn get_all_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.get_products(None).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "O produto pedido", body = Vec<Product>),
        (status = 404, description = "Produto inexistente")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.get_products(Some(id)).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/by-name/{name}
#[utoipa::path(
    get,
    path = "/api/products/by-name/{name}",
    tag = "Produtos",
    params(("name" = String, Path, description = "Nome do produto")),
    responses(
        (status = 200, description = "Todas as variantes do nome, uma por estoque", body = Vec<Product>),
        (status = 404, description = "Nenhum produto com esse nome")
    )
)]
pub async fn get_products_by_name(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.get_products_by_name(&name).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}/movements
#[utoipa::path(
    get,
    path = "/api/products/{id}/movements",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Histórico de movimentações do produto", body = Vec<StockMovement>),
        (status = 404, description = "Produto inexistente")
    )
)]
pub async fn get_product_movements(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state.product_service.get_movements(id).await?;
    Ok((StatusCode::OK, Json(movements)))
}

// POST /api/products/by-name/{name}/refresh-total
#[utoipa::path(
    post,
    path = "/api/products/by-name/{name}/refresh-total",
    tag = "Produtos",
    params(("name" = String, Path, description = "Nome do produto")),
    responses(
        (status = 204, description = "Quantidade total do grupo recalculada"),
        (status = 404, description = "Nenhum produto com esse nome")
    )
)]
pub async fn refresh_total_quantity(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.refresh_total_quantity(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Nome já em uso")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create_product(
            &payload.name,
            payload.description.as_deref(),
            payload.product_type.as_deref(),
            payload.purchase_price,
            payload.quantity_in_stock,
            payload.min_quantity,
            payload.category_id,
            payload.supplier_id,
            payload.unit_id,
            payload.stock_id,
        )
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("criou o produto {}", product.name));

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "Id do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto inexistente"),
        (status = 409, description = "Nome já em uso por outro produto")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update_product(id, &payload.into())
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("modificou o produto {}", product.name));

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto inexistente")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete_product(id).await?;

    app_state
        .audit
        .record(&actor.0, &format!("removeu o produto {}", id));

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_de_criacao_aceita_camel_case() {
        let payload: CreateProductPayload = serde_json::from_value(serde_json::json!({
            "name": "Sucre",
            "purchasePrice": 4.5,
            "quantityInStock": 10,
            "minQuantity": 2,
            "categoryId": "550e8400-e29b-41d4-a716-446655440000",
            "unitId": "550e8400-e29b-41d4-a716-446655440001",
            "stockId": "550e8400-e29b-41d4-a716-446655440002"
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.quantity_in_stock, 10);
        assert_eq!(payload.supplier_id, None);
    }

    #[test]
    fn quantidade_negativa_e_rejeitada() {
        let payload: CreateProductPayload = serde_json::from_value(serde_json::json!({
            "name": "Sucre",
            "quantityInStock": -3,
            "categoryId": "550e8400-e29b-41d4-a716-446655440000",
            "unitId": "550e8400-e29b-41d4-a716-446655440001",
            "stockId": "550e8400-e29b-41d4-a716-446655440002"
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn nome_vazio_e_rejeitado_na_criacao() {
        let payload: CreateProductPayload = serde_json::from_value(serde_json::json!({
            "name": "",
            "categoryId": "550e8400-e29b-41d4-a716-446655440000",
            "unitId": "550e8400-e29b-41d4-a716-446655440001",
            "stockId": "550e8400-e29b-41d4-a716-446655440002"
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn atualizacao_sem_campos_e_valida() {
        let payload: UpdateProductPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.validate().is_ok());

        let update: ProductUpdate = payload.into();
        assert!(update.name.is_none());
        assert!(update.quantity_in_stock.is_none());
    }

    #[test]
    fn preco_negativo_e_rejeitado_na_atualizacao() {
        let payload: UpdateProductPayload =
            serde_json::from_value(serde_json::json!({ "purchasePrice": -1.0 })).unwrap();
        assert!(payload.validate().is_err());
    }
}
