// src/handlers/movements.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::actor::ActorIdentity,
    models::product::Product,
};

// --- DTO: Entrada / Saída ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub note: Option<String>,
}

// --- DTO: Transferência entre estoques ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub product_id: Uuid,
    pub destination_stock_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,

    pub note: Option<String>,
}

// POST /api/movements/entry
#[utoipa::path(
    post,
    path = "/api/movements/entry",
    tag = "Movimentações",
    request_body = MovementPayload,
    responses(
        (status = 200, description = "Entrada registrada; saldo atualizado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto inexistente")
    )
)]
pub async fn record_entry(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<MovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .movement_service
        .record_entry(payload.product_id, payload.quantity, payload.note.as_deref())
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!(
            "registrou entrada de {} unidades do produto {}",
            payload.quantity, product.name
        ),
    );

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/movements/exit
#[utoipa::path(
    post,
    path = "/api/movements/exit",
    tag = "Movimentações",
    request_body = MovementPayload,
    responses(
        (status = 200, description = "Saída registrada; saldo atualizado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto inexistente"),
        (status = 409, description = "Estoque insuficiente")
    )
)]
pub async fn record_exit(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<MovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .movement_service
        .record_exit(payload.product_id, payload.quantity, payload.note.as_deref())
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!(
            "registrou saída de {} unidades do produto {}",
            payload.quantity, product.name
        ),
    );

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/movements/transfer
#[utoipa::path(
    post,
    path = "/api/movements/transfer",
    tag = "Movimentações",
    request_body = TransferPayload,
    responses(
        (status = 200, description = "Transferência concluída; registro do destino", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto ou estoque de destino inexistente"),
        (status = 409, description = "Destino igual à origem ou estoque insuficiente")
    )
)]
pub async fn transfer(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<TransferPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .movement_service
        .transfer(
            payload.product_id,
            payload.destination_stock_id,
            payload.quantity,
            payload.note.as_deref(),
        )
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!(
            "transferiu {} unidades do produto {} para o estoque {}",
            payload.quantity, product.name, payload.destination_stock_id
        ),
    );

    Ok((StatusCode::OK, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantidade_zero_e_rejeitada() {
        let payload: MovementPayload = serde_json::from_value(serde_json::json!({
            "productId": "550e8400-e29b-41d4-a716-446655440000",
            "quantity": 0
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn transferencia_valida_aceita_camel_case() {
        let payload: TransferPayload = serde_json::from_value(serde_json::json!({
            "productId": "550e8400-e29b-41d4-a716-446655440000",
            "destinationStockId": "550e8400-e29b-41d4-a716-446655440001",
            "quantity": 3,
            "note": "reposição da loja"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
