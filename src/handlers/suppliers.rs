// src/handlers/suppliers.rs

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
    common::error::AppError, config::AppState, middleware::actor::ActorIdentity,
    models::catalog::Supplier,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Fornecedores",
    responses(
        (status = 200, description = "Lista de fornecedores", body = Vec<Supplier>),
        (status = 404, description = "Nenhum fornecedor cadastrado")
    )
)]
pub async fn get_all_suppliers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.supplier_service.get_suppliers(None).await?;
    Ok((StatusCode::OK, Json(suppliers)))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "Id do fornecedor")),
    responses(
        (status = 200, description = "O fornecedor pedido", body = Vec<Supplier>),
        (status = 404, description = "Fornecedor inexistente")
    )
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.supplier_service.get_suppliers(Some(id)).await?;
    Ok((StatusCode::OK, Json(suppliers)))
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Fornecedores",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .create_supplier(
            &payload.name,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("criou o fornecedor {}", supplier.name));

    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "Id do fornecedor")),
    request_body = UpdateSupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor inexistente")
    )
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .update_supplier(
            id,
            payload.name.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("modificou o fornecedor {}", supplier.name));

    Ok((StatusCode::OK, Json(supplier)))
}

// DELETE /api/suppliers/{id}
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "Id do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor removido; produtos ficam sem fornecedor"),
        (status = 404, description = "Fornecedor inexistente")
    )
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.supplier_service.delete_supplier(id).await?;

    app_state
        .audit
        .record(&actor.0, &format!("removeu o fornecedor {}", id));

    Ok(StatusCode::NO_CONTENT)
}
