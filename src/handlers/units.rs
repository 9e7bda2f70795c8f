// src/handlers/units.rs

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
    models::{catalog::UnitOfMeasure, product::Product},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitPayload {
    #[validate(length(min = 1, message = "A designação é obrigatória."))]
    #[schema(example = "Kilogramme")]
    pub designation: String,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUnitPayload {
    pub designation: Option<String>,
    pub description: Option<String>,
}

// GET /api/units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Unidades de Medida",
    responses(
        (status = 200, description = "Lista de unidades de medida", body = Vec<UnitOfMeasure>),
        (status = 404, description = "Nenhuma unidade cadastrada")
    )
)]
pub async fn get_all_units(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state.unit_service.get_units(None).await?;
    Ok((StatusCode::OK, Json(units)))
}

// GET /api/units/{id}
#[utoipa::path(
    get,
    path = "/api/units/{id}",
    tag = "Unidades de Medida",
    params(("id" = Uuid, Path, description = "Id da unidade")),
    responses(
        (status = 200, description = "A unidade pedida", body = Vec<UnitOfMeasure>),
        (status = 404, description = "Unidade inexistente")
    )
)]
pub async fn get_unit(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state.unit_service.get_units(Some(id)).await?;
    Ok((StatusCode::OK, Json(units)))
}

// GET /api/units/{id}/products
#[utoipa::path(
    get,
    path = "/api/units/{id}/products",
    tag = "Unidades de Medida",
    params(("id" = Uuid, Path, description = "Id da unidade")),
    responses(
        (status = 200, description = "Produtos da unidade, um por nome", body = Vec<Product>),
        (status = 404, description = "Unidade inexistente ou sem produtos")
    )
)]
pub async fn get_unit_products(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.unit_service.get_products(id).await?;
    Ok((StatusCode::OK, Json(products)))
}

// POST /api/units
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Unidades de Medida",
    request_body = CreateUnitPayload,
    responses(
        (status = 201, description = "Unidade criada", body = UnitOfMeasure),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Designação já em uso")
    )
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<CreateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .unit_service
        .create_unit(&payload.designation, payload.description.as_deref())
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!("criou a unidade de medida {}", unit.designation),
    );

    Ok((StatusCode::CREATED, Json(unit)))
}

// PUT /api/units/{id}
#[utoipa::path(
    put,
    path = "/api/units/{id}",
    tag = "Unidades de Medida",
    params(("id" = Uuid, Path, description = "Id da unidade")),
    request_body = UpdateUnitPayload,
    responses(
        (status = 200, description = "Unidade atualizada", body = UnitOfMeasure),
        (status = 404, description = "Unidade inexistente"),
        (status = 409, description = "Designação já em uso")
    )
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let unit = app_state
        .unit_service
        .update_unit(
            id,
            payload.designation.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!("modificou a unidade de medida {}", unit.designation),
    );

    Ok((StatusCode::OK, Json(unit)))
}

// DELETE /api/units/{id}
#[utoipa::path(
    delete,
    path = "/api/units/{id}",
    tag = "Unidades de Medida",
    params(("id" = Uuid, Path, description = "Id da unidade")),
    responses(
        (status = 204, description = "Unidade removida; dependentes religados à sentinela"),
        (status = 404, description = "Unidade inexistente"),
        (status = 409, description = "A unidade sentinela não pode ser removida")
    )
)]
pub async fn delete_unit(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.unit_service.delete_unit(id).await?;

    app_state
        .audit
        .record(&actor.0, &format!("removeu a unidade de medida {}", id));

    Ok(StatusCode::NO_CONTENT)
}
