// src/handlers/categories.rs

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
    models::{catalog::Category, product::Product},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "A designação é obrigatória."))]
    #[schema(example = "Alimentos")]
    pub designation: String,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    pub designation: Option<String>,
    pub description: Option<String>,
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categorias",
    responses(
        (status = 200, description = "Lista de categorias", body = Vec<Category>),
        (status = 404, description = "Nenhuma categoria cadastrada")
    )
)]
pub async fn get_all_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.category_service.get_categories(None).await?;
    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/categories/{id}
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "Id da categoria")),
    responses(
        (status = 200, description = "A categoria pedida", body = Vec<Category>),
        (status = 404, description = "Categoria inexistente")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.category_service.get_categories(Some(id)).await?;
    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/categories/{id}/products
#[utoipa::path(
    get,
    path = "/api/categories/{id}/products",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "Id da categoria")),
    responses(
        (status = 200, description = "Produtos da categoria, um por nome", body = Vec<Product>),
        (status = 404, description = "Categoria inexistente ou sem produtos")
    )
)]
pub async fn get_category_products(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.category_service.get_products(id).await?;
    Ok((StatusCode::OK, Json(products)))
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categorias",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Designação já em uso")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .create_category(&payload.designation, payload.description.as_deref())
        .await?;

    app_state
        .audit
        .record(&actor.0, &format!("criou a categoria {}", category.designation));

    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "Id da categoria")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria inexistente"),
        (status = 409, description = "Designação já em uso")
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .update_category(
            id,
            payload.designation.as_deref(),
            payload.description.as_deref(),
        )
        .await?;

    app_state.audit.record(
        &actor.0,
        &format!("modificou a categoria {}", category.designation),
    );

    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "Id da categoria")),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria inexistente"),
        (status = 409, description = "Categoria ainda possui produtos")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    actor: ActorIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.category_service.delete_category(id).await?;

    app_state
        .audit
        .record(&actor.0, &format!("removeu a categoria {}", id));

    Ok(StatusCode::NO_CONTENT)
}
